use codacy::{CodacyClient, CodacyConfig};
use pipeline::{BranchName, GitProvider, IssueSource, OrganizationName, RepositoryName};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const REPOSITORIES_PATH: &str = "/api/v3/organizations/gh/acme/repositories";
const ISSUES_PATH: &str = "/api/v3/analysis/organizations/gh/acme/repositories/api/issues/search";

fn client_for(server: &MockServer) -> CodacyClient {
    let config = CodacyConfig::new(
        "test-token",
        GitProvider::new("gh").unwrap(),
        OrganizationName::new("acme").unwrap(),
    )
    .with_base_url(&format!("{}/api/v3", server.uri()))
    .unwrap()
    .with_page_size(2)
    .unwrap();
    CodacyClient::new(config).unwrap()
}

#[tokio::test]
async fn sends_token_header_and_follows_cursor() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(REPOSITORIES_PATH))
        .and(header("api-token", "test-token"))
        .and(header("accept", "application/json"))
        .and(query_param("limit", "2"))
        .and(query_param("cursor", "page-2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{ "name": "worker" }],
            "pagination": { "limit": 2 }
        })))
        .with_priority(1)
        .expect(1)
        .mount(&server)
        .await;

    // Default priority: only answers the first page, the cursor mock wins afterwards.
    Mock::given(method("GET"))
        .and(path(REPOSITORIES_PATH))
        .and(header("api-token", "test-token"))
        .and(query_param("limit", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{ "name": "api" }, { "name": "web" }],
            "pagination": { "cursor": "page-2", "limit": 2 }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let repositories = client_for(&server).list_repositories().await.unwrap();

    let names: Vec<&str> = repositories.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, ["api", "web", "worker"]);
}

#[tokio::test]
async fn posts_security_filter_with_branch() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(ISSUES_PATH))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({ "categories": ["Security"], "branchName": "main" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{
                "issueId": "i1",
                "filePath": "src/db.py",
                "lineNumber": 12,
                "message": "SQL injection",
                "patternInfo": { "id": "sqli", "category": "Security", "severityLevel": "Error" },
                "toolInfo": { "name": "Bandit" }
            }],
            "pagination": {}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let issues = client_for(&server)
        .search_issues(
            &RepositoryName::new("api").unwrap(),
            Some(&BranchName::new("main").unwrap()),
        )
        .await
        .unwrap();

    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].file_path.as_deref(), Some("src/db.py"));
    assert_eq!(issues[0].tool_info.as_ref().unwrap().name.as_deref(), Some("Bandit"));
}

#[tokio::test]
async fn error_status_carries_code_and_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(REPOSITORIES_PATH))
        .respond_with(ResponseTemplate::new(401).set_body_string("{\"error\":\"invalid token\"}"))
        .mount(&server)
        .await;

    let err = client_for(&server).list_repositories().await.unwrap_err();

    assert_eq!(err.status(), Some(401));
    assert_eq!(err.body(), Some("{\"error\":\"invalid token\"}"));
}

#[tokio::test]
async fn non_json_success_body_is_a_decode_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(REPOSITORIES_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let err = client_for(&server).list_repositories().await.unwrap_err();

    assert!(matches!(err, pipeline::TransportError::Decode { .. }));
}

#[tokio::test]
async fn unreachable_server_is_a_connection_error() {
    let config = CodacyConfig::new(
        "test-token",
        GitProvider::new("gh").unwrap(),
        OrganizationName::new("acme").unwrap(),
    )
    .with_base_url("http://127.0.0.1:1/api/v3")
    .unwrap();
    let client = CodacyClient::new(config).unwrap();

    let err = client.list_repositories().await.unwrap_err();

    assert!(matches!(err, pipeline::TransportError::Connection { .. }));
}
