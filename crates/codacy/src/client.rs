//! The Codacy collectors: repositories, pull requests and security issues.

use async_trait::async_trait;
use pipeline::{
    BranchName, IssueSource, PullRequest, Repository, RepositoryName, SecurityIssue,
    TransportError,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{info, instrument};

use crate::pagination::{PageRequest, PaginatedFetcher};
use crate::transport::{HttpTransport, Transport};
use crate::{CodacyConfig, ConfigError};

/// Issue category the search is restricted to.
pub const SECURITY_CATEGORY: &str = "Security";

/// A pull-request list item. The fields of interest sit under `pullRequest`;
/// sibling quality metrics are ignored.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PullRequestListItem {
    #[serde(default)]
    pull_request: Option<PullRequest>,
}

/// Client for one organization of the Codacy API.
#[derive(Debug)]
pub struct CodacyClient<T = HttpTransport> {
    config: CodacyConfig,
    fetcher: PaginatedFetcher<T>,
}

impl CodacyClient<HttpTransport> {
    /// Creates a client that talks HTTP to the configured base URL.
    pub fn new(config: CodacyConfig) -> Result<Self, ConfigError> {
        let transport = HttpTransport::new(&config)?;
        Ok(Self::with_transport(config, transport))
    }
}

impl<T> CodacyClient<T>
where
    T: Transport,
{
    pub fn with_transport(config: CodacyConfig, transport: T) -> Self {
        let fetcher = PaginatedFetcher::new(transport, config.page_size);
        Self { config, fetcher }
    }

    /// `organizations/{provider}/{organization}/...`
    fn organization_endpoint(&self, prefix: &[&str], rest: &[&str]) -> String {
        let mut segments: Vec<&str> = prefix.to_vec();
        segments.extend([
            "organizations",
            self.config.git_provider.as_str(),
            self.config.organization.as_str(),
        ]);
        segments.extend_from_slice(rest);
        self.config.endpoint(&segments)
    }

    /// `analysis/organizations/{provider}/{organization}/repositories/{repository}/...`
    fn repository_endpoint(&self, repository: &RepositoryName, rest: &[&str]) -> String {
        let mut segments = vec!["repositories", repository.as_str()];
        segments.extend_from_slice(rest);
        self.organization_endpoint(&["analysis"], &segments)
    }

    fn issue_search_body(branch: Option<&BranchName>) -> Value {
        let mut body = json!({ "categories": [SECURITY_CATEGORY] });
        if let Some(branch) = branch {
            body["branchName"] = Value::from(branch.as_str());
        }
        body
    }
}

#[async_trait]
impl<T> IssueSource for CodacyClient<T>
where
    T: Transport,
{
    #[instrument(skip(self), fields(organization = %self.config.organization))]
    async fn list_repositories(&self) -> Result<Vec<Repository>, TransportError> {
        let request = PageRequest::get(self.organization_endpoint(&[], &["repositories"]));
        let repositories: Vec<Repository> = self.fetcher.fetch_all(&request).await?;

        info!(count = repositories.len(), "Total repositories fetched");
        Ok(repositories)
    }

    #[instrument(skip(self), fields(repository = %repository))]
    async fn list_pull_requests(
        &self,
        repository: &RepositoryName,
    ) -> Result<Vec<PullRequest>, TransportError> {
        let request = PageRequest::get(self.repository_endpoint(repository, &["pull-requests"]));
        let items: Vec<PullRequestListItem> = self.fetcher.fetch_all(&request).await?;
        let pull_requests: Vec<PullRequest> = items
            .into_iter()
            .map(|item| item.pull_request.unwrap_or_default())
            .collect();

        info!(count = pull_requests.len(), "Total pull requests fetched");
        Ok(pull_requests)
    }

    #[instrument(skip(self), fields(repository = %repository, branch = ?branch.map(|b| b.as_str())))]
    async fn search_issues(
        &self,
        repository: &RepositoryName,
        branch: Option<&BranchName>,
    ) -> Result<Vec<SecurityIssue>, TransportError> {
        let request = PageRequest::post(
            self.repository_endpoint(repository, &["issues", "search"]),
            Self::issue_search_body(branch),
        );
        let issues: Vec<SecurityIssue> = self.fetcher.fetch_all(&request).await?;

        info!(count = issues.len(), "Total security issues fetched");
        Ok(issues)
    }
}
