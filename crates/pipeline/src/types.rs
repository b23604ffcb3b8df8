//! Domain records returned by the Codacy analysis API.
//!
//! Fields mirror the JSON the service returns (camelCase on the wire). Every
//! field that the service may omit is an `Option`, so decoding never fails on
//! a sparse payload; the null policy for the export lives in
//! [`crate::FlatIssueRecord::new`].

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::{BranchName, PullRequestNumber, RepositoryName};

// ---------------------------------------------------------------------------
// Repositories and pull requests
// ---------------------------------------------------------------------------

/// A repository belonging to the configured organization.
///
/// Only the name is consumed; every other field in the payload is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Repository {
    /// Repository name, unique within the organization.
    pub name: RepositoryName,
}

/// A pull request of one repository.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PullRequest {
    /// Provider-assigned pull request number.
    #[serde(default)]
    pub number: Option<PullRequestNumber>,

    /// Pull request title.
    #[serde(default)]
    pub title: Option<String>,

    /// Status string as reported by the service (e.g. `"open"`, `"merged"`).
    #[serde(default)]
    pub status: Option<String>,

    /// Source branch of the pull request, when the service reports one.
    #[serde(default)]
    pub branch_name: Option<String>,
}

impl PullRequest {
    /// Returns the branch to scope an issue search to.
    ///
    /// An empty branch string is treated the same as a missing one.
    pub fn branch(&self) -> Option<BranchName> {
        self.branch_name.clone().and_then(BranchName::new)
    }
}

// ---------------------------------------------------------------------------
// Security issues
// ---------------------------------------------------------------------------

/// Pattern metadata attached to an issue.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatternInfo {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub severity_level: Option<String>,
}

/// The analysis tool that reported an issue.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ToolInfo {
    #[serde(default)]
    pub name: Option<String>,
}

/// A single issue returned by the issue search endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecurityIssue {
    #[serde(default)]
    pub issue_id: Option<String>,
    #[serde(default)]
    pub file_path: Option<String>,
    #[serde(default)]
    pub line_number: Option<u64>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub pattern_info: Option<PatternInfo>,
    #[serde(default)]
    pub tool_info: Option<ToolInfo>,
}

// ---------------------------------------------------------------------------
// Time
// ---------------------------------------------------------------------------

/// A UTC wall-clock timestamp.
///
/// Wraps [`chrono::DateTime<Utc>`] so callers never depend on `chrono` types
/// directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Returns the current UTC time as a [`Timestamp`].
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Returns the underlying [`DateTime<Utc>`].
    pub fn as_datetime(self) -> DateTime<Utc> {
        self.0
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_rfc3339())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn pull_request_decodes_camel_case_fields() {
        let pr: PullRequest = serde_json::from_value(json!({
            "number": 42,
            "title": "Add login",
            "status": "open",
            "branchName": "feature/login",
            "headCommitSha": "abc123"
        }))
        .unwrap();

        assert_eq!(pr.number, Some(PullRequestNumber::new(42)));
        assert_eq!(pr.branch().unwrap().as_str(), "feature/login");
    }

    #[test]
    fn empty_or_null_branch_means_no_branch() {
        let empty: PullRequest = serde_json::from_value(json!({ "branchName": "" })).unwrap();
        let null: PullRequest = serde_json::from_value(json!({ "branchName": null })).unwrap();
        assert!(empty.branch().is_none());
        assert!(null.branch().is_none());
    }

    #[test]
    fn sparse_issue_decodes_with_absent_nested_objects() {
        let issue: SecurityIssue = serde_json::from_value(json!({
            "issueId": "i-1",
            "lineNumber": 7,
            "patternInfo": { "id": "p-1" }
        }))
        .unwrap();

        assert_eq!(issue.issue_id.as_deref(), Some("i-1"));
        assert_eq!(issue.line_number, Some(7));
        assert_eq!(issue.pattern_info.unwrap().severity_level, None);
        assert!(issue.tool_info.is_none());
    }

    #[test]
    fn repository_requires_a_name() {
        assert!(serde_json::from_value::<Repository>(json!({ "id": 1 })).is_err());
        let repo: Repository =
            serde_json::from_value(json!({ "name": "api", "provider": "gh" })).unwrap();
        assert_eq!(repo.name.as_str(), "api");
    }

    #[test]
    fn repository_with_empty_name_is_rejected() {
        assert!(serde_json::from_value::<Repository>(json!({ "name": "" })).is_err());
    }
}
