//! Port traits implemented by infrastructure crates.
//!
//! The pipeline only sees these traits. The `codacy` crate implements
//! [`IssueSource`] over HTTP; the `tabular` crate implements
//! [`TabularDestination`] over CSV files.

use async_trait::async_trait;

use crate::{
    BranchName, PullRequest, Repository, RepositoryName, SecurityIssue, TransportError,
    WriteError,
};

/// Read access to an organization's repositories, pull requests and
/// security issues.
///
/// Every method returns the complete result set (all pages) or the first
/// error encountered.
#[async_trait]
pub trait IssueSource: Send + Sync {
    /// Lists every repository of the organization.
    async fn list_repositories(&self) -> Result<Vec<Repository>, TransportError>;

    /// Lists every pull request of `repository`, in server order.
    async fn list_pull_requests(
        &self,
        repository: &RepositoryName,
    ) -> Result<Vec<PullRequest>, TransportError>;

    /// Searches security issues of `repository`.
    ///
    /// With `branch == None` the search scope is left to the server default.
    async fn search_issues(
        &self,
        repository: &RepositoryName,
        branch: Option<&BranchName>,
    ) -> Result<Vec<SecurityIssue>, TransportError>;
}

/// Writes rows of cells to one open destination.
pub trait RecordWriter {
    /// Writes one row. Quoting and escaping are the writer's concern.
    fn write_row(&mut self, cells: &[String]) -> Result<(), WriteError>;

    /// Flushes buffered output and closes the destination.
    fn finish(self) -> Result<(), WriteError>;
}

/// A place a table can be written to.
///
/// Opening is separate from construction so that an empty export never
/// creates or truncates the destination.
pub trait TabularDestination {
    type Writer: RecordWriter;

    /// Human-readable name of the destination (e.g. a file path).
    fn describe(&self) -> String;

    /// Opens the destination for writing.
    fn open(&self) -> Result<Self::Writer, WriteError>;
}
