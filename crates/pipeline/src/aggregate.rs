//! Nested collection of security issues across an organization.

use tracing::{info, instrument};

use crate::{FlatIssueRecord, IssueSource, TransportError};

/// Everything collected during one traversal of the organization.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Aggregation {
    /// Flattened records, repository-major, then pull-request-major, then in
    /// the order the issue search returned them.
    pub records: Vec<FlatIssueRecord>,
    /// Number of repositories visited.
    pub repositories: usize,
    /// Number of pull requests visited across all repositories.
    pub pull_requests: usize,
}

/// Walks repositories, then their pull requests, then the security issues of
/// each pull request's branch, flattening every issue into a record.
///
/// A pull request without a branch is still searched, with the scope left to
/// the server default. The first error aborts the walk; records collected so
/// far are dropped.
#[instrument(skip(source))]
pub async fn collect_security_issues<S>(source: &S) -> Result<Aggregation, TransportError>
where
    S: IssueSource + ?Sized,
{
    let mut aggregation = Aggregation::default();

    for repository in source.list_repositories().await? {
        info!(repository = %repository.name, "Processing repository");
        aggregation.repositories += 1;

        for pull_request in source.list_pull_requests(&repository.name).await? {
            aggregation.pull_requests += 1;
            info!(
                repository = %repository.name,
                number = ?pull_request.number.map(|n| n.as_u64()),
                title = pull_request.title.as_deref().unwrap_or_default(),
                status = pull_request.status.as_deref().unwrap_or_default(),
                "Processing pull request"
            );

            let branch = pull_request.branch();
            let issues = source
                .search_issues(&repository.name, branch.as_ref())
                .await?;

            aggregation.records.extend(
                issues
                    .iter()
                    .map(|issue| FlatIssueRecord::new(&repository, &pull_request, issue)),
            );
        }
    }

    Ok(aggregation)
}
