//! The end-to-end export run: collect, then export once.

use tracing::{info, instrument};

use crate::{
    collect_security_issues, export, ExportOutcome, IssueSource, RunId, SecurityExportError,
    TabularDestination, Timestamp,
};

/// Summary of a completed run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub run_id: RunId,
    pub started_at: Timestamp,
    pub finished_at: Timestamp,
    pub repositories: usize,
    pub pull_requests: usize,
    pub records: usize,
    pub outcome: ExportOutcome,
}

/// Collects every security issue from `source` and writes them to
/// `destination`.
///
/// Any collection error aborts the run before the destination is opened.
#[instrument(skip(source, destination), fields(run_id = %run_id))]
pub async fn run_export<S, D>(
    run_id: RunId,
    source: &S,
    destination: &D,
) -> Result<RunSummary, SecurityExportError>
where
    S: IssueSource + ?Sized,
    D: TabularDestination,
{
    let started_at = Timestamp::now();

    let aggregation = collect_security_issues(source).await?;
    info!(
        repositories = aggregation.repositories,
        pull_requests = aggregation.pull_requests,
        records = aggregation.records.len(),
        "Collection complete"
    );

    let outcome = export(&aggregation.records, destination)?;

    Ok(RunSummary {
        run_id,
        started_at,
        finished_at: Timestamp::now(),
        repositories: aggregation.repositories,
        pull_requests: aggregation.pull_requests,
        records: aggregation.records.len(),
        outcome,
    })
}
