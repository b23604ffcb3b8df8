//! Codacy security export CLI entry point.
//!
//! This binary is the composition root for the entire system. Responsibilities:
//!
//! 1. **Read configuration**: load [`settings::Settings`] from the environment
//!    and validate it before any network call.
//! 2. **Wire observability**: configure `tracing-subscriber` (text or JSON) and,
//!    when `OTEL_EXPORTER_OTLP_ENDPOINT` is set, an OpenTelemetry OTLP exporter.
//!    All `tracing` spans and events emitted by every crate flow through it.
//! 3. **Construct infrastructure**: a `CodacyClient` and a `CsvDestination`,
//!    handed to [`pipeline::run_export`].
//! 4. **Report**: this is the single place errors are caught. A failed request
//!    is logged with its status code and response body; the process exits
//!    non-zero.

mod app;
mod settings;
mod telemetry;

use std::process::ExitCode;

use pipeline::{ExportOutcome, RunId, RunSummary, SecurityExportError};
use tracing::{error, info, warn};

use crate::settings::{LogFormat, Settings};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let settings = Settings::from_env();

    let (format, otlp_endpoint) = match &settings {
        Ok(s) => (s.log_format, s.otlp_endpoint.clone()),
        Err(_) => (LogFormat::default(), None),
    };
    let _telemetry = match telemetry::init(format, otlp_endpoint.as_deref()) {
        Ok(guard) => guard,
        Err(err) => {
            eprintln!("Error: {err:#}");
            return ExitCode::FAILURE;
        }
    };

    let run_id = RunId::new_random();
    let result = match settings {
        Ok(settings) => app::run(&settings, run_id).await,
        Err(err) => Err(SecurityExportError::from(err)),
    };

    match result {
        Ok(summary) => {
            report_summary(&summary);
            ExitCode::SUCCESS
        }
        Err(err) => {
            report_error(&err);
            ExitCode::FAILURE
        }
    }
}

fn report_summary(summary: &RunSummary) {
    let elapsed = summary.finished_at.as_datetime() - summary.started_at.as_datetime();
    match &summary.outcome {
        ExportOutcome::Written { destination, rows } => info!(
            repositories = summary.repositories,
            pull_requests = summary.pull_requests,
            rows,
            elapsed_ms = elapsed.num_milliseconds(),
            "All security issues have been saved to {destination}"
        ),
        ExportOutcome::NothingToExport => warn!(
            repositories = summary.repositories,
            pull_requests = summary.pull_requests,
            "No security issues found"
        ),
    }
}

fn report_error(err: &SecurityExportError) {
    error!("Error: {err}");
    if let Some(transport) = err.as_transport() {
        if let Some(status) = transport.status() {
            error!(status, "Response status code: {status}");
        }
        if let Some(body) = transport.body() {
            error!("Response content: {body}");
        }
    }
}
