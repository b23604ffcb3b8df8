//! Wires the concrete adapters into the export run.

use codacy::CodacyClient;
use pipeline::{run_export, RunId, RunSummary, SecurityExportError};
use tabular::CsvDestination;

use crate::settings::{configuration_error, Settings};

pub async fn run(settings: &Settings, run_id: RunId) -> Result<RunSummary, SecurityExportError> {
    let config = settings.codacy_config().map_err(configuration_error)?;
    let client = CodacyClient::new(config).map_err(configuration_error)?;
    let destination = CsvDestination::new(&settings.output_file);

    run_export(run_id, &client, &destination).await
}
