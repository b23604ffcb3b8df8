//! Tabular export of flattened records.

use tracing::{info, instrument, warn};

use crate::{FlatIssueRecord, RecordWriter, TabularDestination, WriteError};

/// Result of an export attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    /// Header plus `rows` data rows were written to `destination`.
    Written { destination: String, rows: usize },
    /// There were no records; the destination was not touched.
    NothingToExport,
}

/// Writes `records` to `destination`.
///
/// The header is taken from the first record's field names and applied to
/// every row by name; a column a record lacks renders as an empty cell. An
/// empty `records` slice opens nothing and returns
/// [`ExportOutcome::NothingToExport`].
#[instrument(skip_all, fields(destination = %destination.describe(), records = records.len()))]
pub fn export<D>(records: &[FlatIssueRecord], destination: &D) -> Result<ExportOutcome, WriteError>
where
    D: TabularDestination,
{
    let Some(first) = records.first() else {
        warn!("No data to export");
        return Ok(ExportOutcome::NothingToExport);
    };

    let header: Vec<String> = first.field_names().map(String::from).collect();

    let mut writer = destination.open()?;
    writer.write_row(&header)?;
    for record in records {
        let row: Vec<String> = header
            .iter()
            .map(|column| record.get(column).map(|v| v.to_cell()).unwrap_or_default())
            .collect();
        writer.write_row(&row)?;
    }
    writer.finish()?;

    info!(rows = records.len(), "Export written");
    Ok(ExportOutcome::Written {
        destination: destination.describe(),
        rows: records.len(),
    })
}
