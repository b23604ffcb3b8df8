//! Delimited-file infrastructure adapter.
//!
//! Implements [`pipeline::TabularDestination`] and [`pipeline::RecordWriter`]
//! on top of the `csv` crate. Quoting of delimiters, quotes, and embedded
//! newlines is left entirely to `csv`.
//!
//! ## Architectural Layer
//!
//! **Infrastructure.** File creation and encoding live here; the
//! [`pipeline`] crate decides *what* rows to write and in which order.

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use pipeline::{RecordWriter, TabularDestination, WriteError};
use tracing::debug;

/// A CSV file on disk. Nothing is created until [`TabularDestination::open`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvDestination {
    path: PathBuf,
}

impl CsvDestination {
    /// A comma-delimited file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TabularDestination for CsvDestination {
    type Writer = CsvRecordWriter<File>;

    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    /// Creates (or truncates) the file.
    fn open(&self) -> Result<Self::Writer, WriteError> {
        let file = File::create(&self.path).map_err(|e| WriteError::Open {
            destination: self.describe(),
            message: e.to_string(),
        })?;
        debug!(path = %self.path.display(), "Opened CSV destination");
        Ok(CsvRecordWriter::from_writer(file, b','))
    }
}

// ---------------------------------------------------------------------------

/// Writes rows to any [`Write`] sink as delimited text.
pub struct CsvRecordWriter<W: Write> {
    inner: csv::Writer<W>,
    rows: usize,
}

impl<W: Write> CsvRecordWriter<W> {
    pub fn from_writer(writer: W, delimiter: u8) -> Self {
        let inner = csv::WriterBuilder::new()
            .delimiter(delimiter)
            .from_writer(writer);
        Self { inner, rows: 0 }
    }

    /// Rows written so far, header included.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Flushes and returns the underlying sink.
    pub fn into_inner(self) -> Result<W, WriteError> {
        self.inner.into_inner().map_err(|e| WriteError::Flush {
            message: e.error().to_string(),
        })
    }
}

impl<W: Write> RecordWriter for CsvRecordWriter<W> {
    fn write_row(&mut self, cells: &[String]) -> Result<(), WriteError> {
        self.inner
            .write_record(cells)
            .map_err(|e| WriteError::Row {
                row: self.rows,
                message: e.to_string(),
            })?;
        self.rows += 1;
        Ok(())
    }

    fn finish(mut self) -> Result<(), WriteError> {
        self.inner.flush().map_err(|e| WriteError::Flush {
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use pipeline::{
        export, ExportOutcome, FlatIssueRecord, PatternInfo, PullRequest, PullRequestNumber,
        Repository, RepositoryName, SecurityIssue,
    };

    use super::*;

    fn cells(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn quotes_delimiters_quotes_and_newlines() {
        let mut writer = CsvRecordWriter::from_writer(Vec::new(), b',');
        writer.write_row(&cells(&["a", "b"])).unwrap();
        writer
            .write_row(&cells(&["x, y", "say \"hi\"\nbye"]))
            .unwrap();
        assert_eq!(writer.rows(), 2);

        let output = String::from_utf8(writer.into_inner().unwrap()).unwrap();
        assert_eq!(output, "a,b\n\"x, y\",\"say \"\"hi\"\"\nbye\"\n");
    }

    #[test]
    fn custom_delimiter_is_used() {
        let mut writer = CsvRecordWriter::from_writer(Vec::new(), b';');
        writer.write_row(&cells(&["a", "b,c"])).unwrap();

        let output = String::from_utf8(writer.into_inner().unwrap()).unwrap();
        assert_eq!(output, "a;b,c\n");
    }

    #[test]
    fn exports_records_to_file_with_fixed_header() {
        let dir = tempfile::tempdir().unwrap();
        let destination = CsvDestination::new(dir.path().join("issues.csv"));
        let record = FlatIssueRecord::new(
            &Repository {
                name: RepositoryName::new("api").unwrap(),
            },
            &PullRequest {
                number: Some(PullRequestNumber::new(9)),
                title: Some("Harden login, again".into()),
                status: Some("open".into()),
                branch_name: Some("login".into()),
            },
            &SecurityIssue {
                issue_id: Some("i1".into()),
                line_number: Some(3),
                pattern_info: Some(PatternInfo {
                    severity_level: Some("High".into()),
                    ..PatternInfo::default()
                }),
                ..SecurityIssue::default()
            },
        );

        let outcome = export(&[record], &destination).unwrap();

        assert_eq!(
            outcome,
            ExportOutcome::Written {
                destination: destination.describe(),
                rows: 1
            }
        );
        let contents = std::fs::read_to_string(destination.path()).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(
            lines[0],
            "Repository,PR Number,PR Title,PR Status,Issue ID,File Path,Line Number,Message,Pattern ID,Category,Severity,Tool"
        );
        assert_eq!(lines[1], "api,9,\"Harden login, again\",open,i1,,3,,,,High,");
    }

    #[test]
    fn empty_export_creates_no_file() {
        let dir = tempfile::tempdir().unwrap();
        let destination = CsvDestination::new(dir.path().join("issues.csv"));

        let outcome = export(&[], &destination).unwrap();

        assert_eq!(outcome, ExportOutcome::NothingToExport);
        assert!(!destination.path().exists());
    }

    #[test]
    fn unwritable_path_is_an_open_error() {
        let dir = tempfile::tempdir().unwrap();
        let destination = CsvDestination::new(dir.path().join("missing").join("issues.csv"));

        let err = destination.open().err().unwrap();

        assert!(matches!(err, WriteError::Open { .. }));
    }
}
