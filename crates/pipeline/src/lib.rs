//! Core domain for the Codacy security export.
//!
//! This crate contains the domain records, newtype identifiers, the flat export
//! record, error types, and the port traits that infrastructure crates
//! implement. It also owns the two pieces of business logic: the nested
//! repository → pull request → issue aggregation and the tabular export.
//!
//! ## Architectural Layer
//!
//! **Business logic + port definitions.** This crate has no I/O dependencies.
//! It defines *what* is needed; infrastructure crates define *how* to supply it.
//!
//! ## Module Layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`identifiers`] | Newtype identifiers (`RepositoryName`, `BranchName`, `RunId`, etc.) |
//! | [`types`] | Records decoded from the API (`Repository`, `PullRequest`, `SecurityIssue`) |
//! | [`record`] | The flat export record and its cell values |
//! | [`errors`] | Transport, write, and top-level error types |
//! | [`ports`] | `IssueSource`, `TabularDestination`, `RecordWriter` |
//! | [`aggregate`] | Nested collection and flattening |
//! | [`export`] | Header derivation and row writing |
//! | [`run`] | Collect-then-export driver |

pub mod aggregate;
pub mod errors;
pub mod export;
pub mod identifiers;
pub mod ports;
pub mod record;
pub mod run;
pub mod types;

// Re-export everything at the crate root for ergonomic usage by downstream crates.
pub use aggregate::{collect_security_issues, Aggregation};
pub use errors::{SecurityExportError, TransportError, WriteError};
pub use export::{export, ExportOutcome};
pub use identifiers::{
    BranchName, EmptyIdentifier, GitProvider, OrganizationName, PullRequestNumber,
    RepositoryName, RunId,
};
pub use ports::{IssueSource, RecordWriter, TabularDestination};
pub use record::{FieldValue, FlatIssueRecord};
pub use run::{run_export, RunSummary};
pub use types::{PatternInfo, PullRequest, Repository, SecurityIssue, Timestamp, ToolInfo};
