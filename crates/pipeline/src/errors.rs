//! Error types for the export pipeline.
//!
//! [`SecurityExportError`] is the single error that reaches the top-level
//! caller. Component errors ([`TransportError`] from the issue source,
//! [`WriteError`] from the tabular destination) convert into it unchanged, so
//! the caller can still inspect the status code and response body of a failed
//! request.

use thiserror::Error;

// ---------------------------------------------------------------------------
// Transport errors
// ---------------------------------------------------------------------------

/// A failed request against the analysis API.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// The server answered with a non-success status code.
    #[error("Request to {url} failed with status {status}")]
    Status {
        /// HTTP status code returned by the server.
        status: u16,
        /// URL of the failed request.
        url: String,
        /// Raw response body, empty when the server sent none.
        body: String,
    },

    /// The request never produced a response (DNS, TLS, connection reset...).
    #[error("Request to {url} failed: {message}")]
    Connection {
        /// URL of the failed request.
        url: String,
        /// Description of the underlying failure.
        message: String,
    },

    /// The response body did not have the expected shape.
    #[error("Unexpected response from {url}: {message}")]
    Decode {
        /// URL of the request whose response could not be decoded.
        url: String,
        /// Decoder error message.
        message: String,
    },
}

impl TransportError {
    /// Returns the HTTP status code, if the server produced one.
    pub fn status(&self) -> Option<u16> {
        match self {
            TransportError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns the raw response body, if one was received.
    pub fn body(&self) -> Option<&str> {
        match self {
            TransportError::Status { body, .. } => Some(body),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Write errors
// ---------------------------------------------------------------------------

/// A failure while writing the tabular export.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WriteError {
    #[error("Could not open {destination}: {message}")]
    Open { destination: String, message: String },

    /// `row` is zero-based and counts the header as row 0.
    #[error("Could not write row {row}: {message}")]
    Row { row: usize, message: String },

    #[error("Could not flush output: {message}")]
    Flush { message: String },
}

// ---------------------------------------------------------------------------
// Top-level errors
// ---------------------------------------------------------------------------

/// Errors that abort an export run.
#[derive(Debug, Error)]
pub enum SecurityExportError {
    /// Required configuration is missing or invalid.
    ///
    /// Produced before any network call; the run never starts.
    #[error("Configuration error: {message}")]
    Configuration {
        /// Description of the configuration problem.
        message: String,
    },

    /// A request against the analysis API failed.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The export file could not be written.
    #[error(transparent)]
    Write(#[from] WriteError),
}

impl SecurityExportError {
    /// Returns the transport error behind this error, if any.
    pub fn as_transport(&self) -> Option<&TransportError> {
        match self {
            SecurityExportError::Transport(err) => Some(err),
            _ => None,
        }
    }
}
