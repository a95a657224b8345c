//! Domain error types
//!
//! This module defines the error hierarchy for KSK reports. Report-level
//! failures that callers must tell apart (unknown type, missing header,
//! foreign header, broken data source) live in [`ReportError`]; everything
//! else is carried by [`KskError`]. Neither type exposes driver types.

use thiserror::Error;

/// Main error type
///
/// This is the primary error type used throughout the crate.
#[derive(Debug, Error)]
pub enum KskError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Report resolution errors
    #[error("Report error: {0}")]
    Report(#[from] ReportError),

    /// Database-related errors (pool, statements outside a report data source)
    #[error("Database error: {0}")]
    Database(String),

    /// Network/connection errors
    #[error("Connection error: {0}")]
    Connection(String),

    /// Validation errors on caller input
    #[error("Validation error: {0}")]
    Validation(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),
}

impl KskError {
    /// Whether the caller caused the failure (a 4xx-equivalent)
    ///
    /// Client errors are reported back as-is and never retried.
    pub fn is_client_error(&self) -> bool {
        match self {
            KskError::Validation(_) => true,
            KskError::Report(report) => report.is_client_error(),
            _ => false,
        }
    }
}

/// Report resolution errors
///
/// "No report for this date" is deliberately absent: it is an empty result,
/// not a failure.
#[derive(Debug, Error)]
pub enum ReportError {
    /// The report code has no catalog entry
    #[error("Unknown report type: {0}")]
    UnknownReportType(String),

    /// The header does not exist
    #[error("Report header not found: id={0}")]
    HeaderNotFound(i64),

    /// The header exists but belongs to another user
    #[error("Access to report {header_id} is forbidden")]
    Forbidden { header_id: i64 },

    /// The data table or function could not be queried
    #[error("Data source {source_name} unavailable: {message}")]
    SourceUnavailable {
        source_name: String,
        message: String,
    },

    /// The export format is not one of xlsx, csv, pdf
    #[error("Unsupported export format: {0}")]
    UnsupportedFormat(String),
}

impl ReportError {
    /// Whether the caller caused the failure
    pub fn is_client_error(&self) -> bool {
        !matches!(self, ReportError::SourceUnavailable { .. })
    }
}

// Conversion from std::io::Error
impl From<std::io::Error> for KskError {
    fn from(err: std::io::Error) -> Self {
        KskError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for KskError {
    fn from(err: serde_json::Error) -> Self {
        KskError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for KskError {
    fn from(err: toml::de::Error) -> Self {
        KskError::Configuration(format!("TOML parse error: {err}"))
    }
}
