//! Data collaborators for the charting client
//!
//! The remote service turns uploaded files into tables and answers
//! questions about them; local CSV files can be charted without it.

pub mod client;
pub mod config;
pub mod sources;

use tokio::task::JoinError;
use thiserror::Error;

// Re-exports
pub use client::{HttpQueryService, QueryService};
pub use crate::config::{ClientConfig, NullPatterns};
pub use sources::CsvTable;

/// Shown when the service fails without saying why
pub const UNEXPECTED_ERROR: &str = "An unexpected error occurred.";

/// Errors that can occur in data operations
#[derive(Error, Debug)]
pub enum DataError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parsing error: {0}")]
    Csv(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-success status
    #[error("{detail} (status {status})")]
    Service { status: u16, detail: String },

    #[error("Unsupported file format: {0}")]
    UnsupportedFile(String),

    #[error("Configuration error: {0}")]
    Config(#[from] ::config::ConfigError),

    #[error("Join error: {0}")]
    Join(#[from] JoinError),
}

impl From<csv::Error> for DataError {
    fn from(error: csv::Error) -> Self {
        match error.kind() {
            csv::ErrorKind::Io(io_err) => DataError::Io(std::io::Error::new(io_err.kind(), error.to_string())),
            _ => DataError::Csv(error.to_string()),
        }
    }
}
