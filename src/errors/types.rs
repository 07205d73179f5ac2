//! Error type definitions for the bulk-load demo.
//!
//! One enum per pipeline stage, so callers can tell a fetch failure from a
//! file failure from a storage failure instead of seeing a single blanket
//! error string.

use thiserror::Error;

/// Failures while talking to the remote speakers service.
#[derive(Error, Debug)]
pub enum FetchError {
    /// Transport-level failure (connection refused, reset, TLS, ...)
    #[error("request to speakers service failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The service answered, but not with 200 OK
    #[error("speakers service returned HTTP {status}")]
    Status { status: reqwest::StatusCode },

    /// The body did not decode as a speakers page
    #[error("unexpected speakers response shape: {0}")]
    Shape(#[from] serde_json::Error),
}

/// Failures reading or writing the CSV interchange file.
#[derive(Error, Debug)]
pub enum CsvFileError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("file error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV row has {found} columns, expected {expected}")]
    Columns { expected: usize, found: usize },

    /// The photo column holds hex-armored bytes; anything else is a bad file
    #[error("invalid photo encoding: {0}")]
    Photo(#[from] hex::FromHexError),
}

/// Top-level error for one load run, one variant per stage.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("fetch failed: {0}")]
    Fetch(#[from] FetchError),

    #[error("CSV file stage failed: {0}")]
    CsvFile(#[from] CsvFileError),

    #[error("storage failed: {0}")]
    Storage(#[from] sqlx::Error),
}
