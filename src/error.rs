// src/error.rs

//! Unified error handling for the sync application.
//!
//! [`AppError`] covers everything that aborts a run. [`RowError`] covers
//! problems with a single spreadsheet row, which are logged and counted but
//! never stop the batch.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for sync operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Unified application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP request failed (unclassified transport error)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// URL parsing failed
    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    /// The spreadsheet host could not be reached
    #[error("Connection to {url} failed: {message}. Please check your internet connection.")]
    Connection { url: String, message: String },

    /// The spreadsheet host refused access to the export
    #[error(
        "Access denied ({status}) for {url}. The sheet is probably not publicly accessible; \
         share it so that 'Anyone with the link' can view."
    )]
    AccessDenied { url: String, status: u16 },

    /// The spreadsheet host answered with a non-success status
    #[error("HTTP status {status} from {url}")]
    HttpStatus { url: String, status: u16 },

    /// Download was skipped but no local CSV exists
    #[error("CSV file not found: {}. Cannot skip download when the CSV file doesn't exist.", .0.display())]
    ByteStoreMissing(PathBuf),

    /// The CSV byte store could not be opened or decoded
    #[error("Error reading CSV file {}: {message}", path.display())]
    TableRead { path: PathBuf, message: String },

    /// Data validation error
    #[error("Validation error: {0}")]
    Validation(String),
}

impl AppError {
    /// Create a connection error.
    pub fn connection(url: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Connection {
            url: url.into(),
            message: message.to_string(),
        }
    }

    /// Create a table read error.
    pub fn table_read(path: impl Into<PathBuf>, message: impl fmt::Display) -> Self {
        Self::TableRead {
            path: path.into(),
            message: message.to_string(),
        }
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}

/// A non-fatal problem with one row of the sheet.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RowError {
    /// A required column is absent from the header or the row is too short
    #[error("Missing column '{column}'")]
    MissingColumn { id: String, column: &'static str },

    /// One or more required values are blank
    #[error("Missing required fields: {}", fields.join(", "))]
    MissingFields {
        id: String,
        fields: Vec<&'static str>,
    },

    /// Carat is not a base-10 integer
    #[error("Invalid carat value '{value}'")]
    InvalidCarat { id: String, value: String },

    /// Identifier cannot be used as a file name
    #[error("Identifier is not a valid file name")]
    InvalidIdentifier { id: String },

    /// The document could not be persisted
    #[error("Failed to write document: {message}")]
    Write { id: String, message: String },
}

impl RowError {
    /// Identifier of the row this error belongs to.
    pub fn id(&self) -> &str {
        match self {
            Self::MissingColumn { id, .. }
            | Self::MissingFields { id, .. }
            | Self::InvalidCarat { id, .. }
            | Self::InvalidIdentifier { id }
            | Self::Write { id, .. } => id,
        }
    }
}
