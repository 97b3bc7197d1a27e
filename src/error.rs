// src/error.rs
use thiserror::Error;

#[derive(Error, Debug)]
pub enum OpsError {
    #[error("{table}: expected at least {expected} columns, found {found}")]
    SchemaMismatch { table: &'static str, expected: usize, found: usize },

    #[error("{table}: {placeholder} placeholder rows outnumber {valid} valid rows")]
    PlaceholderData { table: &'static str, placeholder: usize, valid: usize },

    #[error("source unavailable for {range}: {reason}")]
    SourceUnavailable { range: String, reason: String },

    #[error("{table} row {row}: {reason}")]
    RowProcessing { table: &'static str, row: usize, reason: String },

    #[error("configuration error: {0}")]
    Config(String),

    #[error("invalid range: {0}")]
    InvalidRange(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl OpsError {
    /// Only configuration problems stop the process; everything else degrades.
    pub fn is_fatal(&self) -> bool {
        matches!(self, OpsError::Config(_))
    }

    /// Errors a source adapter may raise that mean "treat as an empty table".
    pub fn is_source_failure(&self) -> bool {
        matches!(
            self,
            OpsError::SourceUnavailable { .. } | OpsError::Http(_) | OpsError::Io(_) | OpsError::Csv(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, OpsError>;
