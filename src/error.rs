//! Error taxonomy for loading records and querying metrics

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PortfolioError {
    #[error("File not found: {}", path.display())]
    FileMissing { path: PathBuf },

    #[error("Client '{client_id}' not found")]
    NotFound { client_id: String },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid date in column '{column}': {value:?}")]
    InvalidDate { column: &'static str, value: String },

    #[error("Invalid period for client '{client_id}': {year}-{month}")]
    InvalidPeriod {
        client_id: String,
        year: i32,
        month: u32,
    },
}

pub type PortfolioResult<T> = Result<T, PortfolioError>;
