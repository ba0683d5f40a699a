//! Error types for sheetdiff operations

use thiserror::Error;

pub type Result<T> = std::result::Result<T, SheetDiffError>;

#[derive(Error, Debug)]
pub enum SheetDiffError {
    #[error("Invalid document id '{id}': {message}")]
    Validation { id: String, message: String },

    #[error("Unable to retrieve document '{id}': {message}")]
    Fetch { id: String, message: String },

    #[error("Cell serialization error: {message}")]
    Serialization { message: String },

    #[error("Sheet structure differs: {summary}")]
    StructureMismatch { summary: String },

    #[error("Comparison cancelled")]
    Cancelled,

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Generic error: {0}")]
    Generic(#[from] anyhow::Error),
}

impl SheetDiffError {
    pub fn validation(id: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Validation {
            id: id.into(),
            message: msg.into(),
        }
    }

    pub fn fetch(id: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Fetch {
            id: id.into(),
            message: msg.into(),
        }
    }

    pub fn serialization(msg: impl Into<String>) -> Self {
        Self::Serialization {
            message: msg.into(),
        }
    }

    pub fn structure_mismatch(summary: impl Into<String>) -> Self {
        Self::StructureMismatch {
            summary: summary.into(),
        }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// True for errors raised at the input boundary (bad id or failed fetch)
    pub fn is_boundary(&self) -> bool {
        matches!(self, Self::Validation { .. } | Self::Fetch { .. })
    }
}
