//! Error Handling
//!
//! Error type definitions used in gh-labels

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Error types for gh-labels
#[derive(Error, Debug)]
pub enum Error {
    #[error("HTTP transport error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("GitHub API error: {status} {status_text}: {body}")]
    Api {
        status: u16,
        status_text: String,
        body: String,
    },

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Snapshot error: {0}")]
    Snapshot(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Error::Validation(message.into())
    }

    /// Create a new snapshot error
    pub fn snapshot<S: Into<String>>(message: S) -> Self {
        Error::Snapshot(message.into())
    }

    /// Whether this is a GitHub API failure caused by the label already existing.
    ///
    /// GitHub reports this as a 422 whose body contains an `already_exists`
    /// validation code. Matching the substring in the raw body is the observed
    /// behavior this tool relies on for idempotent imports.
    pub fn is_already_exists(&self) -> bool {
        matches!(self, Error::Api { body, .. } if body.contains("already_exists"))
    }
}
