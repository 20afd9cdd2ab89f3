// Error types for tldr.
// Covers API transport failures, non-success responses, config and cache errors.

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TldrError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("Could not derive owner and name from repo: {0}")]
    InvalidRepoName(String),

    #[error("invalid item '{0}', expected pr:<nr> or issue:<nr>")]
    InvalidItem(String),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, TldrError>;
