//! Error types used throughout the application

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for omflow
///
/// Edit rejections are not an error: an applyEdits call that the server
/// received but did not confirm is reported as `Ok(false)` by the edit
/// submitter, never as an `Err`.
#[derive(Error, Debug, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum OmFlowError {
    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Query error: {0}")]
    Query(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias for omflow operations
pub type Result<T> = std::result::Result<T, OmFlowError>;
