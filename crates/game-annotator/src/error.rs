//! Annotator error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnnotatorError {
    #[error("No positions to analyse")]
    EmptyGame,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Opening data decode error: {0}")]
    Bincode(#[from] bincode::Error),
}
