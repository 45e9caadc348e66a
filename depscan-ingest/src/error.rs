//! Error types for page text extraction

use thiserror::Error;

#[derive(Error, Debug)]
pub enum IngestError {
    #[error("{tool} not installed or not on PATH ({hint})")]
    ToolMissing { tool: String, hint: &'static str },

    #[error("{tool} failed (exit {status}): {stderr}")]
    ToolFailed {
        tool: String,
        status: i32,
        stderr: String,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid path: {0}")]
    InvalidPath(String),

    #[error("could not read page count: {0}")]
    PageCount(String),
}

pub type Result<T> = std::result::Result<T, IngestError>;
