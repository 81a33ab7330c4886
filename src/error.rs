//! Error types for codegrab operations.
//!
//! Detection itself never fails; these cover the edges around it (files,
//! settings, selectors, block lookup).

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid selector: {0}")]
    InvalidSelector(String),

    #[error("No code block with index {index} (page has {count})")]
    BlockNotFound { index: usize, count: usize },

    #[error("Export is not a download")]
    NotADownload,

    #[error("Invalid file name: {0:?}")]
    InvalidFileName(String),
}

pub type Result<T> = std::result::Result<T, Error>;
