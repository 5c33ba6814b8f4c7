use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while extracting page images.
#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("PDFium library unavailable: {0}")]
    Bind(String),

    #[error("failed to open {}: {reason}", .path.display())]
    Open { path: PathBuf, reason: String },

    #[error("{} has no pages", .path.display())]
    EmptyDocument { path: PathBuf },

    #[error("failed to create output directory {}: {source}", .path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to render page {page}: {reason}")]
    Render { page: usize, reason: String },

    #[error("failed to save {}: {reason}", .path.display())]
    Save { path: PathBuf, reason: String },

    #[error("invalid configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, ExtractError>;
