use portfolio_sync_common::DocumentError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SyncError {
    #[error("config error: {0}")]
    Config(String),

    #[error("image folder not found: {0}")]
    FolderNotFound(String),

    #[error("data file not found: {0}")]
    FileNotFound(String),

    #[error("ignore list is not a JSON array of file names: {0}")]
    InvalidIgnoreList(String),

    #[error("prompt failed: {0}")]
    Prompt(String),

    #[error("{0}")]
    Document(#[from] DocumentError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SyncError>;
