//! Error types for the data-file model

use thiserror::Error;

/// Structural problems found while reading or editing the data file
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DocumentError {
    #[error("collection `{0}` not found in data file")]
    BlockNotFound(String),

    #[error("collection `{0}` has no closing bracket")]
    UnterminatedBlock(String),

    #[error("no records found in collection `{0}`")]
    NoRecords(String),

    #[error("ID not found: {id} (collection `{collection}`)")]
    RecordNotFound { collection: String, id: u32 },

    #[error("record {id} has no `{field}` field")]
    FieldNotFound { id: u32, field: &'static str },
}

/// Result alias
pub type Result<T> = std::result::Result<T, DocumentError>;
