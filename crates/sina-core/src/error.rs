use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("unknown scale: {0}")]
    UnknownScale(String),

    #[error("invalid timestamp '{value}': {reason}")]
    InvalidTimestamp { value: String, reason: String },

    #[error("missing required field: {0}")]
    MissingField(String),

    #[error("expected a JSON array of records, found {0}")]
    NotAnArray(String),

    #[error("record not found: {0}")]
    RecordNotFound(Uuid),

    #[error("duplicate record id: {0}")]
    DuplicateRecord(Uuid),

    #[error("invalid uuid: {0}")]
    InvalidUuid(#[from] uuid::Error),
}
