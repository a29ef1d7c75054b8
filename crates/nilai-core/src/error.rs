//! Error types for nilai.
//!
//! One unified error type with explicit variants for validation, storage,
//! subscription and input failures. Export has its own [`ExportError`].

use thiserror::Error;

/// The unified error type for nilai operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Form input rejected before anything is written.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// The store rejected or failed a read or write.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// The live query could not be established or dropped.
    #[error("subscription error: {message}")]
    Subscription { message: String },

    /// Malformed identifiers or locations.
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),
}

impl Error {
    /// Build a subscription error from any displayable cause.
    pub fn subscription(message: impl std::fmt::Display) -> Self {
        Error::Subscription {
            message: message.to_string(),
        }
    }
}

/// Form validation failures.
///
/// The `Display` output is the user-facing message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("all fields required")]
    MissingField,

    #[error("score must be a number between 0 and 100")]
    ScoreOutOfRange,
}

/// Storage failures.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("malformed document {id}: {reason}")]
    Document { id: String, reason: String },
}

/// Export failures, reported by [`export_csv`](crate::export_csv).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExportError {
    #[error("nothing to export")]
    Empty,
}

/// Input validation errors for identifiers and locations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidInputError {
    #[error("invalid store URL '{value}': {reason}")]
    StoreUrl { value: String, reason: String },

    #[error("invalid record id '{value}': {reason}")]
    RecordId { value: String, reason: String },

    #[error("invalid collection '{value}': {reason}")]
    Collection { value: String, reason: String },
}
