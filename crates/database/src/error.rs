//! Database error types.

use thiserror::Error;

use crate::validation::ValidationError;

/// Errors that can occur during document store operations.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// SQLx error (connection, query, etc.)
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    /// Migration error
    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// A record could not be encoded as a JSON document.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A stored document does not fit the shape of its collection.
    #[error("invalid document in {collection}: {reason}")]
    InvalidDocument {
        collection: &'static str,
        reason: String,
    },

    /// Record not found
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// Input rejected before any write was attempted.
    #[error("{0}")]
    Validation(#[from] ValidationError),
}

impl DatabaseError {
    pub(crate) fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity,
            id: id.into(),
        }
    }
}

/// Result type for database operations.
pub type Result<T> = std::result::Result<T, DatabaseError>;
