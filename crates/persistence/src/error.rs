//! Error types for the persistence layer.
//!
//! Errors are grouped by category: tenant resolution, input validation,
//! resource lookups and backend failures. Services never propagate these
//! to callers; they render the `Display` text into the response envelope.

// Error enum variant fields are self-documenting via their #[error(...)] messages
#![allow(missing_docs)]

use thiserror::Error;

/// The primary error type for all storage operations.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Resource state errors
    #[error(transparent)]
    Resource(#[from] ResourceError),

    /// Tenant resolution errors
    #[error(transparent)]
    Tenant(#[from] TenantError),

    /// Validation errors
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Backend-specific errors
    #[error(transparent)]
    Backend(#[from] BackendError),
}

/// Errors related to resource state.
#[derive(Error, Debug)]
pub enum ResourceError {
    /// The requested record was not found.
    #[error("{collection} not found: {id}")]
    NotFound { collection: String, id: String },

    /// A record with the given id already exists.
    #[error("{collection} already exists: {id}")]
    AlreadyExists { collection: String, id: String },
}

/// Errors related to client (tenant) resolution.
#[derive(Error, Debug)]
pub enum TenantError {
    /// The client identifier is missing or malformed.
    #[error("invalid client id '{client_id}': {reason}")]
    InvalidClient { client_id: String, reason: String },

    /// The client database could not be opened.
    #[error("database for client {client_id} is unavailable: {message}")]
    DatabaseUnavailable { client_id: String, message: String },
}

/// Errors related to request validation.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// A date filter could not be parsed.
    #[error("invalid date for {field}: '{value}'")]
    InvalidDate { field: String, value: String },
}

/// Errors originating from the database backend.
#[derive(Error, Debug)]
pub enum BackendError {
    /// Connection to the backend failed.
    #[error("connection failed to {backend_name}: {message}")]
    ConnectionFailed {
        backend_name: String,
        message: String,
    },

    /// Connection pool exhausted.
    #[error("connection pool exhausted for {backend_name}")]
    PoolExhausted { backend_name: String },

    /// Schema migration error.
    #[error("schema migration failed: {message}")]
    MigrationError { message: String },

    /// Internal backend error.
    #[error("internal error in {backend_name}: {message}")]
    Internal {
        backend_name: String,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Query execution error.
    #[error("query execution failed: {message}")]
    QueryError { message: String },
}

/// Result type alias for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

impl From<rusqlite::Error> for StorageError {
    fn from(err: rusqlite::Error) -> Self {
        StorageError::Backend(BackendError::Internal {
            backend_name: "sqlite".to_string(),
            message: err.to_string(),
            source: Some(Box::new(err)),
        })
    }
}

impl From<r2d2::Error> for StorageError {
    fn from(_err: r2d2::Error) -> Self {
        StorageError::Backend(BackendError::PoolExhausted {
            backend_name: "sqlite".to_string(),
        })
    }
}
