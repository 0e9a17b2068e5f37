//! Application-level errors (wraps domain errors)

use thiserror::Error;

use crate::domain::DomainError;

/// Application errors wrap domain errors and add input and settings context.
#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("unexpected end of input: expected {expected} at token {position}")]
    MissingToken { expected: String, position: usize },

    #[error("invalid token {token:?} at position {position}: {reason}")]
    InvalidToken {
        position: usize,
        token: String,
        reason: String,
    },

    #[error("root {root} does not name one of the {vertices} vertices")]
    RootOutOfRange { root: usize, vertices: usize },

    #[error("tree height {height} exceeds render limit {limit}")]
    RenderTooDeep { height: usize, limit: usize },

    #[error("config error: {message}")]
    Config { message: String },

    #[error("operation failed: {context}")]
    OperationFailed {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// Result type for application layer operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
