//! Error taxonomy shared by the services and the message pipeline.

use thiserror::Error;
use uuid::Uuid;

/// Queue transport failure (unavailable, denied, operation error).
///
/// The publisher propagates these unchanged; the consumer loop retries its
/// `receive` with a fixed backoff.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("queue unavailable: {0}")]
    Unavailable(String),

    #[error("access to queue denied: {0}")]
    AccessDenied(String),

    #[error("queue operation failed: {0}")]
    OperationFailed(String),
}

/// Persistence seam failure.
///
/// The in-memory stores never produce these, but the port models a fallible
/// backing store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store operation failed: {0}")]
    OperationFailed(String),
}

/// Domain-level errors surfaced by entities and services.
#[derive(Debug, Error)]
pub enum DomainError {
    /// Caller-supplied data violates a documented invariant.
    #[error("invalid {field}: {reason}")]
    InvalidArgument {
        field: &'static str,
        reason: String,
    },

    /// Referenced entity does not exist.
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: Uuid },

    /// Attempted transition violates a state-machine rule.
    #[error("invalid state: {0}")]
    InvalidState(String),

    /// Outgoing message could not be encoded.
    #[error("message encode failed")]
    Encode(#[source] serde_json::Error),

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl DomainError {
    pub fn invalid_argument(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            field,
            reason: reason.into(),
        }
    }

    pub fn not_found(entity: &'static str, id: Uuid) -> Self {
        Self::NotFound { entity, id }
    }

    pub fn invalid_state(reason: impl Into<String>) -> Self {
        Self::InvalidState(reason.into())
    }
}
