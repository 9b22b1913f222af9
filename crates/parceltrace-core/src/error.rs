//! Domain error types.

use thiserror::Error;
use uuid::Uuid;

/// Top-level domain error type.
#[derive(Debug, Error)]
pub enum DomainError {
    /// A validation error in courier fields.
    #[error("validation error: {0}")]
    Validation(String),

    /// A courier was not found by its internal identifier.
    #[error("courier not found: {0}")]
    CourierNotFound(Uuid),

    /// A tracking-number lookup yielded no courier.
    #[error("Tracking number '{0}' was not found.")]
    TrackingNumberNotFound(String),

    /// A tracking number collided with an existing courier at commit time.
    #[error("tracking number already in use: {0}")]
    TrackingNumberConflict(String),

    /// Tracking-number allocation gave up after the bounded retry count.
    #[error("tracking number allocation exhausted after {attempts} attempts")]
    AllocationExhausted {
        /// Number of candidate tokens that were tried.
        attempts: u32,
    },

    /// An infrastructure/persistence error.
    #[error("infrastructure error: {0}")]
    Infrastructure(String),
}
