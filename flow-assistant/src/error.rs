//! Assistant boundary errors.

use thiserror::Error;

/// Result type for assistant operations.
pub type AssistantResult<T> = Result<T, AssistantError>;

/// Errors at the assistant boundary.
#[derive(Debug, Error)]
pub enum AssistantError {
    /// A request was submitted while another was still in flight.
    #[error("an assistant request is already in flight")]
    RequestInFlight,

    /// Failed to decode an action payload.
    #[error("failed to decode assistant actions: {0}")]
    Decode(#[from] serde_json::Error),
}
