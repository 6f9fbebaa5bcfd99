//! Error types for canvas operations.
//!
//! Nothing in this crate is fatal to an interaction: invalid references are
//! ignored and logged, degenerate geometry resolves to a safe point, and
//! placement always returns a position. The variants here exist for the few
//! APIs whose contract is a `Result` (explicit removal, JSON export).

use thiserror::Error;

/// Result type for canvas operations.
pub type CanvasResult<T> = Result<T, CanvasError>;

/// Errors that can occur in canvas operations.
#[derive(Debug, Error)]
pub enum CanvasError {
    /// Element not found in the store.
    #[error("Element not found: {0}")]
    ElementNotFound(String),

    /// Invalid element operation.
    #[error("Invalid operation on element: {0}")]
    InvalidOperation(String),

    /// Snapshot serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
