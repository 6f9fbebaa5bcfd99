//! Single-in-flight assistant request guard.
//!
//! The canvas allows one outstanding assistant request at a time: submitting
//! while a request is running is rejected rather than queued, and the user
//! can cancel the running request outright. The guard wraps a tokio task
//! handle; the actual transport (HTTP call, local model, test stub) is the
//! future the caller hands in.

use std::future::Future;

use tokio::task::JoinHandle;

use crate::error::{AssistantError, AssistantResult};

/// Tracks the at-most-one assistant request currently running.
#[derive(Debug, Default)]
pub struct RequestGuard {
    handle: Option<JoinHandle<()>>,
}

impl RequestGuard {
    /// Create a guard with no request in flight.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a request is currently running.
    #[must_use]
    pub fn is_in_flight(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Spawn `request` as the in-flight task.
    ///
    /// # Errors
    ///
    /// Returns [`AssistantError::RequestInFlight`] if a previous request is
    /// still running; the new future is dropped unspawned.
    pub fn submit<F>(&mut self, request: F) -> AssistantResult<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        if self.is_in_flight() {
            tracing::debug!("assistant request rejected, one already in flight");
            return Err(AssistantError::RequestInFlight);
        }
        self.handle = Some(tokio::spawn(request));
        Ok(())
    }

    /// Abort the in-flight request, if any. Idempotent.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
            tracing::debug!("assistant request cancelled");
        }
    }
}

impl Drop for RequestGuard {
    fn drop(&mut self) {
        self.cancel();
    }
}
