//! # FlowZone Assistant
//!
//! The automation boundary between the FlowZone canvas and an external
//! assistant. The assistant's language model runs elsewhere; this crate
//! models the contract the canvas exposes to it:
//!
//! - [`AssistantAction`] - structured element-creation and connection
//!   commands decoded from the assistant's response.
//! - [`execute`] - applies a batch of actions against a
//!   [`flow_core::Editor`], isolating failures per action.
//! - [`RequestGuard`] - at most one assistant request in flight at a time,
//!   with cancellation.
//!
//! Natural-language parsing and the remote call itself live outside this
//! crate; callers hand in already-decoded actions and drive the guard around
//! their own transport.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod action;
pub mod error;
pub mod request;

pub use action::{execute, ActionOutcome, AssistantAction};
pub use error::{AssistantError, AssistantResult};
pub use request::RequestGuard;
