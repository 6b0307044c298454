//! # Contact TUI
//!
//! A terminal "Contact Us" form that posts a message to one of two
//! interchangeable backends.
//!
//! ## Features
//! - Name / email / subject / message form with required-field checks
//! - Node.js or Python backend, switchable at any time
//! - Hard request timeout, content-type aware response handling
//! - Status line that clears itself a few seconds after each outcome
//!
//! ## Architecture
//! Actor-based with channels:
//! - UI Layer (Ratatui) - synchronous
//! - App Layer (State machine)
//! - Network Layer (Tokio runtime)

pub mod app;
pub mod config;
pub mod constants;
pub mod messages;
pub mod models;
pub mod network;
pub mod ui;

// Re-export commonly used types
pub use app::{AppActor, AppState};
pub use config::Config;
pub use messages::{NetworkCommand, NetworkResponse, RenderState, UiEvent};
pub use models::{Backend, Field, FormFields, StatusKind};
pub use network::client::submit_contact;
pub use network::{Delivery, NetworkActor, SubmitError, SubmitOutcome};
