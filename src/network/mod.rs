//! Network layer - contact form submission
//!
//! The Network actor receives submission commands and sends back outcomes.

pub mod actor;
pub mod client;

pub use actor::NetworkActor;
pub use client::{Delivery, SubmitError, SubmitOutcome};
