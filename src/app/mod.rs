//! App layer - form state and the submission state machine
//!
//! The App actor receives UI events and submission outcomes,
//! updates state, and emits network commands and render state.

pub mod actor;
pub mod commands;
pub mod state;

pub use actor::AppActor;
pub use state::AppState;
