//! Render state - data structure sent from App layer to UI for rendering

use crate::messages::ui_events::InputMode;
use crate::models::{Backend, Field, FormFields, StatusKind};

/// Complete state needed by the UI to render
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderState {
    // Form
    pub fields: FormFields,
    pub focused: Field,
    pub input_mode: InputMode,
    pub cursor_position: usize,

    // Submission
    pub backend: Backend,
    pub endpoint: String,
    pub status: String,
    pub status_kind: StatusKind,
    pub is_loading: bool,

    // Popups
    pub show_help: bool,
}
