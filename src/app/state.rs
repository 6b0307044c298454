//! App state - pure data structure with no I/O logic

use tokio::time::Instant;

use crate::config::Config;
use crate::messages::ui_events::InputMode;
use crate::messages::RenderState;
use crate::models::{Backend, Field, FormFields, StatusKind};

/// Main application state - pure data, no I/O
pub struct AppState {
    // Form
    pub fields: FormFields,
    pub focused: Field,
    pub input_mode: InputMode,
    pub cursor_position: usize,

    // Target
    pub backend: Backend,

    // Submission lifecycle
    pub status: String,
    pub status_kind: StatusKind,
    /// When set, the status is cleared once this instant passes
    pub status_deadline: Option<Instant>,
    pub is_loading: bool,
    pub next_request_id: u64,
    pub pending_request_id: Option<u64>,

    // Popups
    pub show_help: bool,

    pub config: Config,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl AppState {
    pub fn new(config: Config) -> Self {
        AppState {
            fields: FormFields::default(),
            focused: Field::Name,
            input_mode: InputMode::Normal,
            cursor_position: 0,
            backend: Backend::default(),
            status: String::new(),
            status_kind: StatusKind::Idle,
            status_deadline: None,
            is_loading: false,
            next_request_id: 1,
            pending_request_id: None,
            show_help: false,
            config,
        }
    }

    /// Generate a unique request ID
    pub fn next_id(&mut self) -> u64 {
        let id = self.next_request_id;
        self.next_request_id += 1;
        id
    }

    /// Get the focused field content
    pub fn current_input(&self) -> &str {
        self.fields.get(self.focused)
    }

    pub fn current_input_mut(&mut self) -> &mut String {
        self.fields.get_mut(self.focused)
    }

    /// URL the next submission will be sent to
    pub fn endpoint(&self) -> String {
        self.config.endpoint(self.backend)
    }

    /// Convert state to RenderState for UI
    pub fn to_render_state(&self) -> RenderState {
        RenderState {
            fields: self.fields.clone(),
            focused: self.focused,
            input_mode: self.input_mode,
            cursor_position: self.cursor_position,
            backend: self.backend,
            endpoint: self.endpoint(),
            status: self.status.clone(),
            status_kind: self.status_kind,
            is_loading: self.is_loading,
            show_help: self.show_help,
        }
    }
}
