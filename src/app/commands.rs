//! Command handlers - business logic for processing UI events

use tokio::time::Instant;

use crate::app::AppState;
use crate::constants::{STATUS_SENDING, STATUS_SENT};
use crate::messages::ui_events::InputMode;
use crate::messages::{NetworkCommand, NetworkResponse};
use crate::models::{Backend, StatusKind};

impl AppState {
    // ========================
    // Field focus
    // ========================

    pub fn next_field(&mut self) {
        self.focused = self.focused.next();
        self.cursor_position = self.current_input().len();
    }

    pub fn prev_field(&mut self) {
        self.focused = self.focused.prev();
        self.cursor_position = self.current_input().len();
    }

    // ========================
    // Input editing
    // ========================

    pub fn start_editing(&mut self) {
        self.input_mode = InputMode::Editing;
        self.cursor_position = self.current_input().len();
    }

    pub fn stop_editing(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    pub fn move_cursor_left(&mut self) {
        let input = self.current_input();
        if self.cursor_position > 0 {
            let new_pos = input[..self.cursor_position]
                .char_indices()
                .last()
                .map(|(i, _)| i)
                .unwrap_or(0);
            self.cursor_position = new_pos;
        }
    }

    pub fn move_cursor_right(&mut self) {
        let input = self.current_input();
        if self.cursor_position < input.len() {
            let new_pos = input[self.cursor_position..]
                .char_indices()
                .nth(1)
                .map(|(i, _)| self.cursor_position + i)
                .unwrap_or(input.len());
            self.cursor_position = new_pos;
        }
    }

    pub fn enter_char(&mut self, c: char) {
        let cursor_pos = self.cursor_position;
        let input = self.current_input_mut();
        if cursor_pos <= input.len() {
            input.insert(cursor_pos, c);
            self.cursor_position = cursor_pos + c.len_utf8();
        }
    }

    /// Line break, only meaningful in multi-line fields
    pub fn enter_newline(&mut self) {
        if self.focused.is_multiline() {
            self.enter_char('\n');
        }
    }

    pub fn delete_char(&mut self) {
        if self.cursor_position > 0 {
            let cursor_pos = self.cursor_position;
            let input = self.current_input_mut();
            let prev_pos = input[..cursor_pos]
                .char_indices()
                .last()
                .map(|(i, _)| i)
                .unwrap_or(0);
            input.remove(prev_pos);
            self.cursor_position = prev_pos;
        }
    }

    // ========================
    // Backend selection
    // ========================

    pub fn select_backend(&mut self, backend: Backend) {
        if self.backend != backend {
            tracing::debug!(backend = backend.as_str(), "Backend selected");
        }
        self.backend = backend;
    }

    pub fn toggle_backend(&mut self) {
        self.select_backend(self.backend.toggle());
    }

    // ========================
    // Help popup
    // ========================

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    pub fn close_help(&mut self) {
        self.show_help = false;
    }

    // ========================
    // Submission
    // ========================

    /// Start a submission if none is in flight and every field is filled.
    ///
    /// Returns the command for the Network layer, or `None` when nothing
    /// should be sent.
    pub fn prepare_submission(&mut self) -> Option<NetworkCommand> {
        if self.is_loading {
            return None;
        }

        if let Some(missing) = self.fields.first_missing() {
            self.focused = missing;
            self.cursor_position = 0;
            self.show_outcome(format!("{} is required.", missing.label()), StatusKind::Error);
            return None;
        }

        self.is_loading = true;
        self.status = String::from(STATUS_SENDING);
        self.status_kind = StatusKind::Pending;
        self.status_deadline = None;

        let id = self.next_id();
        self.pending_request_id = Some(id);
        tracing::debug!(id, backend = self.backend.as_str(), "Submission started");

        Some(NetworkCommand::SubmitContact {
            id,
            url: self.endpoint(),
            fields: self.fields.clone(),
        })
    }

    // ========================
    // Response handling
    // ========================

    pub fn handle_response(&mut self, response: NetworkResponse) {
        if self.pending_request_id != Some(response.id()) {
            tracing::debug!(id = response.id(), "Ignoring response for stale submission");
            return;
        }

        match response {
            NetworkResponse::Submitted { outcome, .. } => {
                match outcome {
                    Ok(_) => {
                        self.fields.clear();
                        self.cursor_position = 0;
                        self.show_outcome(String::from(STATUS_SENT), StatusKind::Success);
                    }
                    Err(e) => {
                        self.show_outcome(e.status_message(), StatusKind::Error);
                    }
                }
                self.finalize_request();
            }
        }
    }

    /// Clear the status if its deadline has passed. Returns true if it changed.
    pub fn expire_status(&mut self, now: Instant) -> bool {
        match self.status_deadline {
            Some(deadline) if deadline <= now => {
                self.status.clear();
                self.status_kind = StatusKind::Idle;
                self.status_deadline = None;
                true
            }
            _ => false,
        }
    }

    fn show_outcome(&mut self, text: String, kind: StatusKind) {
        self.status = text;
        self.status_kind = kind;
        self.status_deadline = Some(Instant::now() + self.config.status_ttl());
    }

    fn finalize_request(&mut self) {
        self.is_loading = false;
        self.pending_request_id = None;
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::config::Config;
    use crate::constants::{STATUS_NETWORK_ERROR, STATUS_TIMED_OUT};
    use crate::models::{Field, FormFields};
    use crate::network::{Delivery, SubmitError};

    fn filled_state() -> AppState {
        let mut state = AppState::new(Config::default());
        state.fields = FormFields {
            name: "Ada Lovelace".into(),
            email: "ada@example.com".into(),
            subject: "Engines".into(),
            message: "Hello there".into(),
        };
        state
    }

    fn submit(state: &mut AppState) -> u64 {
        match state.prepare_submission() {
            Some(NetworkCommand::SubmitContact { id, .. }) => id,
            other => panic!("expected a submission, got {:?}", other),
        }
    }

    fn finished(id: u64, outcome: crate::network::SubmitOutcome) -> NetworkResponse {
        NetworkResponse::Submitted { id, outcome, time_ms: 5 }
    }

    #[test]
    fn test_submit_builds_request_for_selected_backend() {
        let mut state = filled_state();
        state.select_backend(Backend::Python);

        match state.prepare_submission() {
            Some(NetworkCommand::SubmitContact { url, fields, .. }) => {
                assert_eq!(url, "http://localhost:8000/api/contact");
                assert_eq!(fields, state.fields);
            }
            other => panic!("unexpected command {:?}", other),
        }
        assert!(state.is_loading);
        assert_eq!(state.status, STATUS_SENDING);
        assert_eq!(state.status_kind, StatusKind::Pending);
        assert!(state.status_deadline.is_none());
    }

    #[test]
    fn test_submit_while_loading_is_noop() {
        let mut state = filled_state();
        let first = submit(&mut state);

        assert!(state.prepare_submission().is_none());
        assert_eq!(state.pending_request_id, Some(first));
        assert_eq!(state.status, STATUS_SENDING);
    }

    #[test]
    fn test_missing_field_blocks_submission() {
        let mut state = filled_state();
        state.fields.subject.clear();
        state.focused = Field::Name;

        assert!(state.prepare_submission().is_none());
        assert!(!state.is_loading);
        assert_eq!(state.focused, Field::Subject);
        assert_eq!(state.status, "Subject is required.");
        assert_eq!(state.status_kind, StatusKind::Error);
        assert!(state.status_deadline.is_some());
    }

    #[test]
    fn test_success_resets_fields() {
        let mut state = filled_state();
        let id = submit(&mut state);

        state.handle_response(finished(id, Ok(Delivery { status: 200, message: Some("ok".into()) })));

        assert_eq!(state.fields, FormFields::default());
        assert_eq!(state.status, STATUS_SENT);
        assert_eq!(state.status_kind, StatusKind::Success);
        assert!(!state.is_loading);
        assert!(state.pending_request_id.is_none());
    }

    #[test]
    fn test_failures_keep_fields() {
        let cases = [
            (
                SubmitError::Rejected { status: 500, message: Some("server error".into()) },
                "server error",
            ),
            (SubmitError::TimedOut, STATUS_TIMED_OUT),
            (SubmitError::Network { reason: "connection refused".into() }, STATUS_NETWORK_ERROR),
        ];

        for (error, expected) in cases {
            let mut state = filled_state();
            let before = state.fields.clone();
            let id = submit(&mut state);

            state.handle_response(finished(id, Err(error)));

            assert_eq!(state.fields, before);
            assert_eq!(state.status, expected);
            assert_eq!(state.status_kind, StatusKind::Error);
            assert!(!state.is_loading);
        }
    }

    #[test]
    fn test_stale_response_ignored() {
        let mut state = filled_state();
        let id = submit(&mut state);

        state.handle_response(finished(id + 7, Err(SubmitError::TimedOut)));

        assert!(state.is_loading);
        assert_eq!(state.status, STATUS_SENDING);
    }

    #[tokio::test(start_paused = true)]
    async fn test_status_expires_after_ttl() {
        let mut state = filled_state();
        let id = submit(&mut state);
        state.handle_response(finished(id, Err(SubmitError::TimedOut)));

        let ttl = state.config.status_ttl();
        assert!(!state.expire_status(Instant::now() + ttl - Duration::from_millis(1)));
        assert_eq!(state.status, STATUS_TIMED_OUT);

        tokio::time::advance(ttl).await;
        assert!(state.expire_status(Instant::now()));
        assert!(state.status.is_empty());
        assert_eq!(state.status_kind, StatusKind::Idle);

        // Nothing left to expire
        assert!(!state.expire_status(Instant::now()));
    }

    #[test]
    fn test_new_submission_cancels_pending_clear() {
        let mut state = filled_state();
        let id = submit(&mut state);
        state.handle_response(finished(id, Err(SubmitError::TimedOut)));
        assert!(state.status_deadline.is_some());

        submit(&mut state);
        assert!(state.status_deadline.is_none());
        assert!(!state.expire_status(Instant::now() + Duration::from_secs(3600)));
        assert_eq!(state.status, STATUS_SENDING);
    }

    #[test]
    fn test_utf8_editing() {
        let mut state = AppState::default();
        state.start_editing();
        for c in "né".chars() {
            state.enter_char(c);
        }
        state.move_cursor_left();
        state.enter_char('a');
        assert_eq!(state.fields.name, "naé");

        state.move_cursor_right();
        state.delete_char();
        assert_eq!(state.fields.name, "na");
    }

    #[test]
    fn test_newline_only_in_message() {
        let mut state = AppState::default();
        state.start_editing();
        state.enter_newline();
        assert!(state.fields.name.is_empty());

        state.focused = Field::Message;
        state.start_editing();
        state.enter_char('a');
        state.enter_newline();
        state.enter_char('b');
        assert_eq!(state.fields.message, "a\nb");
    }

    #[test]
    fn test_toggle_backend() {
        let mut state = AppState::default();
        assert_eq!(state.backend, Backend::Node);
        state.toggle_backend();
        assert_eq!(state.backend, Backend::Python);
        assert_eq!(state.endpoint(), "http://localhost:8000/api/contact");
        state.toggle_backend();
        assert_eq!(state.backend, Backend::Node);
    }
}
