//! Drives the App and Network actors together against a mock backend.

use std::time::Duration;

use contact_tui::config::BackendUrls;
use contact_tui::{
    AppActor, AppState, Backend, Config, FormFields, NetworkActor, RenderState, StatusKind, UiEvent,
};
use httpmock::prelude::*;
use serde_json::json;
use tokio::sync::mpsc;

const STATUS_TTL_MS: u64 = 300;

struct Harness {
    ui_tx: mpsc::UnboundedSender<UiEvent>,
    render_rx: mpsc::UnboundedReceiver<RenderState>,
}

impl Harness {
    fn start(config: Config) -> Self {
        let (ui_tx, ui_rx) = mpsc::unbounded_channel();
        let (net_cmd_tx, net_cmd_rx) = mpsc::unbounded_channel();
        let (net_resp_tx, net_resp_rx) = mpsc::unbounded_channel();
        let (render_tx, render_rx) = mpsc::unbounded_channel();

        tokio::spawn(NetworkActor::new(net_resp_tx, config.request_timeout()).run(net_cmd_rx));
        tokio::spawn(AppActor::new(AppState::new(config), net_cmd_tx, render_tx).run(ui_rx, net_resp_rx));

        Harness { ui_tx, render_rx }
    }

    fn send(&self, event: UiEvent) {
        self.ui_tx.send(event).unwrap();
    }

    /// Focus each field in turn and type its value
    fn fill(&self, fields: &FormFields) {
        for value in [&fields.name, &fields.email, &fields.subject, &fields.message] {
            self.send(UiEvent::StartEditing);
            for c in value.chars() {
                self.send(UiEvent::CharInput(c));
            }
            self.send(UiEvent::NextField);
        }
        self.send(UiEvent::StopEditing);
    }

    /// Next render state matching `pred`, failing after a few seconds
    async fn wait_for(&mut self, pred: impl Fn(&RenderState) -> bool) -> RenderState {
        let fut = async {
            loop {
                let state = self.render_rx.recv().await.expect("app actor stopped");
                if pred(&state) {
                    return state;
                }
            }
        };
        tokio::time::timeout(Duration::from_secs(5), fut)
            .await
            .expect("render state never matched")
    }

    /// Collect every status string seen until the status goes idle again
    async fn status_trail(&mut self) -> Vec<String> {
        let mut trail: Vec<String> = Vec::new();
        let fut = async {
            loop {
                let state = self.render_rx.recv().await.expect("app actor stopped");
                if trail.last() != Some(&state.status) {
                    trail.push(state.status.clone());
                }
                if state.status.is_empty() && trail.len() > 1 {
                    return;
                }
            }
        };
        tokio::time::timeout(Duration::from_secs(5), fut)
            .await
            .expect("status never returned to idle");
        trail
    }
}

fn config_for(server: &MockServer, timeout_ms: u64) -> Config {
    Config {
        backends: BackendUrls {
            node: server.base_url(),
            python: server.base_url(),
        },
        request_timeout_ms: timeout_ms,
        status_ttl_ms: STATUS_TTL_MS,
    }
}

fn sample_fields() -> FormFields {
    FormFields {
        name: "Ada".into(),
        email: "ada@example.com".into(),
        subject: "Hello".into(),
        message: "Line one\nLine two".into(),
    }
}

#[tokio::test]
async fn test_successful_submission_cycle() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/api/contact").json_body(json!({
                "name": "Ada",
                "email": "ada@example.com",
                "subject": "Hello",
                "message": "Line one\nLine two"
            }));
            then.status(200)
                .header("content-type", "application/json")
                .json_body(json!({ "message": "ok" }));
        })
        .await;

    let mut harness = Harness::start(config_for(&server, 2_000));
    harness.fill(&sample_fields());
    harness.wait_for(|s| s.fields == sample_fields()).await;

    harness.send(UiEvent::Submit);
    let trail = harness.status_trail().await;

    assert_eq!(
        trail,
        vec![
            String::new(),
            "Sending...".to_string(),
            "Message sent! We'll reply within 24 hours.".to_string(),
            String::new(),
        ]
    );
    mock.assert_hits_async(1).await;
}

#[tokio::test]
async fn test_success_clears_form_and_loading() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/api/contact");
            then.status(200).json_body(json!({ "message": "ok" }));
        })
        .await;

    let mut harness = Harness::start(config_for(&server, 2_000));
    harness.fill(&sample_fields());
    harness.send(UiEvent::Submit);

    let done = harness.wait_for(|s| s.status_kind == StatusKind::Success).await;
    assert_eq!(done.fields, FormFields::default());
    assert!(!done.is_loading);
}

#[tokio::test]
async fn test_server_error_keeps_fields() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/api/contact");
            then.status(500)
                .header("content-type", "application/json")
                .json_body(json!({ "message": "server error" }));
        })
        .await;

    let mut harness = Harness::start(config_for(&server, 2_000));
    harness.fill(&sample_fields());
    harness.send(UiEvent::Submit);

    let failed = harness.wait_for(|s| s.status_kind == StatusKind::Error).await;
    assert_eq!(failed.status, "server error");
    assert_eq!(failed.fields, sample_fields());
    assert!(!failed.is_loading);

    let cleared = harness.wait_for(|s| s.status.is_empty()).await;
    assert_eq!(cleared.status_kind, StatusKind::Idle);
    assert_eq!(cleared.fields, sample_fields());
}

#[tokio::test]
async fn test_timeout_keeps_fields() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/api/contact");
            then.status(200).delay(Duration::from_secs(3));
        })
        .await;

    let mut harness = Harness::start(config_for(&server, 200));
    harness.fill(&sample_fields());
    harness.send(UiEvent::Submit);

    let failed = harness.wait_for(|s| s.status_kind == StatusKind::Error).await;
    assert_eq!(failed.status, "Request timed out. Please try again.");
    assert_eq!(failed.fields, sample_fields());
}

#[tokio::test]
async fn test_double_submit_sends_once() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/api/contact");
            then.status(200).delay(Duration::from_millis(300));
        })
        .await;

    let mut harness = Harness::start(config_for(&server, 2_000));
    harness.fill(&sample_fields());
    harness.send(UiEvent::Submit);
    harness.send(UiEvent::Submit);
    harness.send(UiEvent::Submit);

    harness.wait_for(|s| s.status_kind == StatusKind::Success).await;
    mock.assert_hits_async(1).await;
}

#[tokio::test]
async fn test_missing_field_sends_nothing() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/api/contact");
            then.status(200);
        })
        .await;

    let mut harness = Harness::start(config_for(&server, 2_000));
    let mut fields = sample_fields();
    fields.email.clear();
    harness.fill(&fields);
    harness.send(UiEvent::Submit);

    let state = harness.wait_for(|s| s.status_kind == StatusKind::Error).await;
    assert_eq!(state.status, "Email Address is required.");
    assert!(!state.is_loading);
    harness.wait_for(|s| s.status.is_empty()).await;
    mock.assert_hits_async(0).await;
}

#[tokio::test]
async fn test_backend_toggle_changes_target() {
    let node = MockServer::start_async().await;
    let python = MockServer::start_async().await;
    let node_mock = node
        .mock_async(|when, then| {
            when.method(POST).path("/api/contact");
            then.status(200);
        })
        .await;
    let python_mock = python
        .mock_async(|when, then| {
            when.method(POST).path("/api/contact");
            then.status(200);
        })
        .await;

    let config = Config {
        backends: BackendUrls {
            node: node.base_url(),
            python: python.base_url(),
        },
        request_timeout_ms: 2_000,
        status_ttl_ms: STATUS_TTL_MS,
    };
    let mut harness = Harness::start(config);
    harness.fill(&sample_fields());
    harness.send(UiEvent::ToggleBackend);

    let state = harness.wait_for(|s| s.backend == Backend::Python).await;
    assert_eq!(state.endpoint, format!("{}/api/contact", python.base_url()));

    harness.send(UiEvent::Submit);
    harness.wait_for(|s| s.status_kind == StatusKind::Success).await;

    python_mock.assert_hits_async(1).await;
    node_mock.assert_hits_async(0).await;
}
