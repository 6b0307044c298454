//! HTTP client wrapper - posts the contact form and classifies the reply

use std::time::{Duration, Instant};

use reqwest::header::CONTENT_TYPE;
use serde_json::{json, Value};
use thiserror::Error;

use crate::constants::{STATUS_NETWORK_ERROR, STATUS_TIMED_OUT, UNEXPECTED_RESPONSE};
use crate::messages::NetworkResponse;
use crate::models::FormFields;

/// A submission the server accepted (2xx)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delivery {
    pub status: u16,
    pub message: Option<String>,
}

/// Every way a submission can fail
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error("no response before the deadline")]
    TimedOut,

    #[error("transport failure: {reason}")]
    Network { reason: String },

    #[error("server answered HTTP {status}")]
    Rejected { status: u16, message: Option<String> },
}

impl SubmitError {
    /// Line shown to the user for this failure
    pub fn status_message(&self) -> String {
        match self {
            SubmitError::TimedOut => STATUS_TIMED_OUT.to_string(),
            SubmitError::Network { .. } => STATUS_NETWORK_ERROR.to_string(),
            SubmitError::Rejected { status, message } => message
                .clone()
                .unwrap_or_else(|| format!("Failed to send (HTTP {}). Please try again.", status)),
        }
    }
}

pub type SubmitOutcome = Result<Delivery, SubmitError>;

/// POST the form to `url`, giving up after `timeout`.
///
/// The timeout covers connecting, sending and reading the body. On expiry
/// the in-flight request future is dropped, which aborts the connection.
pub async fn submit_contact(
    client: &reqwest::Client,
    url: &str,
    fields: &FormFields,
    timeout: Duration,
) -> SubmitOutcome {
    match tokio::time::timeout(timeout, send_and_read(client, url, fields)).await {
        Ok(outcome) => outcome,
        Err(_) => {
            tracing::warn!(url, timeout_ms = timeout.as_millis() as u64, "Submission timed out");
            Err(SubmitError::TimedOut)
        }
    }
}

async fn send_and_read(client: &reqwest::Client, url: &str, fields: &FormFields) -> SubmitOutcome {
    let resp = client.post(url).json(fields).send().await.map_err(|e| {
        tracing::warn!(url, error = %e, "Submission failed before a response arrived");
        if e.is_timeout() {
            SubmitError::TimedOut
        } else {
            SubmitError::Network { reason: e.to_string() }
        }
    })?;

    let status = resp.status();
    let content_type = resp
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();

    let payload = match resp.text().await {
        Ok(body) => interpret_body(&content_type, &body),
        Err(e) => {
            tracing::warn!(url, error = %e, "Failed to read response body");
            fallback_payload()
        }
    };
    tracing::debug!(url, status = status.as_u16(), payload = %payload, "Response payload");

    let message = server_message(&payload);
    if status.is_success() {
        Ok(Delivery {
            status: status.as_u16(),
            message,
        })
    } else {
        Err(SubmitError::Rejected {
            status: status.as_u16(),
            message,
        })
    }
}

/// Turn a raw body into a JSON payload based on its declared content type.
///
/// Non-JSON bodies become `{"message": <text>}`. A JSON body that fails to
/// parse becomes the generic unexpected-response payload.
pub fn interpret_body(content_type: &str, body: &str) -> Value {
    if content_type.to_ascii_lowercase().contains("application/json") {
        serde_json::from_str(body).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Failed to parse JSON response body");
            fallback_payload()
        })
    } else {
        json!({ "message": body })
    }
}

fn fallback_payload() -> Value {
    json!({ "message": UNEXPECTED_RESPONSE })
}

/// Human-readable message carried by a payload, if any.
///
/// Looks at `message`, then FastAPI's `detail.message` and string `detail`.
/// Empty strings count as absent.
pub fn server_message(payload: &Value) -> Option<String> {
    let candidates = [
        payload.get("message"),
        payload.get("detail").and_then(|d| d.get("message")),
        payload.get("detail"),
    ];

    candidates
        .into_iter()
        .flatten()
        .filter_map(Value::as_str)
        .find(|s| !s.is_empty())
        .map(str::to_string)
}

/// Run one submission and package the result for the App layer
pub async fn execute_submission(
    client: &reqwest::Client,
    id: u64,
    url: String,
    fields: FormFields,
    timeout: Duration,
) -> NetworkResponse {
    let start = Instant::now();
    let outcome = submit_contact(client, &url, &fields, timeout).await;
    NetworkResponse::Submitted {
        id,
        outcome,
        time_ms: start.elapsed().as_millis() as u64,
    }
}

/// Create an HTTP client with default configuration
pub fn create_client() -> reqwest::Client {
    reqwest::Client::builder()
        .user_agent(concat!("contact-tui/", env!("CARGO_PKG_VERSION")))
        .build()
        .unwrap_or_else(|_| reqwest::Client::new())
}
