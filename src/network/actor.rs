//! Network actor - runs contact submissions in the Tokio async runtime

use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinSet;

use crate::messages::{NetworkCommand, NetworkResponse};
use crate::network::client::{create_client, execute_submission};

/// Network actor that processes submission commands
pub struct NetworkActor {
    client: reqwest::Client,
    request_timeout: Duration,
    response_tx: mpsc::UnboundedSender<NetworkResponse>,
    active_requests: JoinSet<()>,
}

impl NetworkActor {
    pub fn new(response_tx: mpsc::UnboundedSender<NetworkResponse>, request_timeout: Duration) -> Self {
        NetworkActor {
            client: create_client(),
            request_timeout,
            response_tx,
            active_requests: JoinSet::new(),
        }
    }

    /// Run the network actor message loop.
    ///
    /// Returning drops the `JoinSet`, which aborts anything still in flight.
    pub async fn run(mut self, mut cmd_rx: mpsc::UnboundedReceiver<NetworkCommand>) {
        loop {
            tokio::select! {
                biased;

                cmd = cmd_rx.recv() => {
                    match cmd {
                        Some(NetworkCommand::SubmitContact { id, url, fields }) => {
                            let response_tx = self.response_tx.clone();
                            let client = self.client.clone();
                            let timeout = self.request_timeout;

                            self.active_requests.spawn(async move {
                                tracing::info!(id, url = %url, "Submitting contact form");
                                let result = execute_submission(&client, id, url, fields, timeout).await;
                                if let NetworkResponse::Submitted { outcome, time_ms, .. } = &result {
                                    match outcome {
                                        Ok(delivery) => tracing::info!(id, status = delivery.status, time_ms, "Submission delivered"),
                                        Err(e) => tracing::info!(id, error = %e, time_ms, "Submission failed"),
                                    }
                                }
                                let _ = response_tx.send(result);
                            });
                        }

                        Some(NetworkCommand::Shutdown) => {
                            tracing::debug!(pending = self.active_requests.len(), "Network actor shutting down");
                            break;
                        }

                        None => break,
                    }
                }

                // Reap finished tasks
                Some(_result) = self.active_requests.join_next() => {}
            }
        }
    }
}
