//! The resilient request wrapper.
//!
//! # Responsibilities
//! - Race a one-shot deadline timer against the transport pipeline
//! - Settle every call with exactly one envelope, never an error
//! - Drop outcomes that arrive after settlement
//!
//! # Design Decisions
//! - The transport pipeline runs as an independent task; a timeout abandons
//!   it instead of aborting the in-flight connection
//! - Settlement goes through a single-assignment channel, so a late result
//!   cannot be delivered twice
//! - The deadline timer is dropped as soon as the call settles

use std::sync::{Arc, OnceLock};
use std::time::Duration;

use tokio::sync::oneshot;
use uuid::Uuid;

use crate::config::schema::ClientConfig;
use crate::fetch::classify::{ServerErrorPolicy, StatusPolicy};
use crate::fetch::decode::decode_body;
use crate::fetch::envelope::{server_error_envelope, Envelope};
use crate::fetch::options::RequestOptions;
use crate::fetch::transport::{default_transport, Transport};
use crate::observability::metrics;

/// Deadline applied when the caller does not supply one.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(30_000);

/// Client issuing requests that always settle with an [`Envelope`].
#[derive(Clone)]
pub struct FetchClient {
    transport: Arc<dyn Transport>,
    policy: Arc<dyn ServerErrorPolicy>,
    default_timeout: Duration,
}

impl FetchClient {
    /// Create a client with the platform-selected transport and the
    /// default 5xx classification policy.
    pub fn new() -> Self {
        Self::with_transport(default_transport())
    }

    /// Create a client over an injected transport.
    pub fn with_transport(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            policy: Arc::new(StatusPolicy),
            default_timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Replace the server-error classification policy.
    pub fn with_policy(mut self, policy: Arc<dyn ServerErrorPolicy>) -> Self {
        self.policy = policy;
        self
    }

    /// Replace the default deadline.
    pub fn with_default_timeout(mut self, timeout: Duration) -> Self {
        self.default_timeout = timeout;
        self
    }

    /// Build a client from application configuration.
    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new().with_default_timeout(Duration::from_millis(config.timeout_ms))
    }

    /// Issue a request. Always resolves to exactly one envelope; timeouts,
    /// connectivity failures and untrusted responses settle with the
    /// server-error envelope instead of an error.
    pub async fn request(&self, url: &str, options: RequestOptions) -> Envelope {
        let call_id = Uuid::new_v4();
        let deadline = options
            .timeout_ms
            .map(Duration::from_millis)
            .unwrap_or(self.default_timeout);

        // The pipeline task owns the transport call and keeps running even
        // if the deadline fires first; its late result lands in a closed
        // channel and is dropped.
        let (settled_tx, settled_rx) = oneshot::channel();
        let transport = Arc::clone(&self.transport);
        let policy = Arc::clone(&self.policy);
        let target = url.to_string();
        tokio::spawn(async move {
            let envelope = resolve(transport, policy, &target, &options, call_id).await;
            let _ = settled_tx.send(envelope);
        });

        tokio::select! {
            _ = tokio::time::sleep(deadline) => {
                tracing::warn!(
                    call_id = %call_id,
                    url = %url,
                    timeout_ms = deadline.as_millis() as u64,
                    "request deadline expired, abandoning in-flight transport call"
                );
                metrics::record_fetch_outcome("timeout");
                server_error_envelope()
            }
            settled = settled_rx => {
                let envelope = settled.unwrap_or_else(|_| server_error_envelope());
                metrics::record_fetch_outcome(outcome_label(&envelope));
                envelope
            }
        }
    }
}

impl Default for FetchClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Run the transport pipeline to a terminal envelope.
async fn resolve(
    transport: Arc<dyn Transport>,
    policy: Arc<dyn ServerErrorPolicy>,
    url: &str,
    options: &RequestOptions,
    call_id: Uuid,
) -> Envelope {
    let response = match transport.send(url, options).await {
        Ok(response) => response,
        Err(e) => {
            tracing::warn!(call_id = %call_id, url = %url, error = %e, "transport failure");
            return server_error_envelope();
        }
    };

    if policy.is_server_error(&response) {
        // The response is untrustworthy; it is dropped here rather than
        // attached to the envelope.
        tracing::debug!(
            call_id = %call_id,
            status = response.status(),
            "response classified as server error"
        );
        return server_error_envelope();
    }

    decode_body(response).await
}

fn outcome_label(envelope: &Envelope) -> &'static str {
    if envelope.is_server_error_envelope() {
        "degraded"
    } else if envelope.is_json {
        "json"
    } else {
        "text"
    }
}

static DEFAULT_CLIENT: OnceLock<FetchClient> = OnceLock::new();

/// Issue a request through the shared process-default client.
pub async fn request(url: &str, options: RequestOptions) -> Envelope {
    DEFAULT_CLIENT
        .get_or_init(FetchClient::new)
        .request(url, options)
        .await
}
