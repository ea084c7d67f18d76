//! Transport seam: the primitive performing the actual network call.
//!
//! # Responsibilities
//! - Define the injectable `Transport` trait and its `RawResponse` output
//! - Provide the reqwest-backed production transport
//! - Select a usable transport for the current platform at startup
//!
//! # Design Decisions
//! - No per-request timeout on the underlying client; the wrapper owns the
//!   deadline and abandons late responses
//! - Body text is a one-shot read, separable from the response metadata
//! - When no HTTP client can be built, a stub transport makes every call
//!   settle as a server error instead of panicking

use std::sync::Arc;

use async_trait::async_trait;
use futures_util::future::BoxFuture;

use crate::fetch::envelope::ResponseParts;
use crate::fetch::options::RequestOptions;

/// User agent reported by the built-in transport.
pub const DEFAULT_USER_AGENT: &str = concat!("resilient-fetch/", env!("CARGO_PKG_VERSION"));

/// Error type for transport operations.
///
/// These never reach callers of `request`; the wrapper absorbs them into
/// the server-error envelope.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("invalid url '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("invalid method '{0}'")]
    InvalidMethod(String),

    #[error("connection error: {0}")]
    Connect(String),

    #[error("body read error: {0}")]
    BodyRead(String),

    #[error("no usable http client on this platform")]
    Unavailable,
}

/// One-shot body text read.
pub type TextBody = BoxFuture<'static, Result<String, TransportError>>;

/// Raw response produced by a transport.
///
/// Exposes the status metadata plus an optional one-shot body read. A
/// response without a body makes the call degrade to the server-error
/// envelope.
pub struct RawResponse {
    parts: ResponseParts,
    body: Option<TextBody>,
}

impl RawResponse {
    /// Build a response with a readable body.
    pub fn new(status: u16, body: TextBody) -> Self {
        Self {
            parts: ResponseParts {
                ok: (200..300).contains(&status),
                status,
            },
            body: Some(body),
        }
    }

    /// Build a response that exposes no way to read its body.
    pub fn without_body(status: u16) -> Self {
        Self {
            parts: ResponseParts {
                ok: (200..300).contains(&status),
                status,
            },
            body: None,
        }
    }

    /// Whether the status was in the 2xx range.
    pub fn ok(&self) -> bool {
        self.parts.ok
    }

    /// HTTP status code.
    pub fn status(&self) -> u16 {
        self.parts.status
    }

    /// Copyable metadata, attachable to an envelope after the body is gone.
    pub fn parts(&self) -> ResponseParts {
        self.parts
    }

    /// Whether the body can still be read.
    pub fn has_body(&self) -> bool {
        self.body.is_some()
    }

    /// Take the one-shot body read out of the response.
    pub fn take_body(&mut self) -> Option<TextBody> {
        self.body.take()
    }
}

impl std::fmt::Debug for RawResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RawResponse")
            .field("status", &self.parts.status)
            .field("ok", &self.parts.ok)
            .field("has_body", &self.body.is_some())
            .finish()
    }
}

/// The injectable network primitive: `(url, options) -> RawResponse`.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, url: &str, options: &RequestOptions) -> Result<RawResponse, TransportError>;
}

/// Production transport backed by a pooled reqwest client.
#[derive(Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Build with the default pooled client configuration.
    pub fn new() -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .user_agent(DEFAULT_USER_AGENT)
            .build()
            .map_err(|e| TransportError::Connect(e.to_string()))?;
        Ok(Self { client })
    }

    /// Wrap an already-configured client.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, url: &str, options: &RequestOptions) -> Result<RawResponse, TransportError> {
        let parsed: url::Url = url.parse().map_err(|e: url::ParseError| TransportError::InvalidUrl {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

        let method_name = options.method.as_deref().unwrap_or("GET");
        let method = reqwest::Method::from_bytes(method_name.to_ascii_uppercase().as_bytes())
            .map_err(|_| TransportError::InvalidMethod(method_name.to_string()))?;

        let mut builder = self.client.request(method, parsed);
        for (name, value) in &options.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = &options.body {
            builder = builder.body(body.clone());
        }

        let response = builder
            .send()
            .await
            .map_err(|e| TransportError::Connect(e.to_string()))?;

        let status = response.status().as_u16();
        let body: TextBody = Box::pin(async move {
            response
                .text()
                .await
                .map_err(|e| TransportError::BodyRead(e.to_string()))
        });

        Ok(RawResponse::new(status, body))
    }
}

/// Stub transport used when no HTTP client could be constructed.
struct UnavailableTransport;

#[async_trait]
impl Transport for UnavailableTransport {
    async fn send(&self, _url: &str, _options: &RequestOptions) -> Result<RawResponse, TransportError> {
        Err(TransportError::Unavailable)
    }
}

/// Pick a transport for the current platform.
///
/// Probes whether the fully-configured client can be built (TLS backend,
/// system proxy settings); falls back to a minimal client, and finally to a
/// stub that fails every send, so construction itself never panics.
pub fn default_transport() -> Arc<dyn Transport> {
    match ReqwestTransport::new() {
        Ok(transport) => {
            tracing::debug!("using pooled reqwest transport");
            Arc::new(transport)
        }
        Err(e) => match reqwest::Client::builder().no_proxy().build() {
            Ok(client) => {
                tracing::warn!(error = %e, "default client rejected, using minimal http client");
                Arc::new(ReqwestTransport::with_client(client))
            }
            Err(e) => {
                tracing::warn!(error = %e, "no usable http client; requests will settle as server errors");
                Arc::new(UnavailableTransport)
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_classes() {
        let ok = RawResponse::without_body(204);
        assert!(ok.ok());
        assert_eq!(ok.status(), 204);

        let redirect = RawResponse::without_body(301);
        assert!(!redirect.ok());

        let client_error = RawResponse::without_body(404);
        assert!(!client_error.ok());
    }

    #[tokio::test]
    async fn body_is_one_shot() {
        let mut response = RawResponse::new(200, Box::pin(async { Ok("hello".to_string()) }));
        assert!(response.has_body());

        let body = response.take_body().expect("first take");
        assert_eq!(body.await.unwrap(), "hello");

        assert!(!response.has_body());
        assert!(response.take_body().is_none());
        // Metadata survives the body read.
        assert_eq!(response.parts(), ResponseParts { ok: true, status: 200 });
    }

    #[tokio::test]
    async fn invalid_url_is_rejected_before_dispatch() {
        let transport = ReqwestTransport::new().unwrap();
        let err = transport
            .send("not a url", &RequestOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, TransportError::InvalidUrl { .. }));
    }
}
