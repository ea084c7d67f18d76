//! Caller-supplied request options.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Options for a single request.
///
/// All fields have defaults so a bare `RequestOptions::default()` issues a
/// plain GET. Fields the wrapper does not recognize are kept in `extra` and
/// handed to the transport unmodified.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RequestOptions {
    /// HTTP method; GET when absent.
    pub method: Option<String>,

    /// Request headers.
    pub headers: HashMap<String, String>,

    /// Request body.
    pub body: Option<String>,

    /// Deadline for the whole call in milliseconds; 30000 when absent.
    pub timeout_ms: Option<u64>,

    /// Transport-specific pass-through fields.
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

impl RequestOptions {
    /// Options for a GET request.
    pub fn get() -> Self {
        Self::default()
    }

    /// Options for a POST request with the given body.
    pub fn post(body: impl Into<String>) -> Self {
        Self {
            method: Some("POST".to_string()),
            body: Some(body.into()),
            ..Self::default()
        }
    }

    /// Set the call deadline in milliseconds.
    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = Some(timeout_ms);
        self
    }

    /// Add a request header.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }
}
