//! Lenient body decoding.
//!
//! A parse failure is not an error here: anything that is not usable JSON
//! is downgraded to a `{"transformedValue": <text>}` envelope. Only a
//! missing or unreadable body degrades to the server-error envelope.

use serde_json::Value;

use crate::fetch::envelope::{server_error_envelope, Envelope};
use crate::fetch::transport::RawResponse;

/// Decode the body of a classified-clean response into an envelope.
pub(crate) async fn decode_body(mut response: RawResponse) -> Envelope {
    let Some(body) = response.take_body() else {
        tracing::debug!(status = response.status(), "response exposes no readable body");
        return server_error_envelope();
    };

    let text = match body.await {
        Ok(text) => text,
        Err(e) => {
            tracing::warn!(error = %e, status = response.status(), "failed to read response body");
            return server_error_envelope();
        }
    };

    // An empty string, bare `null`, `false` or `0` parses but carries
    // nothing useful; those fall through to the text envelope as well.
    let parsed = serde_json::from_str::<Value>(&text).ok().filter(is_usable);
    let (json, is_json) = match parsed {
        Some(value) => (value, true),
        None => (
            serde_json::json!({ "transformedValue": text.as_str() }),
            false,
        ),
    };

    Envelope {
        json,
        is_json,
        ok: response.ok(),
        status: response.status(),
        original_response: Some(response.parts()),
        text,
    }
}

fn is_usable(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
