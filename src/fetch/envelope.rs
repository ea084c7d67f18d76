//! The normalized result type delivered for every request.

use std::sync::OnceLock;

use serde::Serialize;
use serde_json::Value;

/// Status reported by the server-error envelope.
pub const SERVER_ERROR_STATUS: u16 = 503;

/// Metadata of the transport response a successful decode came from.
///
/// The body is consumed during decoding, so only the readable parts are
/// carried on the envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ResponseParts {
    /// Whether the status was in the 2xx range.
    pub ok: bool,
    /// HTTP status code.
    pub status: u16,
}

/// The single result type a request settles with.
///
/// A request never fails; connectivity problems, timeouts and untrusted
/// responses all surface as the server-error envelope. Callers branch on
/// `ok` / `status` / `is_json` instead of handling errors.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Envelope {
    /// Decoded JSON body, or `{"transformedValue": <text>}` when the body
    /// was not usable JSON. `Null` on the server-error envelope.
    pub json: Value,
    /// Raw body text.
    pub text: String,
    /// Whether `json` holds a real decoded body.
    pub is_json: bool,
    /// Whether the server reported success.
    pub ok: bool,
    /// HTTP status code, or the 503 sentinel when no response was usable.
    pub status: u16,
    /// Metadata of the original response, absent on the server-error path.
    pub original_response: Option<ResponseParts>,
}

impl Envelope {
    /// Whether this is the shared "no trustworthy response" value.
    pub fn is_server_error_envelope(&self) -> bool {
        self == server_error()
    }
}

static SERVER_ERROR: OnceLock<Envelope> = OnceLock::new();

fn server_error() -> &'static Envelope {
    SERVER_ERROR.get_or_init(|| Envelope {
        json: Value::Null,
        text: String::new(),
        is_json: false,
        ok: false,
        status: SERVER_ERROR_STATUS,
        original_response: None,
    })
}

/// The fixed envelope used whenever no trustworthy response is available.
///
/// Shared process-wide and never mutated; each settlement clones it.
pub fn server_error_envelope() -> Envelope {
    server_error().clone()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_error_envelope_is_stable() {
        let a = server_error_envelope();
        let b = server_error_envelope();

        assert_eq!(a, b);
        assert!(!a.ok);
        assert_eq!(a.status, SERVER_ERROR_STATUS);
        assert_eq!(a.json, Value::Null);
        assert!(a.text.is_empty());
        assert!(!a.is_json);
        assert!(a.original_response.is_none());
    }

    #[test]
    fn recognizes_itself() {
        assert!(server_error_envelope().is_server_error_envelope());

        let decoded = Envelope {
            json: serde_json::json!({"a": 1}),
            text: "{\"a\":1}".to_string(),
            is_json: true,
            ok: true,
            status: 200,
            original_response: Some(ResponseParts { ok: true, status: 200 }),
        };
        assert!(!decoded.is_server_error_envelope());
    }
}
