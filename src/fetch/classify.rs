//! Server-error classification policy.
//!
//! The classifier decides whether a response is trustworthy enough to
//! decode. A flagged response short-circuits the pipeline to the
//! server-error envelope and its body is never read.

use crate::fetch::transport::RawResponse;

/// Predicate deciding whether a response counts as a server failure.
pub trait ServerErrorPolicy: Send + Sync {
    fn is_server_error(&self, response: &RawResponse) -> bool;
}

impl<F> ServerErrorPolicy for F
where
    F: Fn(&RawResponse) -> bool + Send + Sync,
{
    fn is_server_error(&self, response: &RawResponse) -> bool {
        self(response)
    }
}

/// Default policy: any 5xx status is untrustworthy.
#[derive(Debug, Clone, Copy, Default)]
pub struct StatusPolicy;

impl ServerErrorPolicy for StatusPolicy {
    fn is_server_error(&self, response: &RawResponse) -> bool {
        response.status() >= 500
    }
}
