//! Metrics collection.
//!
//! # Metrics
//! - `fetch_requests_total` (counter): settlements by outcome
//!   (`json`, `text`, `degraded`, `timeout`)
//! - `storage_operations_total` (counter): storage calls by op and kind

use metrics::counter;

/// Record how a request settled.
pub fn record_fetch_outcome(outcome: &'static str) {
    counter!("fetch_requests_total", "outcome" => outcome).increment(1);
}

/// Record a storage operation.
pub fn record_storage_op(op: &'static str, kind: &str) {
    counter!("storage_operations_total", "op" => op, "kind" => kind.to_string()).increment(1);
}
