//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! fetch + storage produce:
//!     → tracing events (structured, with per-call IDs)
//!     → metrics.rs (counters via the metrics facade)
//!
//! Consumers:
//!     → whatever subscriber/recorder the embedding application installs
//! ```
//!
//! # Design Decisions
//! - The library never installs a tracing subscriber or metrics recorder
//! - Counters are cheap no-ops until the application installs a recorder

pub mod metrics;
