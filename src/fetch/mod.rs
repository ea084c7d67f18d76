//! Resilient fetch subsystem.
//!
//! # Data Flow
//! ```text
//! request(url, options)
//!     → client.rs (start deadline timer, spawn transport pipeline)
//!     → transport.rs (dispatch over the injected transport)
//!     → classify.rs (server-error policy check)
//!     → decode.rs (read body text, lenient JSON decode)
//!     → envelope.rs (single normalized Envelope delivered)
//! ```
//!
//! # Design Decisions
//! - Every failure path settles with the shared server-error envelope
//! - First outcome wins; late outcomes are dropped, never redelivered
//! - A timed-out transport call is abandoned, not aborted

pub mod classify;
pub mod client;
pub mod decode;
pub mod envelope;
pub mod options;
pub mod transport;

pub use classify::{ServerErrorPolicy, StatusPolicy};
pub use client::{request, FetchClient, DEFAULT_TIMEOUT};
pub use envelope::{server_error_envelope, Envelope, ResponseParts};
pub use options::RequestOptions;
pub use transport::{default_transport, RawResponse, ReqwestTransport, Transport, TransportError};
