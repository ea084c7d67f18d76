//! Resilient HTTP fetch wrapper with pluggable key/value storage.
//!
//! Every request settles with exactly one normalized [`Envelope`] — network
//! failures, timeouts, untrusted server responses and unparseable bodies
//! all become data instead of errors.
//!
//! ```no_run
//! use resilient_fetch::{request, RequestOptions};
//!
//! # async fn run() {
//! let envelope = request(
//!     "https://example.com/users",
//!     RequestOptions::post("{\"name\":\"Jack\"}")
//!         .with_header("Content-Type", "application/json")
//!         .with_timeout_ms(40_000),
//! )
//! .await;
//!
//! if envelope.is_json {
//!     println!("decoded: {}", envelope.json);
//! }
//! # }
//! ```

pub mod config;
pub mod fetch;
pub mod observability;
pub mod storage;

pub use config::{load_config, ClientConfig, ConfigError};
pub use fetch::{
    default_transport, request, server_error_envelope, Envelope, FetchClient, RawResponse,
    ReqwestTransport, RequestOptions, ResponseParts, ServerErrorPolicy, StatusPolicy, Transport,
    TransportError, DEFAULT_TIMEOUT,
};
pub use storage::{
    can_use_storage, FileBackend, MemoryBackend, Storage, StorageBackend, StorageError,
    StorageKind, StorageRegistry,
};
