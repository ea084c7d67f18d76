//! Pluggable key/value storage subsystem.
//!
//! # Data Flow
//! ```text
//! Storage::set_value / get_value / remove_value
//!     → registry.rs (resolve kind name → backend)
//!     → backend.rs trait object
//!         → memory.rs (session + expiring, in-process)
//!         → file.rs (persistent, JSON on disk)
//! ```
//!
//! # Design Decisions
//! - Values are JSON; they are stringified on write and parsed on read
//! - Custom backends register under their own kind name; re-registering a
//!   known kind logs a warning and wins
//! - Expiry is a per-entry epoch timestamp; only expiry-aware backends
//!   honor it, the rest ignore it

pub mod backend;
pub mod file;
pub mod memory;
pub mod registry;
pub mod store;

pub use backend::{StorageBackend, StorageError, StorageKind};
pub use file::FileBackend;
pub use memory::MemoryBackend;
pub use registry::StorageRegistry;
pub use store::{can_use_storage, Storage};
