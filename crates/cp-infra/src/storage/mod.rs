//! Key-value store adapters.
//!
//! - [`FileKeyValueStore`]: one JSON object file holding every key, the durable
//!   store used by the application.
//! - [`InMemoryKeyValueStore`]: process-local map for tests and ephemeral runs.

pub mod file;
pub mod memory;

pub use file::{FileKeyValueStore, DEFAULT_STORE_FILE};
pub use memory::InMemoryKeyValueStore;
