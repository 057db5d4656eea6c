//! Key-value store adapters for local state.

mod file_store;
mod memory_store;

pub use file_store::FileKeyValueStore;
pub use memory_store::InMemoryKeyValueStore;
