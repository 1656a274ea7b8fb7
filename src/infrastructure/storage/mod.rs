//! Key-value storage adapters

mod file_store;
mod memory;

pub use file_store::FileStore;
pub use memory::MemoryStore;
