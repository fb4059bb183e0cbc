//! Key-value store backends for session persistence.

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;
