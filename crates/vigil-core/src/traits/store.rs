//! Key-value store trait for pluggable session persistence backends.

use async_trait::async_trait;

use crate::result::AppResult;

/// Trait for string-keyed persistence backends (file-backed or in-memory).
///
/// All values are stored as strings; callers serialize structured data
/// as JSON. Implementations must tolerate concurrent use from a single
/// process.
#[async_trait]
pub trait KeyValueStore: Send + Sync + std::fmt::Debug + 'static {
    /// Get a value by key. Returns `None` if the key does not exist.
    async fn get(&self, key: &str) -> AppResult<Option<String>>;

    /// Set a value, overwriting any existing one.
    async fn set(&self, key: &str, value: &str) -> AppResult<()>;

    /// Remove a key. Removing an absent key is not an error.
    async fn remove(&self, key: &str) -> AppResult<()>;

    /// Remove every key in the store.
    async fn clear(&self) -> AppResult<()>;
}
