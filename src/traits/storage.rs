//! Key-value persistence port.
//!
//! The client persists exactly two values between runs: the bearer token and
//! the serialized current user. Both go through this trait so the session
//! holder never touches the filesystem directly.

use async_trait::async_trait;

/// Storage operation errors.
#[derive(Debug, Clone, PartialEq)]
pub enum StorageError {
    /// Failed to read the backing store
    ReadFailed(String),
    /// Failed to write the backing store
    WriteFailed(String),
    /// Serialization/deserialization error
    Serialization(String),
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageError::ReadFailed(msg) => write!(f, "Failed to read storage: {}", msg),
            StorageError::WriteFailed(msg) => write!(f, "Failed to write storage: {}", msg),
            StorageError::Serialization(msg) => write!(f, "Serialization error: {}", msg),
        }
    }
}

impl std::error::Error for StorageError {}

/// String key-value store.
///
/// # Returns
/// - `get`: `Ok(None)` when the key is absent
/// - `remove`: `Ok(())` even when the key was absent
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    async fn remove(&self, key: &str) -> Result<(), StorageError>;
}
