//! # Storage Traits
//!
//! The storage-medium boundary every persistence component depends on.

use crate::error::StorageError;

/// Synchronous string-keyed key/value medium.
///
/// Mirrors the capabilities of browser local storage: whole values are read,
/// written and removed by key, and any call may fail when the medium is
/// disabled or full. Implementations use interior mutability so a single
/// medium can be shared behind an `Arc`.
pub trait StorageMedium: Send + Sync {
    /// Read the raw value stored at `key`, `None` when absent
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` at `key`, replacing any previous value
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove `key`; removing an absent key succeeds
    fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}
