//! # Local Record Store
//!
//! Bounded, newest-first record lists persisted as JSON arrays on a
//! [`StorageMedium`].
//!
//! ## Guarantees
//!
//! - A key that was never written reads as an empty list
//! - A value that is not a JSON array reads as an empty list; entries that do
//!   not match the record type are dropped individually
//! - After any write, the stored list holds at most `capacity` entries; the
//!   newest (front) entries are kept
//! - `prepend` is one critical section, so concurrent submissions never lose
//!   each other's records
//! - Medium failures never reach the caller; writes report success as `bool`

use std::sync::{Arc, Mutex, MutexGuard};

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use super::keys::{RecordListKey, ValueKey};
use super::traits::StorageMedium;

#[derive(Clone)]
pub struct LocalRecordStore {
    medium: Arc<dyn StorageMedium>,
    write_lock: Arc<Mutex<()>>,
}

impl LocalRecordStore {
    pub fn new(medium: Arc<dyn StorageMedium>) -> Self {
        Self {
            medium,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Read the list stored at `key`, newest first
    pub fn load<T: DeserializeOwned>(&self, key: &RecordListKey) -> Vec<T> {
        let raw = match self.medium.get_item(key.name()) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                warn!(key = key.name(), error = %e, "storage read failed, treating list as empty");
                return Vec::new();
            }
        };

        let entries = match serde_json::from_str::<Value>(&raw) {
            Ok(Value::Array(entries)) => entries,
            Ok(_) => {
                warn!(key = key.name(), "stored value is not a list, treating as empty");
                return Vec::new();
            }
            Err(e) => {
                warn!(key = key.name(), error = %e, "stored list is malformed, treating as empty");
                return Vec::new();
            }
        };

        let total = entries.len();
        let mut records: Vec<T> = entries
            .into_iter()
            .filter_map(|entry| serde_json::from_value(entry).ok())
            .collect();

        if records.len() < total {
            warn!(
                key = key.name(),
                dropped = total - records.len(),
                "dropped stored entries that do not match the record schema"
            );
        }

        records.truncate(key.capacity());
        records
    }

    /// Replace the list at `key` with the first `capacity` entries of `records`
    pub fn save<T: Serialize>(&self, key: &RecordListKey, records: &[T]) -> bool {
        let _guard = self.lock();
        self.write_list(key, records)
    }

    /// Insert `record` at the front of the list at `key`, dropping the oldest
    /// entries beyond capacity
    pub fn prepend<T: Serialize + DeserializeOwned>(&self, key: &RecordListKey, record: T) -> bool {
        let _guard = self.lock();
        let mut records: Vec<T> = self.load(key);
        records.insert(0, record);
        self.write_list(key, &records)
    }

    /// Remove the list at `key` entirely
    pub fn clear(&self, key: &RecordListKey) -> bool {
        let _guard = self.lock();
        match self.medium.remove_item(key.name()) {
            Ok(()) => {
                debug!(key = key.name(), "cleared record list");
                true
            }
            Err(e) => {
                warn!(key = key.name(), error = %e, "failed to clear record list");
                false
            }
        }
    }

    /// Read a single value, `None` when absent, unreadable or malformed
    pub fn load_value<T: DeserializeOwned>(&self, key: &ValueKey) -> Option<T> {
        match self.medium.get_item(key.name()) {
            Ok(Some(raw)) => match serde_json::from_str(&raw) {
                Ok(value) => Some(value),
                Err(e) => {
                    warn!(key = key.name(), error = %e, "stored value is malformed, ignoring");
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                warn!(key = key.name(), error = %e, "storage read failed");
                None
            }
        }
    }

    pub fn save_value<T: Serialize>(&self, key: &ValueKey, value: &T) -> bool {
        let _guard = self.lock();
        self.write_value(key, value)
    }

    /// Read-modify-write of a single value under the store lock.
    ///
    /// A missing or malformed value starts from `T::default()`. Returns the
    /// updated value and whether it was written.
    pub fn modify_value<T, F>(&self, key: &ValueKey, update: F) -> (T, bool)
    where
        T: Serialize + DeserializeOwned + Default,
        F: FnOnce(&mut T),
    {
        let _guard = self.lock();
        let mut value: T = self.load_value(key).unwrap_or_default();
        update(&mut value);
        let saved = self.write_value(key, &value);
        (value, saved)
    }

    fn write_list<T: Serialize>(&self, key: &RecordListKey, records: &[T]) -> bool {
        let kept = &records[..records.len().min(key.capacity())];
        let serialized = match serde_json::to_string(kept) {
            Ok(serialized) => serialized,
            Err(e) => {
                warn!(key = key.name(), error = %e, "failed to serialize record list");
                return false;
            }
        };

        match self.medium.set_item(key.name(), &serialized) {
            Ok(()) => {
                debug!(key = key.name(), count = kept.len(), "saved record list");
                true
            }
            Err(e) => {
                warn!(key = key.name(), error = %e, "failed to save record list");
                false
            }
        }
    }

    fn write_value<T: Serialize>(&self, key: &ValueKey, value: &T) -> bool {
        let serialized = match serde_json::to_string(value) {
            Ok(serialized) => serialized,
            Err(e) => {
                warn!(key = key.name(), error = %e, "failed to serialize value");
                return false;
            }
        };

        match self.medium.set_item(key.name(), &serialized) {
            Ok(()) => true,
            Err(e) => {
                warn!(key = key.name(), error = %e, "failed to save value");
                false
            }
        }
    }

    fn lock(&self) -> MutexGuard<'_, ()> {
        // The guarded data is `()`, so a poisoned lock carries no broken state
        self.write_lock.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
