//! # Storage Module
//!
//! Handles all data persistence for the SDG Explorers backend.
//!
//! Persistence is built on a deliberately small boundary: a synchronous,
//! string-keyed get/set/remove medium ([`StorageMedium`]). Everything above it
//! works on named, capacity-bounded record lists through [`LocalRecordStore`].
//!
//! ## Key Responsibilities
//!
//! - **Medium Abstraction**: the same store runs over memory or JSON files
//! - **Bounded Lists**: newest-first lists capped per key, oldest dropped
//! - **Fail Open**: absent or malformed data reads as empty, failed writes
//!   report `false` instead of propagating
//!
//! ## Current Implementation
//!
//! - **Primary Storage**: one JSON file per key in the data directory
//! - **Testing / Ephemeral**: in-memory medium that can simulate disabled
//!   storage and an exhausted quota

pub mod traits;
pub mod keys;
pub mod memory;
pub mod file;
pub mod record_store;

pub use traits::StorageMedium;
pub use keys::{RecordListKey, ValueKey};
pub use memory::InMemoryStorage;
pub use file::JsonFileStorage;
pub use record_store::LocalRecordStore;
