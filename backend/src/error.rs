//! # Error Types
//!
//! Every failure in this crate is caught at a service boundary and turned into
//! status text; none of them is fatal to the application.
//!
//! - [`StorageError`]: the storage medium could not be read or written
//! - [`ValidationError`]: user input rejected before any storage or network call
//! - [`ExportError`]: CSV serialization or delivery failed
//! - [`ConfigError`]: the configuration file could not be used
//!
//! Malformed stored data and remote submission failures are not errors here:
//! the first degrades to an empty list inside the record store, the second is a
//! [`RemoteOutcome`](crate::domain::RemoteOutcome) variant.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    /// The medium is disabled or otherwise not usable
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    /// Writing `key` would exceed the medium's size limit
    #[error("storage quota exceeded while writing '{key}'")]
    QuotaExceeded { key: String },

    #[error("storage i/o error: {0}")]
    Io(#[from] std::io::Error),
}

/// Input problems reported back to the user verbatim
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please fill all required fields.")]
    MissingRequiredFields,

    #[error("Please enter at least one measurement.")]
    NoMeasurements,

    #[error("Please choose an answer.")]
    NoAnswerChosen,
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to serialize record: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("failed to write csv: {0}")]
    Csv(#[from] csv::Error),

    #[error("csv output was not valid utf-8: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),

    #[error("failed to deliver export to {path:?}: {source}")]
    Delivery {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no export directory could be determined")]
    NoExportDirectory,

    /// A requested export path does not stay inside the export directory
    #[error("export path {0:?} must be a folder inside the export directory")]
    OutsideExportDirectory(PathBuf),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}
