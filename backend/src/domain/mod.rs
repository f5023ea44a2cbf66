//! # Domain Module
//!
//! Business logic for the SDG Explorers site, independent of HTTP and of the
//! storage medium.
//!
//! ## Module Organization
//!
//! - **feedback_service**: validation, local persistence and remote submission
//!   of visitor feedback, combined into one status
//! - **remote_submitter**: the HTTP boundary for forwarding feedback
//! - **export_service**: CSV serialization of saved feedback and delivery
//! - **water_quality**: threshold classification of water measurements
//! - **water_estimate**: household water-use estimator
//! - **quiz_service**: quiz grading and per-topic scores
//! - **checklist_service**: the saved action checklist
//!
//! ## Business Rules
//!
//! - Local saving always happens before the remote attempt and is never rolled
//!   back by a remote failure
//! - Saved lists are newest first and bounded per key
//! - Validation happens before any storage or network call

use chrono::{SecondsFormat, Utc};

pub mod commands;
pub mod remote_submitter;
pub mod feedback_service;
pub mod export_service;
pub mod water_quality;
pub mod water_estimate;
pub mod quiz_service;
pub mod checklist_service;

pub use commands::*;
pub use remote_submitter::*;
pub use feedback_service::*;
pub use export_service::*;
pub use water_quality::*;
pub use water_estimate::*;
pub use quiz_service::*;
pub use checklist_service::*;

/// Current time as RFC 3339 UTC with millisecond precision, e.g.
/// `2025-03-01T10:00:00.000Z`
pub fn current_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}
