use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single piece of visitor feedback as it is stored locally and exported.
///
/// Field names match the JSON written by the site, so lists saved by the
/// browser and lists saved by the backend are interchangeable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackEntry {
    pub name: String,
    pub email: String,
    pub topic: String,
    pub message: String,
    /// Star rating as entered in the form ("1".."5")
    pub rating: String,
    /// Submission time (RFC 3339, UTC, millisecond precision)
    pub at: String,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmitFeedbackRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub topic: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub rating: String,
    /// Whether the entry should also be kept in local storage
    #[serde(default = "default_true")]
    pub save_local: bool,
}

/// How the remote half of a feedback submission ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RemoteStatus {
    Sent,
    NotConfigured,
    Rejected,
    NetworkError,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmitFeedbackResponse {
    pub saved_locally: bool,
    pub remote: RemoteStatus,
    /// User-facing status line combining both outcomes
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackListResponse {
    pub entries: Vec<FeedbackEntry>,
}

/// Generic success/failure envelope used by the simpler endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusResponse {
    pub success: bool,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ExportToPathRequest {
    /// Target directory; the configured export directory is used when absent
    pub custom_path: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportToPathResponse {
    pub success: bool,
    pub message: String,
    pub file_path: String,
    pub row_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct WaterCheckRequest {
    pub ph: Option<f64>,
    /// Turbidity in NTU
    pub turbidity: Option<f64>,
    /// Nitrate in mg/L
    pub nitrate: Option<f64>,
}

/// A saved water-quality check. Absent measurements are stored as null.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaterCheck {
    pub ph: Option<f64>,
    pub turbidity: Option<f64>,
    pub nitrate: Option<f64>,
    pub at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaterCheckResponse {
    pub messages: Vec<String>,
    /// Messages rendered as a bulleted block
    pub summary: String,
    pub saved: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaterChecksResponse {
    pub checks: Vec<WaterCheck>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct WaterEstimateRequest {
    /// Shower minutes per day
    #[serde(default)]
    pub shower: f64,
    /// Toilet flushes per day
    #[serde(default)]
    pub flushes: f64,
    /// Minutes of running water for dishes per day
    #[serde(default)]
    pub dishes: f64,
}

/// Litres per day attributed to each activity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaterUseBreakdown {
    pub shower: f64,
    pub toilet: f64,
    pub dishes: f64,
}

/// Estimated water use in litres
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaterUseEstimate {
    pub daily: f64,
    pub weekly: f64,
    pub monthly: f64,
    pub breakdown: WaterUseBreakdown,
}

/// A saved estimate together with the inputs that produced it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedWaterEstimate {
    pub shower: f64,
    pub flushes: f64,
    pub dishes: f64,
    pub res: WaterUseEstimate,
    pub at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaterEstimateResponse {
    pub estimate: WaterUseEstimate,
    pub tip: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveWaterEstimateResponse {
    pub estimate: WaterUseEstimate,
    pub saved: bool,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaterEstimatesResponse {
    pub estimates: Vec<SavedWaterEstimate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct QuizAnswerRequest {
    /// Quiz topic; "climate" when absent
    pub topic: Option<String>,
    /// Selected option ("a", "b", ...); None when nothing was picked
    pub choice: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizAnswerResponse {
    pub topic: String,
    pub correct: bool,
    pub message: String,
}

/// Correct-answer count per quiz topic
pub type QuizScores = BTreeMap<String, u32>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizScoresResponse {
    pub scores: QuizScores,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChecklistSnapshot {
    pub c1: bool,
    pub c2: bool,
    pub c3: bool,
    pub date: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct SaveChecklistRequest {
    #[serde(default)]
    pub c1: bool,
    #[serde(default)]
    pub c2: bool,
    #[serde(default)]
    pub c3: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChecklistResponse {
    pub checklist: Option<ChecklistSnapshot>,
    pub message: Option<String>,
}
