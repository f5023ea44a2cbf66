//! # REST API for Feedback
//!
//! Submitting, listing and clearing feedback, plus the CSV export as a
//! download or into the configured export directory.

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use tracing::{error, info, warn};

use shared::{
    ErrorResponse, ExportToPathRequest, ExportToPathResponse, FeedbackListResponse, StatusResponse,
    SubmitFeedbackRequest, SubmitFeedbackResponse,
};

use crate::domain::commands::feedback::{FeedbackForm, LocalOutcome};
use crate::domain::{CsvExport, DirectorySink, ExportOutcome};
use crate::error::ExportError;
use crate::io::rest::validation_error_response;
use crate::AppState;

pub const FEEDBACK_CLEARED_MESSAGE: &str = "Local feedback cleared.";
pub const NOTHING_TO_EXPORT_MESSAGE: &str = "No local feedback to export.";
pub const EXPORT_COMPLETE_MESSAGE: &str = "Export complete.";

/// Create a router for feedback related APIs
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_feedback).post(submit_feedback).delete(clear_feedback))
        .route("/export", get(download_export))
        .route("/export/to-path", post(export_to_path))
}

/// The CSV export as an HTTP attachment
pub struct CsvDownload(pub CsvExport);

impl IntoResponse for CsvDownload {
    fn into_response(self) -> Response {
        let disposition = format!("attachment; filename=\"{}\"", self.0.filename);
        (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, "text/csv;charset=utf-8".to_string()),
                (header::CONTENT_DISPOSITION, disposition),
            ],
            self.0.content,
        )
            .into_response()
    }
}

/// Submit a feedback form
pub async fn submit_feedback(
    State(state): State<AppState>,
    Json(request): Json<SubmitFeedbackRequest>,
) -> impl IntoResponse {
    info!("POST /api/feedback - topic: {:?}, save_local: {}", request.topic, request.save_local);

    match state.feedback_service.submit(FeedbackForm::from(request)).await {
        Ok(report) => {
            let response = SubmitFeedbackResponse {
                saved_locally: report.local == LocalOutcome::Saved,
                remote: report.remote.status(),
                message: report.message,
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => {
            warn!("Rejected feedback: {}", e);
            validation_error_response(&e)
        }
    }
}

/// List saved feedback, newest first
pub async fn list_feedback(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/feedback");

    let entries = state.feedback_service.list_feedback();
    (StatusCode::OK, Json(FeedbackListResponse { entries }))
}

/// Remove all saved feedback
pub async fn clear_feedback(State(state): State<AppState>) -> impl IntoResponse {
    info!("DELETE /api/feedback");

    if state.feedback_service.clear_feedback() {
        let response = StatusResponse {
            success: true,
            message: FEEDBACK_CLEARED_MESSAGE.to_string(),
        };
        (StatusCode::OK, Json(response))
    } else {
        let response = StatusResponse {
            success: false,
            message: "Could not clear local feedback.".to_string(),
        };
        (StatusCode::INTERNAL_SERVER_ERROR, Json(response))
    }
}

/// Download saved feedback as CSV; `204` when there is none
pub async fn download_export(State(state): State<AppState>) -> Response {
    info!("GET /api/feedback/export");

    match state.export_service.export_feedback() {
        Ok(ExportOutcome::NothingToExport) => StatusCode::NO_CONTENT.into_response(),
        Ok(ExportOutcome::Ready(export)) => CsvDownload(export).into_response(),
        Err(e) => {
            error!("❌ Failed to export feedback: {}", e);
            let body = ErrorResponse {
                error: format!("Failed to export feedback: {}", e),
                code: "EXPORT_ERROR".to_string(),
            };
            (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
        }
    }
}

/// Write the CSV export into the export directory, or a folder inside it
pub async fn export_to_path(
    State(state): State<AppState>,
    Json(request): Json<ExportToPathRequest>,
) -> impl IntoResponse {
    info!("POST /api/feedback/export/to-path - custom_path: {:?}", request.custom_path);

    let result = DirectorySink::within_export_dir(request.custom_path.as_deref(), state.export_dir.as_deref())
        .and_then(|sink| state.export_service.export_to_sink(&sink));

    match result {
        Ok(Some((export, location))) => {
            let response = ExportToPathResponse {
                success: true,
                message: EXPORT_COMPLETE_MESSAGE.to_string(),
                file_path: location,
                row_count: export.row_count,
            };
            (StatusCode::OK, Json(response))
        }
        Ok(None) => {
            let response = ExportToPathResponse {
                success: false,
                message: NOTHING_TO_EXPORT_MESSAGE.to_string(),
                file_path: String::new(),
                row_count: 0,
            };
            (StatusCode::OK, Json(response))
        }
        Err(e) => {
            let status = match &e {
                ExportError::OutsideExportDirectory(_) => {
                    warn!("Refused export path: {}", e);
                    StatusCode::BAD_REQUEST
                }
                _ => {
                    error!("❌ Failed to export to path: {}", e);
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            };
            let response = ExportToPathResponse {
                success: false,
                message: format!("Failed to export to path: {}", e),
                file_path: String::new(),
                row_count: 0,
            };
            (status, Json(response))
        }
    }
}
