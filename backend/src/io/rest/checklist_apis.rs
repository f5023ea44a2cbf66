//! # REST API for the Action Checklist

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use tracing::info;

use shared::{ChecklistResponse, SaveChecklistRequest};

use crate::domain::CHECKLIST_SAVED_MESSAGE;
use crate::AppState;

/// Create a router for checklist related APIs
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(get_checklist).post(save_checklist))
}

/// The last saved snapshot, if any
pub async fn get_checklist(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/checklist");

    let response = ChecklistResponse {
        checklist: state.checklist_service.current(),
        message: None,
    };
    (StatusCode::OK, Json(response))
}

pub async fn save_checklist(
    State(state): State<AppState>,
    Json(request): Json<SaveChecklistRequest>,
) -> impl IntoResponse {
    info!("POST /api/checklist - request: {:?}", request);

    let (snapshot, saved) = state.checklist_service.save(request.c1, request.c2, request.c3);
    let (status, message) = if saved {
        (StatusCode::OK, CHECKLIST_SAVED_MESSAGE)
    } else {
        (StatusCode::INTERNAL_SERVER_ERROR, "Could not save the checklist locally.")
    };
    let response = ChecklistResponse {
        checklist: Some(snapshot),
        message: Some(message.to_string()),
    };
    (status, Json(response))
}
