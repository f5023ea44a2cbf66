//! # REST API for the Water Tools
//!
//! The water-quality checker and the household water-use estimator.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use tracing::{info, warn};

use shared::{
    SaveWaterEstimateResponse, WaterCheckRequest, WaterCheckResponse, WaterChecksResponse, WaterEstimateRequest,
    WaterEstimateResponse, WaterEstimatesResponse,
};

use crate::domain::commands::water::{WaterHabits, WaterSample};
use crate::domain::{savings_tip, ESTIMATE_NOT_SAVED_MESSAGE, ESTIMATE_SAVED_MESSAGE};
use crate::io::rest::validation_error_response;
use crate::AppState;

/// Create a router for water related APIs
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/check", post(check_water))
        .route("/checks", get(list_checks))
        .route("/estimate", post(estimate_water))
        .route("/estimate/save", post(save_estimate))
        .route("/estimates", get(list_estimates))
}

/// Classify a water sample and save it to the check history
pub async fn check_water(
    State(state): State<AppState>,
    Json(request): Json<WaterCheckRequest>,
) -> impl IntoResponse {
    info!("POST /api/water/check - request: {:?}", request);

    match state.water_quality_service.check(WaterSample::from(request)) {
        Ok(report) => {
            let response = WaterCheckResponse {
                summary: report.summary(),
                messages: report.messages,
                saved: report.saved,
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => {
            warn!("Rejected water check: {}", e);
            validation_error_response(&e)
        }
    }
}

/// Saved water checks, newest first
pub async fn list_checks(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/water/checks");

    let checks = state.water_quality_service.recent_checks();
    (StatusCode::OK, Json(WaterChecksResponse { checks }))
}

/// Estimate water use without saving it
pub async fn estimate_water(
    State(state): State<AppState>,
    Json(request): Json<WaterEstimateRequest>,
) -> impl IntoResponse {
    info!("POST /api/water/estimate - request: {:?}", request);

    let estimate = state.water_estimate_service.estimate(&WaterHabits::from(request));
    let response = WaterEstimateResponse {
        estimate,
        tip: savings_tip(),
    };
    (StatusCode::OK, Json(response))
}

/// Estimate water use and keep it in the estimate history
pub async fn save_estimate(
    State(state): State<AppState>,
    Json(request): Json<WaterEstimateRequest>,
) -> impl IntoResponse {
    info!("POST /api/water/estimate/save - request: {:?}", request);

    let (estimate, saved) = state.water_estimate_service.save_estimate(&WaterHabits::from(request));
    let message = if saved {
        ESTIMATE_SAVED_MESSAGE
    } else {
        ESTIMATE_NOT_SAVED_MESSAGE
    };
    let response = SaveWaterEstimateResponse {
        estimate,
        saved,
        message: message.to_string(),
    };
    (StatusCode::OK, Json(response))
}

/// Saved estimates, newest first
pub async fn list_estimates(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/water/estimates");

    let estimates = state.water_estimate_service.saved_estimates();
    (StatusCode::OK, Json(WaterEstimatesResponse { estimates }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::rest::test_support::{read_json, send, test_state};
    use crate::storage::InMemoryStorage;
    use axum::http::Method;
    use serde_json::json;
    use shared::ErrorResponse;
    use std::sync::Arc;

    fn setup_test_app() -> Router {
        router().with_state(test_state(Arc::new(InMemoryStorage::new())))
    }

    #[tokio::test]
    async fn test_check_classifies_and_saves() {
        let app = setup_test_app();

        let response = send(
            app.clone(),
            Method::POST,
            "/check",
            Some(json!({ "ph": 5.9, "nitrate": 12.0 })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        let report: WaterCheckResponse = read_json(response).await;
        assert!(report.saved);
        assert_eq!(report.messages.len(), 2);
        assert!(report.messages[0].starts_with("pH: acidic"));
        assert!(report.messages[1].starts_with("Nitrate: elevated"));
        assert!(report.summary.starts_with("• pH: acidic"));

        let history: WaterChecksResponse = read_json(send(app, Method::GET, "/checks", None).await).await;
        assert_eq!(history.checks.len(), 1);
        assert_eq!(history.checks[0].ph, Some(5.9));
        assert_eq!(history.checks[0].turbidity, None);
    }

    #[tokio::test]
    async fn test_check_without_measurements_is_bad_request() {
        let response = send(setup_test_app(), Method::POST, "/check", Some(json!({}))).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: ErrorResponse = read_json(response).await;
        assert_eq!(body.error, "Please enter at least one measurement.");
    }

    #[tokio::test]
    async fn test_estimate_is_not_saved() {
        let app = setup_test_app();

        let response = send(
            app.clone(),
            Method::POST,
            "/estimate",
            Some(json!({ "shower": 8, "flushes": 5, "dishes": 15 })),
        )
        .await;
        let result: WaterEstimateResponse = read_json(response).await;
        assert_eq!(result.estimate.daily, 114.0);
        assert!(result.tip.contains("18 L"));

        let saved: WaterEstimatesResponse = read_json(send(app, Method::GET, "/estimates", None).await).await;
        assert!(saved.estimates.is_empty());
    }

    #[tokio::test]
    async fn test_save_estimate() {
        let app = setup_test_app();

        let response = send(
            app.clone(),
            Method::POST,
            "/estimate/save",
            Some(json!({ "shower": 5, "flushes": 4 })),
        )
        .await;
        let result: SaveWaterEstimateResponse = read_json(response).await;
        assert!(result.saved);
        assert_eq!(result.message, ESTIMATE_SAVED_MESSAGE);
        assert_eq!(result.estimate.daily, 69.0);

        let saved: WaterEstimatesResponse = read_json(send(app, Method::GET, "/estimates", None).await).await;
        assert_eq!(saved.estimates.len(), 1);
        assert_eq!(saved.estimates[0].dishes, 0.0);
        assert_eq!(saved.estimates[0].res, result.estimate);
    }
}
