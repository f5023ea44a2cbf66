//! # REST API Interface Layer
//!
//! HTTP endpoints for the SDG Explorers site. This layer handles:
//! - JSON request/response (de)serialization
//! - Mapping DTOs onto domain commands
//! - Translating validation failures into `400` responses
//! - Request logging
//!
//! Handlers contain no business rules; those live in the domain services.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    Router,
};

use shared::ErrorResponse;

use crate::error::ValidationError;
use crate::AppState;

pub mod feedback_apis;
pub mod water_apis;
pub mod quiz_apis;
pub mod checklist_apis;

pub const VALIDATION_ERROR_CODE: &str = "VALIDATION_ERROR";

/// All API routes, to be nested under `/api`
pub fn api_router() -> Router<AppState> {
    Router::new()
        .nest("/feedback", feedback_apis::router())
        .nest("/water", water_apis::router())
        .nest("/quiz", quiz_apis::router())
        .nest("/checklist", checklist_apis::router())
}

/// `400` with `{ "error": <message>, "code": "VALIDATION_ERROR" }`
pub(crate) fn validation_error_response(error: &ValidationError) -> Response {
    let body = ErrorResponse {
        error: error.to_string(),
        code: VALIDATION_ERROR_CODE.to_string(),
    };
    (StatusCode::BAD_REQUEST, Json(body)).into_response()
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;

    use async_trait::async_trait;
    use axum::{
        body::Body,
        http::{Method, Request},
        response::Response,
        Router,
    };
    use serde::de::DeserializeOwned;
    use tower::util::ServiceExt; // for `oneshot`

    use crate::domain::{FeedbackPayload, RemoteOutcome, RemoteSubmission};
    use crate::storage::InMemoryStorage;
    use crate::{build_state, AppState};

    /// Remote that answers every submission with a fixed outcome
    pub struct FixedRemote(pub RemoteOutcome);

    #[async_trait]
    impl RemoteSubmission for FixedRemote {
        async fn submit(&self, _payload: &FeedbackPayload) -> RemoteOutcome {
            self.0.clone()
        }
    }

    pub fn test_state(medium: Arc<InMemoryStorage>) -> AppState {
        build_state(medium, Arc::new(FixedRemote(RemoteOutcome::NotConfigured)), None)
    }

    pub async fn send(app: Router, method: Method, uri: &str, body: Option<serde_json::Value>) -> Response {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        app.oneshot(request).await.unwrap()
    }

    pub async fn read_json<T: DeserializeOwned>(response: Response) -> T {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&body).unwrap()
    }
}
