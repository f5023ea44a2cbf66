//! # SDG Explorers Backend
//!
//! Contains all non-UI logic for the SDG Explorers site.
//!
//! This crate brings together:
//! - **Storage**: the bounded, fail-open local record store and its media
//! - **Domain**: feedback, export, water tools, quiz and checklist services
//! - **IO**: the REST interface the site talks to
//!
//! ## Architecture
//!
//! ```text
//! Site (static HTML/JS)
//!     ↓
//! IO Layer (REST API, handlers)
//!     ↓
//! Domain Layer (services)
//!     ↓
//! Storage Layer (StorageMedium: JSON files or memory)
//! ```

pub mod config;
pub mod error;
pub mod storage;
pub mod domain;
pub mod io;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use axum::{
    http::{HeaderValue, Method},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tracing::{info, warn};

use crate::config::{AppConfig, StorageBackend};
use crate::domain::{
    ChecklistService, ExportService, FeedbackService, HttpRemoteSubmitter, QuizService,
    RemoteSubmission, WaterEstimateService, WaterQualityService,
};
use crate::storage::{InMemoryStorage, JsonFileStorage, LocalRecordStore, StorageMedium};

/// Application state shared by all handlers
#[derive(Clone)]
pub struct AppState {
    pub feedback_service: FeedbackService,
    pub export_service: ExportService,
    pub water_quality_service: WaterQualityService,
    pub water_estimate_service: WaterEstimateService,
    pub quiz_service: QuizService,
    pub checklist_service: ChecklistService,
    /// Default directory for "export to path"
    pub export_dir: Option<PathBuf>,
}

/// Wire every service onto one record store
pub fn build_state(
    medium: Arc<dyn StorageMedium>,
    remote: Arc<dyn RemoteSubmission>,
    export_dir: Option<PathBuf>,
) -> AppState {
    let store = LocalRecordStore::new(medium);

    AppState {
        feedback_service: FeedbackService::new(store.clone(), remote),
        export_service: ExportService::new(store.clone()),
        water_quality_service: WaterQualityService::new(store.clone()),
        water_estimate_service: WaterEstimateService::new(store.clone()),
        quiz_service: QuizService::new(store.clone()),
        checklist_service: ChecklistService::new(store),
        export_dir,
    }
}

/// Initialize the backend with all required services
pub fn initialize_backend(config: &AppConfig) -> Result<AppState> {
    info!(backend = ?config.storage, "setting up storage");
    let medium: Arc<dyn StorageMedium> = match config.storage {
        StorageBackend::File => {
            let medium = JsonFileStorage::new(&config.data_dir)?;
            info!(data_dir = ?medium.base_directory(), "using JSON file storage");
            Arc::new(medium)
        }
        StorageBackend::Memory => {
            warn!("using in-memory storage; saved records are lost on restart");
            Arc::new(InMemoryStorage::new())
        }
    };

    info!("setting up remote submission");
    let remote = HttpRemoteSubmitter::new(config.feedback_endpoint.as_deref(), config.remote_timeout())?;

    info!("setting up application state");
    Ok(build_state(medium, Arc::new(remote), config.export_dir.clone()))
}

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState, config: &AppConfig) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers(Any);
    let cors = match config.allowed_origin.parse::<HeaderValue>() {
        Ok(origin) => cors.allow_origin(origin),
        Err(_) => {
            warn!(origin = %config.allowed_origin, "invalid allowed_origin, allowing any origin");
            cors.allow_origin(Any)
        }
    };

    let router = Router::new()
        .nest("/api", io::rest::api_router())
        .layer(cors)
        .with_state(app_state);

    match &config.static_dir {
        Some(dir) => {
            info!(static_dir = ?dir, "serving site files");
            router.fallback_service(ServeDir::new(dir))
        }
        None => router,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
    };
    use tempfile::TempDir;
    use tower::util::ServiceExt; // for `oneshot`

    fn file_config(temp_dir: &TempDir) -> AppConfig {
        AppConfig {
            data_dir: temp_dir.path().join("data"),
            ..AppConfig::default()
        }
    }

    #[tokio::test]
    async fn test_file_backed_app_persists_under_data_dir() {
        let temp_dir = TempDir::new().unwrap();
        let config = file_config(&temp_dir);
        let app = create_router(initialize_backend(&config).unwrap(), &config);

        let request = Request::builder()
            .method("POST")
            .uri("/api/water/check")
            .header("content-type", "application/json")
            .body(Body::from(r#"{"turbidity": 3}"#))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(temp_dir.path().join("data").join("sdg-water-checks.json").exists());
    }

    #[tokio::test]
    async fn test_cors_allows_configured_origin() {
        let config = AppConfig {
            storage: StorageBackend::Memory,
            ..AppConfig::default()
        };
        let app = create_router(initialize_backend(&config).unwrap(), &config);

        let request = Request::builder()
            .uri("/api/quiz/scores")
            .header(header::ORIGIN, "http://localhost:8080")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            "http://localhost:8080"
        );
    }

    #[tokio::test]
    async fn test_static_dir_is_served_as_fallback() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join("index.html"), "<h1>SDG Explorers</h1>").unwrap();
        let config = AppConfig {
            storage: StorageBackend::Memory,
            static_dir: Some(temp_dir.path().to_path_buf()),
            ..AppConfig::default()
        };
        let app = create_router(initialize_backend(&config).unwrap(), &config);

        let request = Request::builder().uri("/index.html").body(Body::empty()).unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"<h1>SDG Explorers</h1>");
    }
}
