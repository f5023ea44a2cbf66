//! # Remote Feedback Submission
//!
//! Forwards feedback to a form-collection endpoint (e.g. Formspree) as JSON.
//!
//! The request is a `POST` with `Content-Type: application/json` and
//! `Accept: application/json`. Any 2xx status is success. On other statuses
//! the endpoint may explain itself with `{"error": "..."}`, which is passed on
//! to the visitor.
//!
//! The endpoint is optional: an empty value or one still containing the
//! `YOUR_FORM_ID` placeholder means remote sending is skipped.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use tracing::{error, info, warn};

use shared::FeedbackEntry;

/// Placeholder left in unconfigured endpoint URLs
pub const ENDPOINT_PLACEHOLDER: &str = "YOUR_FORM_ID";

/// Body sent to the remote endpoint. The timestamp stays local.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeedbackPayload {
    pub name: String,
    pub email: String,
    pub topic: String,
    pub message: String,
    pub rating: String,
}

impl From<&FeedbackEntry> for FeedbackPayload {
    fn from(entry: &FeedbackEntry) -> Self {
        Self {
            name: entry.name.clone(),
            email: entry.email.clone(),
            topic: entry.topic.clone(),
            message: entry.message.clone(),
            rating: entry.rating.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteOutcome {
    Sent,
    NotConfigured,
    /// The endpoint answered with a non-2xx status; carries the reason shown
    /// to the visitor
    Rejected(String),
    /// The request never got an answer (connection failure, timeout)
    NetworkError(String),
}

impl RemoteOutcome {
    pub fn status(&self) -> shared::RemoteStatus {
        match self {
            RemoteOutcome::Sent => shared::RemoteStatus::Sent,
            RemoteOutcome::NotConfigured => shared::RemoteStatus::NotConfigured,
            RemoteOutcome::Rejected(_) => shared::RemoteStatus::Rejected,
            RemoteOutcome::NetworkError(_) => shared::RemoteStatus::NetworkError,
        }
    }
}

/// Seam for the remote step so the feedback flow can run against a stub.
#[async_trait]
pub trait RemoteSubmission: Send + Sync {
    async fn submit(&self, payload: &FeedbackPayload) -> RemoteOutcome;
}

/// Normalize a configured endpoint; `None` when it is blank or still the
/// placeholder.
pub fn resolve_endpoint(raw: Option<&str>) -> Option<String> {
    let trimmed = raw?.trim();
    if trimmed.is_empty() || trimmed.contains(ENDPOINT_PLACEHOLDER) {
        return None;
    }
    Some(trimmed.to_string())
}

/// [`RemoteSubmission`] over HTTP with reqwest.
#[derive(Debug, Clone)]
pub struct HttpRemoteSubmitter {
    client: Client,
    endpoint: Option<String>,
}

impl HttpRemoteSubmitter {
    pub fn new(endpoint: Option<&str>, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        let endpoint = resolve_endpoint(endpoint);
        match &endpoint {
            Some(url) => info!(endpoint = %url, "remote feedback submission enabled"),
            None => info!("remote feedback endpoint not configured, submissions stay local"),
        }
        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> Option<&str> {
        self.endpoint.as_deref()
    }
}

#[async_trait]
impl RemoteSubmission for HttpRemoteSubmitter {
    async fn submit(&self, payload: &FeedbackPayload) -> RemoteOutcome {
        let Some(endpoint) = self.endpoint.as_deref() else {
            return RemoteOutcome::NotConfigured;
        };

        info!(endpoint, topic = %payload.topic, "sending feedback to remote endpoint");

        let response = match self
            .client
            .post(endpoint)
            .header(ACCEPT, "application/json")
            .json(payload)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                error!(endpoint, error = %e, "feedback send failed");
                return RemoteOutcome::NetworkError(e.to_string());
            }
        };

        let status = response.status();
        if status.is_success() {
            info!(endpoint, status = status.as_u16(), "feedback accepted by remote endpoint");
            return RemoteOutcome::Sent;
        }

        let body = response.text().await.unwrap_or_default();
        let reason = rejection_reason(&body)
            .unwrap_or_else(|| status.canonical_reason().unwrap_or("unknown error").to_string());
        warn!(endpoint, status = status.as_u16(), reason = %reason, "feedback rejected by remote endpoint");
        RemoteOutcome::Rejected(reason)
    }
}

/// The endpoint's explanation: its `error` string when present, otherwise the
/// whole JSON body. `None` when the body is not JSON.
fn rejection_reason(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    match value.get("error") {
        Some(Value::String(message)) if !message.is_empty() => Some(message.clone()),
        _ => Some(value.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload() -> FeedbackPayload {
        FeedbackPayload {
            name: "Ana".to_string(),
            email: "a@x.com".to_string(),
            topic: "water".to_string(),
            message: "Great, thanks!".to_string(),
            rating: "5".to_string(),
        }
    }

    fn submitter(url: &str) -> HttpRemoteSubmitter {
        HttpRemoteSubmitter::new(Some(url), Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn test_resolve_endpoint() {
        assert_eq!(resolve_endpoint(None), None);
        assert_eq!(resolve_endpoint(Some("")), None);
        assert_eq!(resolve_endpoint(Some("   ")), None);
        assert_eq!(resolve_endpoint(Some("https://formspree.io/f/YOUR_FORM_ID")), None);
        assert_eq!(
            resolve_endpoint(Some("  https://formspree.io/f/abc123 ")),
            Some("https://formspree.io/f/abc123".to_string())
        );
    }

    #[test]
    fn test_rejection_reason() {
        assert_eq!(rejection_reason(r#"{"error":"Form not found"}"#).as_deref(), Some("Form not found"));
        assert_eq!(rejection_reason(r#"{"errors":[1]}"#).as_deref(), Some(r#"{"errors":[1]}"#));
        assert_eq!(rejection_reason(r#"{"error":""}"#).as_deref(), Some(r#"{"error":""}"#));
        assert_eq!(rejection_reason("<html>bad gateway</html>"), None);
    }

    #[tokio::test]
    async fn test_unconfigured_endpoint_skips_send() {
        let submitter = HttpRemoteSubmitter::new(Some("https://formspree.io/f/YOUR_FORM_ID"), Duration::from_secs(1)).unwrap();
        assert_eq!(submitter.endpoint(), None);
        assert_eq!(submitter.submit(&payload()).await, RemoteOutcome::NotConfigured);
    }

    #[tokio::test]
    async fn test_posts_json_with_headers() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/f/abc")
            .match_header("content-type", "application/json")
            .match_header("accept", "application/json")
            .match_body(mockito::Matcher::Json(serde_json::json!({
                "name": "Ana",
                "email": "a@x.com",
                "topic": "water",
                "message": "Great, thanks!",
                "rating": "5"
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"ok":true}"#)
            .create_async()
            .await;

        let outcome = submitter(&format!("{}/f/abc", server.url())).submit(&payload()).await;

        assert_eq!(outcome, RemoteOutcome::Sent);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_error_body_becomes_reason() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/f/abc")
            .with_status(422)
            .with_header("content-type", "application/json")
            .with_body(r#"{"error":"Email is invalid"}"#)
            .create_async()
            .await;

        let outcome = submitter(&format!("{}/f/abc", server.url())).submit(&payload()).await;

        assert_eq!(outcome, RemoteOutcome::Rejected("Email is invalid".to_string()));
    }

    #[tokio::test]
    async fn test_non_json_error_uses_status_text() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/f/abc")
            .with_status(503)
            .with_body("down for maintenance")
            .create_async()
            .await;

        let outcome = submitter(&format!("{}/f/abc", server.url())).submit(&payload()).await;

        assert_eq!(outcome, RemoteOutcome::Rejected("Service Unavailable".to_string()));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_network_error() {
        // Port 9 (discard) on localhost is expected to refuse connections
        let outcome = submitter("http://127.0.0.1:9/f/abc").submit(&payload()).await;
        assert!(matches!(outcome, RemoteOutcome::NetworkError(_)));
    }
}
