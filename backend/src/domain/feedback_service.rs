use std::sync::Arc;

use tracing::{info, warn};

use shared::FeedbackEntry;

use crate::domain::commands::feedback::{FeedbackForm, LocalOutcome, SubmissionReport};
use crate::domain::current_timestamp;
use crate::domain::remote_submitter::{FeedbackPayload, RemoteOutcome, RemoteSubmission};
use crate::error::ValidationError;
use crate::storage::keys::FEEDBACK;
use crate::storage::LocalRecordStore;

/// Service for the feedback form: validation, local list, remote forwarding
#[derive(Clone)]
pub struct FeedbackService {
    store: LocalRecordStore,
    remote: Arc<dyn RemoteSubmission>,
}

impl FeedbackService {
    pub fn new(store: LocalRecordStore, remote: Arc<dyn RemoteSubmission>) -> Self {
        Self { store, remote }
    }

    /// Trim and check the form, stamping the entry with the current time.
    /// Name, email and message are required.
    pub fn validate(form: &FeedbackForm) -> Result<FeedbackEntry, ValidationError> {
        let name = form.name.trim();
        let email = form.email.trim();
        let message = form.message.trim();

        if name.is_empty() || email.is_empty() || message.is_empty() {
            return Err(ValidationError::MissingRequiredFields);
        }

        Ok(FeedbackEntry {
            name: name.to_string(),
            email: email.to_string(),
            topic: form.topic.clone(),
            message: message.to_string(),
            rating: form.rating.clone(),
            at: current_timestamp(),
        })
    }

    /// Prepend `entry` to the local feedback list when `enabled`
    pub fn persist_locally(&self, entry: &FeedbackEntry, enabled: bool) -> LocalOutcome {
        if !enabled {
            return LocalOutcome::Skipped;
        }
        if self.store.prepend(&FEEDBACK, entry.clone()) {
            LocalOutcome::Saved
        } else {
            warn!("feedback could not be saved locally");
            LocalOutcome::Failed
        }
    }

    pub async fn submit_remote(&self, entry: &FeedbackEntry) -> RemoteOutcome {
        self.remote.submit(&FeedbackPayload::from(entry)).await
    }

    /// Validate, save locally, then forward remotely. The local save is never
    /// undone by a remote failure.
    pub async fn submit(&self, form: FeedbackForm) -> Result<SubmissionReport, ValidationError> {
        let entry = Self::validate(&form)?;
        info!(topic = %entry.topic, rating = %entry.rating, "submitting feedback");

        let local = self.persist_locally(&entry, form.save_local);
        let remote = self.submit_remote(&entry).await;
        let message = compose_status(local, &remote);

        info!(?local, remote = ?remote.status(), "feedback submission finished");
        Ok(SubmissionReport {
            entry,
            local,
            remote,
            message,
        })
    }

    /// Saved feedback, newest first
    pub fn list_feedback(&self) -> Vec<FeedbackEntry> {
        self.store.load(&FEEDBACK)
    }

    pub fn clear_feedback(&self) -> bool {
        let cleared = self.store.clear(&FEEDBACK);
        if cleared {
            info!("local feedback cleared");
        }
        cleared
    }
}

/// One status line for the two independent outcomes of a submission
pub fn compose_status(local: LocalOutcome, remote: &RemoteOutcome) -> String {
    match (local, remote) {
        (LocalOutcome::Saved, RemoteOutcome::NotConfigured) => {
            "Feedback saved locally. (Remote endpoint not configured.)".to_string()
        }
        (LocalOutcome::Saved, RemoteOutcome::Sent) => {
            "Feedback sent to server and saved locally ✅".to_string()
        }
        (LocalOutcome::Skipped, RemoteOutcome::Sent) => "Feedback sent to server ✅".to_string(),
        (LocalOutcome::Failed, RemoteOutcome::Sent) => {
            "Feedback sent to server, but could not be saved locally.".to_string()
        }
        (local, RemoteOutcome::NotConfigured) => {
            format!("{} (Remote endpoint not configured.)", local_clause(local))
        }
        (local, RemoteOutcome::Rejected(reason)) => {
            format!("{} Failed to send to server: {}", local_clause(local), reason)
        }
        (local, RemoteOutcome::NetworkError(_)) => {
            format!("{} Failed to send to server (network error).", local_clause(local))
        }
    }
}

fn local_clause(local: LocalOutcome) -> &'static str {
    match local {
        LocalOutcome::Saved => "Saved locally.",
        LocalOutcome::Skipped => "Not saved locally.",
        LocalOutcome::Failed => "Could not save locally.",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::InMemoryStorage;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Remote stub that records payloads and answers with a fixed outcome
    struct StubRemote {
        outcome: RemoteOutcome,
        received: Mutex<Vec<FeedbackPayload>>,
    }

    impl StubRemote {
        fn new(outcome: RemoteOutcome) -> Arc<Self> {
            Arc::new(Self {
                outcome,
                received: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl RemoteSubmission for StubRemote {
        async fn submit(&self, payload: &FeedbackPayload) -> RemoteOutcome {
            self.received.lock().unwrap().push(payload.clone());
            self.outcome.clone()
        }
    }

    fn setup(outcome: RemoteOutcome) -> (Arc<InMemoryStorage>, Arc<StubRemote>, FeedbackService) {
        let medium = Arc::new(InMemoryStorage::new());
        let remote = StubRemote::new(outcome);
        let service = FeedbackService::new(LocalRecordStore::new(medium.clone()), remote.clone());
        (medium, remote, service)
    }

    fn form() -> FeedbackForm {
        FeedbackForm {
            name: "  Ana ".to_string(),
            email: "a@x.com".to_string(),
            topic: "water".to_string(),
            message: "Great, thanks!\n".to_string(),
            rating: "5".to_string(),
            save_local: true,
        }
    }

    #[test]
    fn test_validate_trims_and_stamps() {
        let entry = FeedbackService::validate(&form()).unwrap();
        assert_eq!(entry.name, "Ana");
        assert_eq!(entry.message, "Great, thanks!");
        assert_eq!(entry.topic, "water");
        assert!(entry.at.ends_with('Z'));
    }

    #[test]
    fn test_validate_requires_name_email_message() {
        for blank in ["name", "email", "message"] {
            let mut f = form();
            match blank {
                "name" => f.name = "   ".to_string(),
                "email" => f.email = String::new(),
                _ => f.message = "\t".to_string(),
            }
            assert_eq!(
                FeedbackService::validate(&f).unwrap_err(),
                ValidationError::MissingRequiredFields,
                "blank {} should be rejected",
                blank
            );
        }
    }

    #[tokio::test]
    async fn test_invalid_form_touches_nothing() {
        let (medium, remote, service) = setup(RemoteOutcome::Sent);
        let mut f = form();
        f.email = String::new();

        let err = service.submit(f).await.unwrap_err();

        assert_eq!(err.to_string(), "Please fill all required fields.");
        assert!(medium.is_empty());
        assert!(remote.received.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_submit_without_endpoint_saves_locally() {
        let (_, remote, service) = setup(RemoteOutcome::NotConfigured);
        assert!(service.list_feedback().is_empty());

        let report = service.submit(form()).await.unwrap();

        assert_eq!(report.local, LocalOutcome::Saved);
        assert_eq!(report.remote, RemoteOutcome::NotConfigured);
        assert_eq!(report.message, "Feedback saved locally. (Remote endpoint not configured.)");

        let saved = service.list_feedback();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0], report.entry);
        assert_eq!(remote.received.lock().unwrap()[0].message, "Great, thanks!");
    }

    #[tokio::test]
    async fn test_remote_failure_keeps_local_save() {
        let (_, _, service) = setup(RemoteOutcome::Rejected("Form not found".to_string()));

        let report = service.submit(form()).await.unwrap();

        assert_eq!(report.message, "Saved locally. Failed to send to server: Form not found");
        assert_eq!(service.list_feedback().len(), 1);
    }

    #[tokio::test]
    async fn test_opt_out_skips_local_save() {
        let (medium, _, service) = setup(RemoteOutcome::Sent);
        let mut f = form();
        f.save_local = false;

        let report = service.submit(f).await.unwrap();

        assert_eq!(report.local, LocalOutcome::Skipped);
        assert_eq!(report.message, "Feedback sent to server ✅");
        assert!(medium.is_empty());
    }

    #[tokio::test]
    async fn test_storage_failure_still_sends_remote() {
        let (medium, remote, service) = setup(RemoteOutcome::NetworkError("timeout".to_string()));
        medium.set_available(false);

        let report = service.submit(form()).await.unwrap();

        assert_eq!(report.local, LocalOutcome::Failed);
        assert_eq!(report.message, "Could not save locally. Failed to send to server (network error).");
        assert_eq!(remote.received.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_newest_first_and_clear() {
        let (_, _, service) = setup(RemoteOutcome::NotConfigured);
        let mut first = form();
        first.name = "First".to_string();
        let mut second = form();
        second.name = "Second".to_string();

        service.submit(first).await.unwrap();
        service.submit(second).await.unwrap();

        let names: Vec<String> = service.list_feedback().into_iter().map(|e| e.name).collect();
        assert_eq!(names, vec!["Second", "First"]);

        assert!(service.clear_feedback());
        assert!(service.list_feedback().is_empty());
    }

    #[test]
    fn test_compose_status_messages() {
        assert_eq!(
            compose_status(LocalOutcome::Saved, &RemoteOutcome::Sent),
            "Feedback sent to server and saved locally ✅"
        );
        assert_eq!(
            compose_status(LocalOutcome::Saved, &RemoteOutcome::NetworkError("x".to_string())),
            "Saved locally. Failed to send to server (network error)."
        );
        assert_eq!(
            compose_status(LocalOutcome::Skipped, &RemoteOutcome::NotConfigured),
            "Not saved locally. (Remote endpoint not configured.)"
        );
        assert_eq!(
            compose_status(LocalOutcome::Failed, &RemoteOutcome::Sent),
            "Feedback sent to server, but could not be saved locally."
        );
    }
}
