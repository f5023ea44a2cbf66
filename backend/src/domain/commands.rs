//! Domain-level command and result types.
//!
//! These structs are used by services inside the domain layer and are **not**
//! exposed over the public API. The REST layer maps the DTOs defined in the
//! `shared` crate to these internal types.

pub mod feedback {
    use shared::{FeedbackEntry, SubmitFeedbackRequest};

    use crate::domain::remote_submitter::RemoteOutcome;

    /// Raw feedback form input, before trimming and validation.
    #[derive(Debug, Clone)]
    pub struct FeedbackForm {
        pub name: String,
        pub email: String,
        pub topic: String,
        pub message: String,
        pub rating: String,
        pub save_local: bool,
    }

    impl From<SubmitFeedbackRequest> for FeedbackForm {
        fn from(request: SubmitFeedbackRequest) -> Self {
            Self {
                name: request.name,
                email: request.email,
                topic: request.topic,
                message: request.message,
                rating: request.rating,
                save_local: request.save_local,
            }
        }
    }

    /// What happened to the local copy of a submission.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum LocalOutcome {
        Saved,
        /// The visitor opted out of local saving
        Skipped,
        /// Storage was unavailable or full
        Failed,
    }

    /// Combined result of a feedback submission.
    #[derive(Debug, Clone)]
    pub struct SubmissionReport {
        pub entry: FeedbackEntry,
        pub local: LocalOutcome,
        pub remote: RemoteOutcome,
        pub message: String,
    }
}

pub mod water {
    /// Measurements entered in the water-quality checker. NaN counts as absent.
    #[derive(Debug, Clone, Copy, Default, PartialEq)]
    pub struct WaterSample {
        pub ph: Option<f64>,
        pub turbidity: Option<f64>,
        pub nitrate: Option<f64>,
    }

    impl From<shared::WaterCheckRequest> for WaterSample {
        fn from(request: shared::WaterCheckRequest) -> Self {
            Self {
                ph: request.ph,
                turbidity: request.turbidity,
                nitrate: request.nitrate,
            }
        }
    }

    /// Result of classifying a sample.
    #[derive(Debug, Clone, PartialEq)]
    pub struct WaterCheckReport {
        pub messages: Vec<String>,
        pub saved: bool,
    }

    impl WaterCheckReport {
        /// Messages as a bulleted, newline-separated block
        pub fn summary(&self) -> String {
            self.messages
                .iter()
                .map(|m| format!("• {}", m))
                .collect::<Vec<_>>()
                .join("\n")
        }
    }

    /// Daily household habits fed into the estimator.
    #[derive(Debug, Clone, Copy, Default, PartialEq)]
    pub struct WaterHabits {
        pub shower_minutes: f64,
        pub flushes: f64,
        pub dishes_minutes: f64,
    }

    impl From<shared::WaterEstimateRequest> for WaterHabits {
        fn from(request: shared::WaterEstimateRequest) -> Self {
            Self {
                shower_minutes: request.shower,
                flushes: request.flushes,
                dishes_minutes: request.dishes,
            }
        }
    }
}

pub mod quiz {
    /// A submitted quiz answer.
    #[derive(Debug, Clone, Default)]
    pub struct QuizAnswerCommand {
        pub topic: Option<String>,
        pub choice: Option<String>,
    }

    impl From<shared::QuizAnswerRequest> for QuizAnswerCommand {
        fn from(request: shared::QuizAnswerRequest) -> Self {
            Self {
                topic: request.topic,
                choice: request.choice,
            }
        }
    }

    #[derive(Debug, Clone, PartialEq)]
    pub struct QuizResult {
        pub topic: String,
        pub correct: bool,
        pub message: String,
        pub score_saved: bool,
    }
}
