use tracing::info;

use shared::QuizScores;

use crate::domain::commands::quiz::{QuizAnswerCommand, QuizResult};
use crate::error::ValidationError;
use crate::storage::keys::QUIZ_SCORES;
use crate::storage::LocalRecordStore;

pub const DEFAULT_TOPIC: &str = "climate";
/// Answer assumed for topics missing from the key
const DEFAULT_ANSWER: &str = "a";

const ANSWER_KEY: [(&str, &str); 6] = [
    ("climate", "b"),
    ("water", "a"),
    ("consumption", "a"),
    ("education", "a"),
    ("definition", "b"),
    ("effects", "b"),
];

pub fn correct_answer(topic: &str) -> &'static str {
    ANSWER_KEY
        .iter()
        .find(|(t, _)| *t == topic)
        .map(|(_, answer)| *answer)
        .unwrap_or(DEFAULT_ANSWER)
}

/// Service for grading quiz answers and keeping per-topic scores
#[derive(Clone)]
pub struct QuizService {
    store: LocalRecordStore,
}

impl QuizService {
    pub fn new(store: LocalRecordStore) -> Self {
        Self { store }
    }

    /// Grade an answer and add it to the topic's score
    pub fn answer(&self, command: QuizAnswerCommand) -> Result<QuizResult, ValidationError> {
        let topic = command
            .topic
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| DEFAULT_TOPIC.to_string());
        let choice = command
            .choice
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .ok_or(ValidationError::NoAnswerChosen)?;

        let correct = choice == correct_answer(&topic);
        let message = if correct {
            "Correct ✅ Great job!"
        } else {
            "Not quite — read the resources and try again!"
        };

        let (_, score_saved) = self.store.modify_value(&QUIZ_SCORES, |scores: &mut QuizScores| {
            *scores.entry(topic.clone()).or_insert(0) += u32::from(correct);
        });
        info!(topic = %topic, correct, "quiz answer graded");

        Ok(QuizResult {
            topic,
            correct,
            message: message.to_string(),
            score_saved,
        })
    }

    pub fn scores(&self) -> QuizScores {
        self.store.load_value(&QUIZ_SCORES).unwrap_or_default()
    }
}
