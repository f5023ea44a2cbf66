//! # REST API for the Quiz

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use tracing::{info, warn};

use shared::{QuizAnswerRequest, QuizAnswerResponse, QuizScoresResponse};

use crate::domain::commands::quiz::QuizAnswerCommand;
use crate::io::rest::validation_error_response;
use crate::AppState;

/// Create a router for quiz related APIs
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/answer", post(answer_question))
        .route("/scores", get(get_scores))
}

/// Grade an answer and record it in the topic's score
pub async fn answer_question(
    State(state): State<AppState>,
    Json(request): Json<QuizAnswerRequest>,
) -> impl IntoResponse {
    info!("POST /api/quiz/answer - request: {:?}", request);

    match state.quiz_service.answer(QuizAnswerCommand::from(request)) {
        Ok(result) => {
            if !result.score_saved {
                warn!("Quiz score for {} could not be saved", result.topic);
            }
            let response = QuizAnswerResponse {
                topic: result.topic,
                correct: result.correct,
                message: result.message,
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => validation_error_response(&e),
    }
}

pub async fn get_scores(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/quiz/scores");

    let scores = state.quiz_service.scores();
    (StatusCode::OK, Json(QuizScoresResponse { scores }))
}
