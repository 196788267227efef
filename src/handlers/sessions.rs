use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use uuid::Uuid;

use crate::error::AppError;
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub session_id: Uuid,
}

pub async fn create_session(State(state): State<AppState>) -> (StatusCode, Json<SessionResponse>) {
    let session_id = state.sessions.create().await;
    tracing::info!(session_id = %session_id, "Diary session created");
    (StatusCode::CREATED, Json(SessionResponse { session_id }))
}

pub fn session_not_found() -> AppError {
    AppError::NotFound("Session not found".into())
}
