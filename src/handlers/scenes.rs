use axum::{extract::State, Json};
use chrono::Utc;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::models::scene::{SceneRequest, SceneResponse};
use crate::services::scene::{generate_scene, scene_file_name};
use crate::AppState;

pub async fn create_scene(
    State(state): State<AppState>,
    Json(body): Json<SceneRequest>,
) -> AppResult<Json<SceneResponse>> {
    body.validate()?;
    if body.prompt.trim().is_empty() {
        return Err(AppError::Validation("Please enter a scene description".into()));
    }

    let now = Utc::now();
    let scene = generate_scene(&state.claude, &body, now).await?;

    tracing::info!(
        role = ?body.role,
        language = body.language.code(),
        source = ?scene.source,
        "Scene generated"
    );

    Ok(Json(SceneResponse {
        content: scene.content,
        source: scene.source,
        file_name: scene_file_name(&body, now),
        fallback_reason: scene.fallback_reason,
    }))
}
