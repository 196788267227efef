use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::{NaiveDate, Utc};
use uuid::Uuid;
use validator::Validate;

use super::sessions::session_not_found;
use crate::error::AppResult;
use crate::models::entry::{ClearEntriesResponse, EmotionEntry, EntryQuery, UpsertEntryRequest};
use crate::AppState;

pub async fn upsert_entry(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(body): Json<UpsertEntryRequest>,
) -> AppResult<Json<EmotionEntry>> {
    body.validate()?;

    let entry = EmotionEntry {
        date: body.date.unwrap_or_else(|| Utc::now().date_naive()),
        emotion: body.emotion,
        intensity: body.intensity,
        note: body.note.filter(|n| !n.trim().is_empty()),
        created_at: Utc::now(),
    };

    let (replaced, total) = state
        .sessions
        .write(session_id, |store| (store.upsert(entry.clone()), store.len()))
        .await
        .ok_or_else(session_not_found)?;

    tracing::info!(
        session_id = %session_id,
        date = %entry.date,
        emotion = entry.emotion.key(),
        intensity = entry.intensity,
        overwritten = replaced.is_some(),
        total,
        "Emotion entry saved"
    );

    Ok(Json(entry))
}

pub async fn list_entries(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Query(query): Query<EntryQuery>,
) -> AppResult<Json<Vec<EmotionEntry>>> {
    let start = query.start_date.unwrap_or(NaiveDate::MIN);
    let end = query.end_date.unwrap_or(NaiveDate::MAX);

    let entries = state
        .sessions
        .read(session_id, |store| store.range(start, end))
        .await
        .ok_or_else(session_not_found)?;

    Ok(Json(entries))
}

pub async fn clear_entries(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> AppResult<Json<ClearEntriesResponse>> {
    let removed = state
        .sessions
        .write(session_id, |store| store.clear())
        .await
        .ok_or_else(session_not_found)?;

    tracing::info!(session_id = %session_id, removed, "Emotion entries cleared");

    Ok(Json(ClearEntriesResponse { removed }))
}
