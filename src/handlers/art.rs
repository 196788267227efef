use axum::{
    extract::{Path, Query, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::sessions::session_not_found;
use crate::art::compose::{
    compose_entry_seeded, compose_week_seeded, emotion_summary, Composition, EntryArt,
};
use crate::art::palette::{label_palette, Palette};
use crate::art::svg::render_svg;
use crate::error::{AppError, AppResult};
use crate::models::emotion::{Emotion, EmotionLabel};
use crate::models::entry::EmotionEntry;
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct EmotionInfo {
    pub key: EmotionLabel,
    pub icon: &'static str,
    pub name: &'static str,
    pub palette: &'static Palette,
}

#[derive(Debug, Deserialize)]
pub struct ArtQuery {
    pub seed: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub struct WeekQuery {
    pub end_date: Option<NaiveDate>,
}

#[derive(Debug, Serialize)]
pub struct WeekResponse {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub entry_count: usize,
    pub summary: Option<String>,
    pub composition: Option<Composition>,
}

/// POST /api/art/preview
#[derive(Debug, Deserialize, Validate)]
pub struct PreviewRequest {
    /// Free text; unknown emotions are drawn with the default palette
    pub emotion: String,
    pub date_label: Option<String>,
    #[validate(length(max = 200, message = "Note must be at most 200 characters"))]
    pub note: Option<String>,
    pub intensity: u8,
    pub seed: Option<u64>,
}

pub async fn list_emotions() -> Json<Vec<EmotionInfo>> {
    let emotions = EmotionLabel::ALL
        .into_iter()
        .map(|label| EmotionInfo {
            key: label,
            icon: label.icon(),
            name: label.name(),
            palette: label_palette(label),
        })
        .collect();
    Json(emotions)
}

async fn load_entry(state: &AppState, session_id: Uuid, date: NaiveDate) -> AppResult<EmotionEntry> {
    state
        .sessions
        .read(session_id, |store| store.get(date).cloned())
        .await
        .ok_or_else(session_not_found)?
        .ok_or_else(|| AppError::NotFound(format!("No entry for {date}")))
}

fn entry_composition(entry: &EmotionEntry, seed: Option<u64>) -> AppResult<Composition> {
    let date_label = entry.date_label();
    let art = EntryArt::from_entry(entry, &date_label);
    let comp = compose_entry_seeded(&art, seed)?;

    tracing::debug!(
        date = %entry.date,
        emotion = entry.emotion.key(),
        layers = comp.shapes.len(),
        "Entry art composed"
    );
    Ok(comp)
}

fn svg_attachment(svg: String, file_name: &str) -> Response {
    (
        [
            (header::CONTENT_TYPE, "image/svg+xml".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{file_name}\""),
            ),
        ],
        svg,
    )
        .into_response()
}

pub async fn get_entry_art(
    State(state): State<AppState>,
    Path((session_id, date)): Path<(Uuid, NaiveDate)>,
    Query(query): Query<ArtQuery>,
) -> AppResult<Json<Composition>> {
    let entry = load_entry(&state, session_id, date).await?;
    Ok(Json(entry_composition(&entry, query.seed)?))
}

pub async fn get_entry_art_svg(
    State(state): State<AppState>,
    Path((session_id, date)): Path<(Uuid, NaiveDate)>,
    Query(query): Query<ArtQuery>,
) -> AppResult<Response> {
    let entry = load_entry(&state, session_id, date).await?;
    let comp = entry_composition(&entry, query.seed)?;
    Ok(svg_attachment(
        render_svg(&comp),
        &format!("emotion_art_{}.svg", entry.date_label()),
    ))
}

async fn load_week(
    state: &AppState,
    session_id: Uuid,
    end_date: Option<NaiveDate>,
) -> AppResult<(NaiveDate, NaiveDate, Vec<EmotionEntry>)> {
    let end = end_date.unwrap_or_else(|| Utc::now().date_naive());
    let start = end
        .checked_sub_signed(Duration::days(6))
        .ok_or_else(|| AppError::Validation("end_date out of range".into()))?;

    let entries = state
        .sessions
        .read(session_id, |store| store.range(start, end))
        .await
        .ok_or_else(session_not_found)?;

    Ok((start, end, entries))
}

pub async fn get_week(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Query(query): Query<WeekQuery>,
) -> AppResult<Json<WeekResponse>> {
    let (start_date, end_date, entries) = load_week(&state, session_id, query.end_date).await?;
    let composition = compose_week_seeded(&entries)?;

    tracing::debug!(
        session_id = %session_id,
        entries = entries.len(),
        layers = composition.as_ref().map_or(0, |c| c.shapes.len()),
        "Weekly art composed"
    );

    Ok(Json(WeekResponse {
        start_date,
        end_date,
        entry_count: entries.len(),
        summary: (!entries.is_empty()).then(|| emotion_summary(&entries)),
        composition,
    }))
}

pub async fn get_week_svg(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Query(query): Query<WeekQuery>,
) -> AppResult<Response> {
    let (start_date, end_date, entries) = load_week(&state, session_id, query.end_date).await?;
    let comp = compose_week_seeded(&entries)?.ok_or_else(|| {
        AppError::NotFound(format!("No entries between {start_date} and {end_date}"))
    })?;

    Ok(svg_attachment(
        render_svg(&comp),
        &format!("emotion_week_{}.svg", end_date.format("%Y-%m-%d")),
    ))
}

pub async fn preview_art(Json(body): Json<PreviewRequest>) -> AppResult<Json<Composition>> {
    body.validate()?;

    let date_label = body
        .date_label
        .clone()
        .unwrap_or_else(|| Utc::now().date_naive().format("%Y-%m-%d").to_string());
    let art = EntryArt {
        emotion: Emotion::parse(&body.emotion),
        date_label: &date_label,
        note: body.note.as_deref(),
        intensity: body.intensity,
    };

    Ok(Json(compose_entry_seeded(&art, body.seed)?))
}
