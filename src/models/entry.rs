use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::emotion::EmotionLabel;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EmotionEntry {
    pub date: NaiveDate,
    pub emotion: EmotionLabel,
    pub intensity: u8,
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl EmotionEntry {
    /// ISO calendar date, also the label drawn on the entry's art.
    pub fn date_label(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpsertEntryRequest {
    /// Defaults to today (UTC)
    pub date: Option<NaiveDate>,

    pub emotion: EmotionLabel,

    #[validate(range(min = 1, max = 10, message = "Intensity must be between 1 and 10"))]
    pub intensity: u8,

    #[validate(length(max = 200, message = "Note must be at most 200 characters"))]
    pub note: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct EntryQuery {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

#[derive(Debug, Serialize)]
pub struct ClearEntriesResponse {
    pub removed: usize,
}
