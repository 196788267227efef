use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::AppState;

pub async fn health_check(State(state): State<AppState>) -> Json<Value> {
    let generation = if state.claude.is_configured() {
        "configured"
    } else {
        "local_only"
    };

    Json(json!({
        "status": "ok",
        "service": "moodcanvas-api",
        "version": env!("CARGO_PKG_VERSION"),
        "checks": { "generation_api": generation },
    }))
}
