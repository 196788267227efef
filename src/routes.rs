use axum::{
    http::{header, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::AppState;

fn cors_layer(state: &AppState) -> CorsLayer {
    let origins: Vec<HeaderValue> = std::iter::once(&state.config.frontend_url)
        .chain(state.config.cors_extra_origins.iter())
        .filter_map(|o| match o.parse::<HeaderValue>() {
            Ok(hv) => Some(hv),
            Err(_) => {
                tracing::warn!(origin = %o, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
}

pub fn router(state: AppState) -> Router {
    let session_routes = Router::new()
        .route("/api/sessions", post(handlers::sessions::create_session))
        .route(
            "/api/sessions/:session_id/entries",
            post(handlers::entries::upsert_entry)
                .get(handlers::entries::list_entries)
                .delete(handlers::entries::clear_entries),
        )
        .route(
            "/api/sessions/:session_id/art/:date",
            get(handlers::art::get_entry_art),
        )
        .route(
            "/api/sessions/:session_id/art/:date/svg",
            get(handlers::art::get_entry_art_svg),
        )
        .route("/api/sessions/:session_id/week", get(handlers::art::get_week))
        .route(
            "/api/sessions/:session_id/week/svg",
            get(handlers::art::get_week_svg),
        );

    let public_routes = Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/api/emotions", get(handlers::art::list_emotions))
        .route("/api/art/preview", post(handlers::art::preview_art))
        .route("/api/scenes", post(handlers::scenes::create_scene));

    let cors = cors_layer(&state);

    Router::new()
        .merge(public_routes)
        .merge(session_routes)
        .layer(cors)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::services::claude::ClaudeClient;
    use crate::store::SessionStore;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tower::ServiceExt;

    fn test_state() -> AppState {
        let config = Config::default();
        AppState {
            claude: ClaudeClient::from_config(&config).unwrap(),
            config: Arc::new(config),
            sessions: SessionStore::new(),
        }
    }

    async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Vec<u8>) {
        let builder = Request::builder().method(method).uri(uri);
        let req = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        let resp = app.clone().oneshot(req).await.unwrap();
        let status = resp.status();
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        (status, bytes.to_vec())
    }

    async fn send_json(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let (status, bytes) = send(app, method, uri, body).await;
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    async fn new_session(app: &Router) -> String {
        let (status, body) = send_json(app, "POST", "/api/sessions", None).await;
        assert_eq!(status, StatusCode::CREATED);
        body["session_id"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_health() {
        let app = router(test_state());
        let (status, body) = send_json(&app, "GET", "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["checks"]["generation_api"], "local_only");
    }

    #[tokio::test]
    async fn test_list_emotions() {
        let app = router(test_state());
        let (status, body) = send_json(&app, "GET", "/api/emotions", None).await;
        assert_eq!(status, StatusCode::OK);
        let list = body.as_array().unwrap();
        assert_eq!(list.len(), 8);
        assert_eq!(list[0]["key"], "happy");
        assert_eq!(list[0]["palette"].as_array().unwrap().len(), 5);
    }

    #[tokio::test]
    async fn test_entry_upsert_overwrites_and_lists() {
        let app = router(test_state());
        let sid = new_session(&app).await;
        let uri = format!("/api/sessions/{sid}/entries");

        let (status, _) = send_json(
            &app,
            "POST",
            &uri,
            Some(json!({"date": "2026-02-10", "emotion": "happy", "intensity": 6})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) = send_json(
            &app,
            "POST",
            &uri,
            Some(json!({"date": "2026-02-10", "emotion": "sad", "intensity": 2, "note": "rain"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["emotion"], "sad");

        let (_, body) = send_json(&app, "GET", &uri, None).await;
        let entries = body.as_array().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0]["note"], "rain");
    }

    #[tokio::test]
    async fn test_entry_validation() {
        let app = router(test_state());
        let sid = new_session(&app).await;
        let uri = format!("/api/sessions/{sid}/entries");

        let (status, body) = send_json(
            &app,
            "POST",
            &uri,
            Some(json!({"emotion": "happy", "intensity": 11})),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"]["code"], 422);
    }

    #[tokio::test]
    async fn test_unknown_session_is_not_found() {
        let app = router(test_state());
        let uri = format!("/api/sessions/{}/entries", uuid::Uuid::new_v4());
        let (status, _) = send_json(&app, "GET", &uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_clear_entries() {
        let app = router(test_state());
        let sid = new_session(&app).await;
        let uri = format!("/api/sessions/{sid}/entries");
        for day in ["2026-02-09", "2026-02-10"] {
            send_json(
                &app,
                "POST",
                &uri,
                Some(json!({"date": day, "emotion": "calm", "intensity": 3})),
            )
            .await;
        }

        let (status, body) = send_json(&app, "DELETE", &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["removed"], 2);

        let (_, body) = send_json(&app, "GET", &uri, None).await;
        assert!(body.as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_entry_art_is_reproducible() {
        let app = router(test_state());
        let sid = new_session(&app).await;
        send_json(
            &app,
            "POST",
            &format!("/api/sessions/{sid}/entries"),
            Some(json!({"date": "2026-02-10", "emotion": "excited", "intensity": 4})),
        )
        .await;

        let uri = format!("/api/sessions/{sid}/art/2026-02-10");
        let (status, first) = send_json(&app, "GET", &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        let (_, second) = send_json(&app, "GET", &uri, None).await;
        assert_eq!(first, second);
        assert_eq!(first["shapes"].as_array().unwrap().len(), 11);
        assert_eq!(first["texts"][0]["text"], "2026-02-10");

        let (status, _) =
            send_json(&app, "GET", &format!("/api/sessions/{sid}/art/2026-02-11"), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_entry_art_svg_download() {
        let app = router(test_state());
        let sid = new_session(&app).await;
        send_json(
            &app,
            "POST",
            &format!("/api/sessions/{sid}/entries"),
            Some(json!({"date": "2026-02-10", "emotion": "loved", "intensity": 1})),
        )
        .await;

        let req = Request::builder()
            .uri(format!("/api/sessions/{sid}/art/2026-02-10/svg"))
            .body(Body::empty())
            .unwrap();
        let resp = app.clone().oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers()["content-type"], "image/svg+xml");
        assert_eq!(
            resp.headers()["content-disposition"],
            "attachment; filename=\"emotion_art_2026-02-10.svg\""
        );
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        assert!(String::from_utf8(bytes.to_vec()).unwrap().starts_with("<svg"));
    }

    #[tokio::test]
    async fn test_week_empty_and_summary() {
        let app = router(test_state());
        let sid = new_session(&app).await;
        let week_uri = format!("/api/sessions/{sid}/week?end_date=2026-02-15");

        let (status, body) = send_json(&app, "GET", &week_uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["composition"].is_null());
        assert_eq!(body["entry_count"], 0);

        let (status, _) = send(
            &app,
            "GET",
            &format!("/api/sessions/{sid}/week/svg?end_date=2026-02-15"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let entries_uri = format!("/api/sessions/{sid}/entries");
        for (day, emotion) in [
            ("2026-02-01", "angry"),
            ("2026-02-10", "happy"),
            ("2026-02-11", "happy"),
            ("2026-02-12", "sad"),
        ] {
            send_json(
                &app,
                "POST",
                &entries_uri,
                Some(json!({"date": day, "emotion": emotion, "intensity": 5})),
            )
            .await;
        }

        let (_, body) = send_json(&app, "GET", &week_uri, None).await;
        assert_eq!(body["start_date"], "2026-02-09");
        assert_eq!(body["entry_count"], 3);
        assert_eq!(body["summary"], "😊 2 • 😢 1");
        assert_eq!(body["composition"]["shapes"].as_array().unwrap().len(), 9);
    }

    #[tokio::test]
    async fn test_week_end_date_near_min_is_rejected() {
        let app = router(test_state());
        let session = new_session(&app).await;

        for suffix in ["week", "week/svg"] {
            let uri = format!(
                "/api/sessions/{session}/{suffix}?end_date={}",
                chrono::NaiveDate::MIN
            );
            let (status, body) = send_json(&app, "GET", &uri, None).await;
            assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
            assert_eq!(body["error"]["message"], "end_date out of range");
        }
    }

    #[tokio::test]
    async fn test_preview_unknown_emotion_and_bad_intensity() {
        let app = router(test_state());
        let (status, body) = send_json(
            &app,
            "POST",
            "/api/art/preview",
            Some(json!({"emotion": "wistful", "date_label": "day one", "intensity": 3, "seed": 1})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["texts"][1]["text"], "🎨 wistful");

        let (status, _) = send_json(
            &app,
            "POST",
            "/api/art/preview",
            Some(json!({"emotion": "happy", "intensity": 0})),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_scene_local_generation() {
        let app = router(test_state());
        let (status, body) = send_json(
            &app,
            "POST",
            "/api/scenes",
            Some(json!({
                "role": "cinematographer",
                "prompt": "A lighthouse keeper receives a letter.",
                "characters": "Mara, Teo",
                "use_ai": true
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["source"], "local");
        assert!(body["fallback_reason"].is_string());
        assert!(body["file_name"]
            .as_str()
            .unwrap()
            .starts_with("scene_Cinematographer_en_"));
        assert!(body["content"].as_str().unwrap().contains("- Mara: brief note"));
    }

    #[tokio::test]
    async fn test_scene_without_fallback_reports_bad_gateway() {
        let app = router(test_state());
        let (status, body) = send_json(
            &app,
            "POST",
            "/api/scenes",
            Some(json!({
                "role": "playwright",
                "prompt": "A storm knocks out the power.",
                "use_ai": true,
                "allow_fallback": false
            })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["error"]["code"], 502);
    }

    #[tokio::test]
    async fn test_scene_blank_prompt_rejected() {
        let app = router(test_state());
        let (status, _) = send_json(
            &app,
            "POST",
            "/api/scenes",
            Some(json!({"role": "screenwriter", "prompt": "   "})),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }
}
