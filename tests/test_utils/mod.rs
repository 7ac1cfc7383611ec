//! Test utilities for integration tests

use std::sync::{Arc, RwLock};

use axum::Router;
use axum::body::Body;
use chrono::NaiveTime;

use fluidcal::api::{AppState, app};
use fluidcal::core::AppConfig;

/// Creates a test application router with a fresh in-memory task
/// store. Every router handed out is independent, so tests can run in
/// parallel.
pub fn test_app() -> Router {
    let config = AppConfig {
        host: "127.0.0.1".to_string(),
        port: "0".to_string(),
        api_base_url: "http://127.0.0.1:0".to_string(),
        day_start: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
        web_ui_path: "./web-ui".to_string(),
    };
    let app_state = AppState::new(config);
    app(Arc::new(RwLock::new(app_state)))
}

/// Read a response body to a string.
pub async fn body_to_string(body: Body) -> String {
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .expect("Failed to read body");
    String::from_utf8(bytes.to_vec()).expect("Body was not utf-8")
}

/// Read a response body as JSON.
pub async fn body_to_json(body: Body) -> serde_json::Value {
    serde_json::from_str(&body_to_string(body).await).expect("Body was not JSON")
}
