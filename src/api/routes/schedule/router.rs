//! Router for the scheduling API

use std::sync::{Arc, RwLock};

use axum::{Json, Router, extract::State, routing::post};
use http::StatusCode;

use super::public;
use crate::api::public::ApiError;
use crate::api::state::AppState;
use crate::scheduler::{self, Scheduler, goals};

type SharedState = Arc<RwLock<AppState>>;

async fn schedule(
    State(state): State<SharedState>,
) -> Result<Json<public::ScheduleResponse>, ApiError> {
    let (tasks, day_start) = {
        let shared_state = state.read().unwrap();
        (shared_state.store.all().to_vec(), shared_state.config.day_start)
    };

    if let Some(task) = scheduler::find_startless_fixed(&tasks) {
        return Err(ApiError::bad_request(format!(
            "Fixed task '{}' is missing a start_time.",
            task.title
        )));
    }

    let scheduled = Scheduler::for_today(day_start).schedule(&tasks);
    Ok(Json(public::ScheduleResponse { scheduled }))
}

async fn add_goal(
    State(state): State<SharedState>,
    Json(spec): Json<public::AddGoalRequest>,
) -> Result<(StatusCode, Json<public::AddGoalResponse>), ApiError> {
    let added = {
        let mut shared_state = state.write().unwrap();
        let day_start = shared_state.config.day_start;
        let base = chrono::Local::now().date_naive().and_time(day_start);
        goals::expand(&mut shared_state.store, base, day_start, &spec)
    };
    tracing::debug!("Expanded goal into {} tasks", added);

    Ok((
        StatusCode::CREATED,
        Json(public::AddGoalResponse {
            status: "success".to_string(),
            added,
        }),
    ))
}

/// Create the scheduling router
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/schedule", post(schedule))
        .route("/add-goal", post(add_goal))
}
