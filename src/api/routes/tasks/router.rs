//! Router for the task API

use std::sync::{Arc, RwLock};

use axum::{
    Json, Router,
    extract::State,
    routing::{get, post},
};
use http::StatusCode;

use super::public;
use crate::api::public::ApiError;
use crate::api::state::AppState;

type SharedState = Arc<RwLock<AppState>>;

async fn add_task(
    State(state): State<SharedState>,
    Json(draft): Json<public::AddTaskRequest>,
) -> Result<(StatusCode, Json<public::AddTaskResponse>), ApiError> {
    let today = chrono::Local::now().date_naive();
    let task = state.write().unwrap().store.add(draft, today).clone();
    tracing::debug!("Added task: {:?}", task);

    Ok((
        StatusCode::CREATED,
        Json(public::AddTaskResponse {
            status: "success".to_string(),
            task,
        }),
    ))
}

async fn get_tasks(State(state): State<SharedState>) -> Json<public::TaskListResponse> {
    let tasks = state.read().unwrap().store.all().to_vec();
    Json(public::TaskListResponse { tasks })
}

async fn reset_tasks(State(state): State<SharedState>) -> Json<public::StatusResponse> {
    state.write().unwrap().store.clear();
    Json(public::StatusResponse {
        status: "cleared".to_string(),
    })
}

async fn remove_task(
    State(state): State<SharedState>,
    Json(request): Json<public::RemoveTaskRequest>,
) -> Json<public::StatusResponse> {
    state.write().unwrap().store.remove(&request.id);
    Json(public::StatusResponse {
        status: "success".to_string(),
    })
}

async fn move_task(
    State(state): State<SharedState>,
    Json(request): Json<public::MoveTaskRequest>,
) -> Json<public::StatusResponse> {
    state.write().unwrap().store.update_window(
        &request.id,
        request.earliest_time,
        request.latest_time,
    );
    Json(public::StatusResponse {
        status: "success".to_string(),
    })
}

/// Create the task router
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/add-task", post(add_task))
        .route("/get-tasks", get(get_tasks))
        .route("/reset-tasks", post(reset_tasks))
        .route("/remove-task", post(remove_task))
        .route("/move-task", post(move_task))
}
