//! Router for the natural-language intake API

use std::sync::{Arc, RwLock};

use axum::{Json, Router, extract::State, routing::post};

use super::public;
use crate::api::public::ApiError;
use crate::api::state::AppState;
use crate::natural::Command;
use crate::scheduler::goals;

type SharedState = Arc<RwLock<AppState>>;

async fn natural_schedule(
    State(state): State<SharedState>,
    Json(request): Json<public::NaturalScheduleRequest>,
) -> Result<Json<public::NaturalScheduleResponse>, ApiError> {
    let prompt = request.prompt.trim().to_string();
    if prompt.is_empty() {
        return Err(ApiError::bad_request("Prompt must not be empty."));
    }

    let interpreter = state.read().unwrap().interpreter.clone();
    let today = chrono::Local::now().date_naive();
    let commands = interpreter.interpret(&prompt, today).await?;

    let added = {
        let mut shared_state = state.write().unwrap();
        let day_start = shared_state.config.day_start;
        let mut added = 0;
        for command in commands {
            match command {
                Command::AddTask(draft) => {
                    shared_state.store.add(draft, today);
                    added += 1;
                }
                Command::AddGoal(spec) => {
                    added += goals::expand(
                        &mut shared_state.store,
                        today.and_time(day_start),
                        day_start,
                        &spec,
                    );
                }
            }
        }
        added
    };
    tracing::debug!("Interpreted prompt into {} new tasks", added);

    Ok(Json(public::NaturalScheduleResponse {
        status: "success".to_string(),
        added,
    }))
}

/// Create the natural-language intake router
pub fn router() -> Router<SharedState> {
    Router::new().route("/natural-schedule", post(natural_schedule))
}
