//! Public types for the task API

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::core::time;
use crate::store::Task;

/// Body of `POST /add-task`; the draft is stored as-is with a fresh id.
pub use crate::store::TaskDraft as AddTaskRequest;

#[derive(Serialize, Deserialize)]
pub struct AddTaskResponse {
    pub status: String,
    pub task: Task,
}

#[derive(Serialize, Deserialize)]
pub struct TaskListResponse {
    pub tasks: Vec<Task>,
}

#[derive(Serialize, Deserialize)]
pub struct RemoveTaskRequest {
    pub id: String,
}

#[derive(Serialize, Deserialize)]
pub struct MoveTaskRequest {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "time::hhmm_option")]
    pub earliest_time: Option<NaiveTime>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "time::hhmm_option")]
    pub latest_time: Option<NaiveTime>,
}

#[derive(Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: String,
}
