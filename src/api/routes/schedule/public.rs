//! Public types for the scheduling API

use serde::{Deserialize, Serialize};

use crate::scheduler::ScheduledTask;

/// Body of `POST /add-goal`.
pub use crate::scheduler::goals::GoalSpec as AddGoalRequest;

#[derive(Serialize)]
pub struct ScheduleResponse {
    pub scheduled: Vec<ScheduledTask>,
}

#[derive(Serialize, Deserialize)]
pub struct AddGoalResponse {
    pub status: String,
    pub added: usize,
}
