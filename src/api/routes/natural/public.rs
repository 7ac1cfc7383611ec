//! Public types for the natural-language intake API

use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize)]
pub struct NaturalScheduleRequest {
    pub prompt: String,
}

#[derive(Serialize, Deserialize)]
pub struct NaturalScheduleResponse {
    pub status: String,
    pub added: usize,
}
