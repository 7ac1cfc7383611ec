//! In-memory task storage shared by the API handlers.
//!
//! Tasks live only for the lifetime of the process; there is no durable
//! persistence behind the service.

use std::fmt;

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::time;

/// Task priority. `rank` orders high before medium before low so the
/// scheduler can sort ascending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    pub fn rank(&self) -> u8 {
        match self {
            Priority::High => 0,
            Priority::Medium => 1,
            Priority::Low => 2,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        };
        write!(f, "{}", name)
    }
}

/// One task as held by the service. A fixed task is pinned to its
/// `start_time`; a flexible task is placed by the scheduler, optionally
/// constrained to the `[earliest_time, latest_time]` window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub title: String,
    #[serde(default = "default_duration")]
    pub duration: i64,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub fixed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "time::hhmm_option")]
    pub start_time: Option<NaiveTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "time::hhmm_option")]
    pub earliest_time: Option<NaiveTime>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "time::hhmm_option")]
    pub latest_time: Option<NaiveTime>,
}

/// A task as submitted by a client, before the store assigns an id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskDraft {
    pub title: String,
    #[serde(default = "default_duration")]
    pub duration: i64,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub fixed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "time::hhmm_option")]
    pub start_time: Option<NaiveTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "time::hhmm_option")]
    pub earliest_time: Option<NaiveTime>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "time::hhmm_option")]
    pub latest_time: Option<NaiveTime>,
}

impl Default for TaskDraft {
    fn default() -> Self {
        Self {
            title: String::new(),
            duration: default_duration(),
            priority: Priority::default(),
            fixed: false,
            start_time: None,
            date: None,
            earliest_time: None,
            latest_time: None,
        }
    }
}

fn default_duration() -> i64 {
    60
}

impl Task {
    pub fn from_draft(draft: TaskDraft) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: draft.title,
            duration: draft.duration,
            priority: draft.priority,
            fixed: draft.fixed,
            start_time: draft.start_time,
            date: draft.date,
            earliest_time: draft.earliest_time,
            latest_time: draft.latest_time,
        }
    }
}

#[derive(Debug, Default)]
pub struct TaskStore {
    tasks: Vec<Task>,
}

impl TaskStore {
    /// Add a task, tagging it with `default_date` when the draft does
    /// not name a date of its own.
    pub fn add(&mut self, draft: TaskDraft, default_date: NaiveDate) -> &Task {
        let mut task = Task::from_draft(draft);
        if task.date.is_none() {
            task.date = Some(default_date);
        }
        self.tasks.push(task);
        self.tasks.last().expect("just pushed")
    }

    /// Remove by id. Removing an unknown id is not an error.
    pub fn remove(&mut self, id: &str) {
        self.tasks.retain(|task| task.id != id);
    }

    /// Update a task's window; the task gets rescheduled on the next
    /// `/schedule` call. Returns whether a task matched.
    pub fn update_window(
        &mut self,
        id: &str,
        earliest: Option<NaiveTime>,
        latest: Option<NaiveTime>,
    ) -> bool {
        for task in &mut self.tasks {
            if task.id == id {
                if earliest.is_some() {
                    task.earliest_time = earliest;
                }
                if latest.is_some() {
                    task.latest_time = latest;
                }
                return true;
            }
        }
        false
    }

    pub fn clear(&mut self) {
        self.tasks.clear();
    }

    pub fn all(&self) -> &[Task] {
        &self.tasks
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}
