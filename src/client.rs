//! HTTP client for the scheduling service.
//!
//! This is the programmatic face of the calendar UI surfaces: the task
//! form, the natural-language prompt box, and the schedule view all
//! reduce to the calls here.

use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::calendar::{CalendarEvent, ScheduledTaskRecord, map_events};
use crate::store::{Priority, Task};

/// Draft state for the add-task form.
#[derive(Debug, Clone, Default)]
pub struct TaskForm {
    pub title: String,
    pub duration: i64,
    pub priority: Priority,
    pub fixed: bool,
    pub start_time: Option<String>,
}

impl TaskForm {
    /// Request body for `POST /add-task`. `start_time` is carried only
    /// when the task is fixed, even if a stale value is still sitting
    /// in the form state.
    pub fn request_body(&self) -> Value {
        let mut body = json!({
            "title": self.title,
            "duration": self.duration,
            "priority": self.priority,
            "fixed": self.fixed,
        });
        if self.fixed {
            if let Some(start) = &self.start_time {
                body["start_time"] = json!(start);
            }
        }
        body
    }
}

#[derive(Debug, Deserialize)]
struct ScheduleResponse {
    scheduled: Option<Vec<ScheduledTaskRecord>>,
}

#[derive(Debug, Deserialize)]
struct TaskListResponse {
    tasks: Vec<Task>,
}

pub struct ScheduleClient {
    base_url: String,
    http: reqwest::Client,
}

impl ScheduleClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Fetch the full schedule and map it for display. Every call
    /// replaces the previous event set; nothing is cached.
    pub async fn fetch_schedule(&self) -> Result<Vec<CalendarEvent>> {
        let response = self
            .http
            .post(self.url("/schedule"))
            .json(&json!({}))
            .send()
            .await?
            .error_for_status()?;
        let schedule: ScheduleResponse = response
            .json()
            .await
            .context("Malformed schedule response")?;
        Ok(map_events(schedule.scheduled))
    }

    /// Submit the add-task form.
    pub async fn add_task(&self, form: &TaskForm) -> Result<()> {
        self.http
            .post(self.url("/add-task"))
            .json(&form.request_body())
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    /// Relay a natural-language prompt. Whitespace-only input is
    /// rejected locally and no request goes out; the return value says
    /// whether one did. The response body is never inspected.
    pub async fn ask(&self, prompt: &str) -> Result<bool> {
        let prompt = prompt.trim();
        if prompt.is_empty() {
            return Ok(false);
        }
        self.http
            .post(self.url("/natural-schedule"))
            .json(&json!({ "prompt": prompt }))
            .send()
            .await?
            .error_for_status()?;
        Ok(true)
    }

    /// List the raw, unscheduled tasks.
    pub async fn tasks(&self) -> Result<Vec<Task>> {
        let response = self
            .http
            .get(self.url("/get-tasks"))
            .send()
            .await?
            .error_for_status()?;
        let list: TaskListResponse = response.json().await.context("Malformed task list")?;
        Ok(list.tasks)
    }

    /// Clear every stored task.
    pub async fn reset(&self) -> Result<()> {
        self.http
            .post(self.url("/reset-tasks"))
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    #[tokio::test]
    async fn fetch_schedule_maps_records_to_events() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/schedule")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!({
                    "scheduled": [{
                        "title": "Gym",
                        "date": "2024-06-01",
                        "start_time": "09:00",
                        "end_time": "10:00",
                        "priority": "low"
                    }]
                })
                .to_string(),
            )
            .create_async()
            .await;

        let client = ScheduleClient::new(&server.url());
        let events = client.fetch_schedule().await.unwrap();

        mock.assert_async().await;
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].title, "Gym");
        assert_eq!(events[0].start, "2024-06-01T09:00");
        assert_eq!(events[0].end, "2024-06-01T10:00");
        assert_eq!(events[0].color, "#27ae60");
    }

    #[tokio::test]
    async fn fetch_schedule_treats_a_missing_list_as_empty() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/schedule")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body("{}")
            .create_async()
            .await;

        let client = ScheduleClient::new(&server.url());
        let events = client.fetch_schedule().await.unwrap();
        assert!(events.is_empty());
    }

    #[tokio::test]
    async fn unfixed_forms_never_send_a_start_time() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/add-task")
            .match_body(Matcher::Json(json!({
                "title": "Gym",
                "duration": 60,
                "priority": "low",
                "fixed": false
            })))
            .with_status(201)
            .create_async()
            .await;

        let form = TaskForm {
            title: "Gym".to_string(),
            duration: 60,
            priority: Priority::Low,
            fixed: false,
            // Stale value left over from a previous fixed draft.
            start_time: Some("09:00".to_string()),
        };
        let client = ScheduleClient::new(&server.url());
        client.add_task(&form).await.unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn fixed_forms_carry_their_start_time() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/add-task")
            .match_body(Matcher::Json(json!({
                "title": "Gym",
                "duration": 60,
                "priority": "medium",
                "fixed": true,
                "start_time": "09:00"
            })))
            .with_status(201)
            .create_async()
            .await;

        let form = TaskForm {
            title: "Gym".to_string(),
            duration: 60,
            priority: Priority::Medium,
            fixed: true,
            start_time: Some("09:00".to_string()),
        };
        let client = ScheduleClient::new(&server.url());
        client.add_task(&form).await.unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn whitespace_prompts_issue_no_request() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/natural-schedule")
            .expect(0)
            .create_async()
            .await;

        let client = ScheduleClient::new(&server.url());
        let sent = client.ask("   \n\t ").await.unwrap();

        assert!(!sent);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn prompts_are_forwarded_trimmed() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/natural-schedule")
            .match_body(Matcher::Json(json!({ "prompt": "study for 2 hours" })))
            .with_status(200)
            .create_async()
            .await;

        let client = ScheduleClient::new(&server.url());
        let sent = client.ask("  study for 2 hours  ").await.unwrap();

        assert!(sent);
        mock.assert_async().await;
    }
}
