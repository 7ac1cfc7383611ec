use anyhow::Result;

use super::agenda;
use crate::client::{ScheduleClient, TaskForm};
use crate::core::AppConfig;
use crate::store::Priority;

pub async fn run(
    config: &AppConfig,
    title: String,
    duration: i64,
    priority: Priority,
    fixed: bool,
    start: Option<String>,
) -> Result<()> {
    let client = ScheduleClient::new(&config.api_base_url);
    let form = TaskForm {
        title,
        duration,
        priority,
        fixed,
        start_time: start,
    };
    client.add_task(&form).await?;

    // Submitting refreshes the displayed schedule, like the web form does.
    let events = client.fetch_schedule().await?;
    agenda::print_events(&events);
    Ok(())
}
