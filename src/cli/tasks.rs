use anyhow::Result;

use crate::client::ScheduleClient;
use crate::core::AppConfig;

pub async fn run(config: &AppConfig) -> Result<()> {
    let client = ScheduleClient::new(&config.api_base_url);
    let tasks = client.tasks().await?;
    if tasks.is_empty() {
        println!("No tasks");
        return Ok(());
    }
    for task in tasks {
        let kind = if task.fixed { "fixed" } else { "flexible" };
        println!(
            "{}  {}m  {}  {}  {}",
            task.id, task.duration, task.priority, kind, task.title
        );
    }
    Ok(())
}
