use anyhow::Result;

use super::agenda;
use crate::client::ScheduleClient;
use crate::core::AppConfig;

pub async fn run(config: &AppConfig, prompt: &str) -> Result<()> {
    let client = ScheduleClient::new(&config.api_base_url);
    if !client.ask(prompt).await? {
        println!("Nothing to ask");
        return Ok(());
    }

    let events = client.fetch_schedule().await?;
    agenda::print_events(&events);
    Ok(())
}
