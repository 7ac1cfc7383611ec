use anyhow::Result;

use crate::client::ScheduleClient;
use crate::core::AppConfig;

pub async fn run(config: &AppConfig) -> Result<()> {
    let client = ScheduleClient::new(&config.api_base_url);
    client.reset().await?;
    println!("Cleared all tasks");
    Ok(())
}
