use anyhow::Result;

use crate::calendar::CalendarEvent;
use crate::client::ScheduleClient;
use crate::core::AppConfig;

pub async fn run(config: &AppConfig) -> Result<()> {
    let client = ScheduleClient::new(&config.api_base_url);
    let events = client.fetch_schedule().await?;
    print_events(&events);
    Ok(())
}

pub fn print_events(events: &[CalendarEvent]) {
    if events.is_empty() {
        println!("Nothing scheduled");
        return;
    }
    for event in events {
        println!(
            "{} - {}  {}  {}",
            event.start, event.end, event.title, event.color
        );
    }
}
