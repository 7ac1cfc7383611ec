use std::env;

use chrono::NaiveTime;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub host: String,
    pub port: String,
    /// Base URL the client commands talk to.
    pub api_base_url: String,
    /// Time of day the scheduler starts placing flexible tasks.
    pub day_start: NaiveTime,
    /// Directory served for the legacy calendar page.
    pub web_ui_path: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        let host = env::var("FLUIDCAL_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("FLUIDCAL_PORT").unwrap_or_else(|_| "5000".to_string());
        let api_base_url =
            env::var("FLUIDCAL_API_URL").unwrap_or_else(|_| format!("http://{}:{}", host, port));
        let day_start = env::var("FLUIDCAL_DAY_START")
            .ok()
            .and_then(|raw| NaiveTime::parse_from_str(&raw, "%H:%M").ok())
            .unwrap_or_else(|| NaiveTime::from_hms_opt(9, 0, 0).expect("valid time"));
        let web_ui_path =
            env::var("FLUIDCAL_WEB_UI_PATH").unwrap_or_else(|_| "./web-ui".to_string());

        Self {
            host,
            port,
            api_base_url,
            day_start,
            web_ui_path,
        }
    }
}
