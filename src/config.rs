use std::env;
use std::time::Duration;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub port: u16,
    pub api_url: String,
    pub database_url: String,
    pub toast_ttl: Duration,
    pub api_timeout: Duration,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),
            api_url: env::var("API_URL").unwrap_or_else(|_| "http://localhost:8001".to_string()),
            database_url: env::var("DATABASE_URL").unwrap_or_else(|_| "slotdesk.db".to_string()),
            toast_ttl: Duration::from_secs(
                env::var("TOAST_TTL_SECS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(5),
            ),
            api_timeout: Duration::from_secs(
                env::var("API_TIMEOUT_SECS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(30),
            ),
        }
    }
}
