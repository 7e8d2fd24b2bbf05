use chrono_tz::Tz;
use std::env;
use std::time::Duration;

#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub server_host: String,
    pub server_port: u16,
    pub store_timezone: Tz,
    pub store_name: String,
    pub schedule_update_timeout: Duration,
    pub strict_split_hours: bool,
    pub admin_api_key: Option<String>,
    pub otel_exporter_endpoint: Option<String>,
    pub service_name: String,
    pub metrics_port: u16,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if it exists
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://storefront.db?mode=rwc".to_string());

        let server_host = env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());

        let server_port = env::var("SERVER_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidPort)?;

        let timezone_name =
            env::var("STORE_TIMEZONE").unwrap_or_else(|_| "America/Los_Angeles".to_string());
        let store_timezone = timezone_name
            .parse::<Tz>()
            .map_err(|_| ConfigError::InvalidTimezone(timezone_name.clone()))?;

        let store_name = env::var("STORE_NAME").unwrap_or_else(|_| "The Donut Nook".to_string());

        let schedule_update_timeout = Duration::from_millis(
            env::var("SCHEDULE_UPDATE_TIMEOUT_MS")
                .ok()
                .and_then(|value| value.parse().ok())
                .unwrap_or(5000),
        );

        let strict_split_hours = env::var("STRICT_SPLIT_HOURS")
            .map(|value| matches!(value.trim().to_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        let admin_api_key = env::var("ADMIN_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty());

        let otel_exporter_endpoint = env::var("OTEL_EXPORTER_OTLP_ENDPOINT").ok();

        let service_name = env::var("SERVICE_NAME").unwrap_or_else(|_| "storefront".to_string());

        let metrics_port = env::var("METRICS_PORT")
            .unwrap_or_else(|_| "9000".to_string())
            .parse()
            .unwrap_or(9000);

        Ok(Config {
            database_url,
            server_host,
            server_port,
            store_timezone,
            store_name,
            schedule_update_timeout,
            strict_split_hours,
            admin_api_key,
            otel_exporter_endpoint,
            service_name,
            metrics_port,
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid port number")]
    InvalidPort,

    #[error("Unknown store timezone: {0}")]
    InvalidTimezone(String),
}
