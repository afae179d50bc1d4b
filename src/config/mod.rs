use std::env;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_USER_AGENT: &str = "CardFetcher/1.0 (like facebookexternalhit)";
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_FETCH_MAX_RETRIES: u32 = 2;

#[derive(Clone, Debug)]
pub struct Config {
    pub server_host: String,
    pub server_port: u16,
    pub is_production: bool,
    pub check_robots_txt: bool,
    pub fetch_timeout: Duration,
    pub fetch_max_retries: u32,
    pub user_agent: String,
}

impl Config {
    /// Read configuration from the environment (and `.env`, if present).
    /// Missing or unparsable values fall back to their defaults.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Config {
            server_host: env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            server_port: env_parse("SERVER_PORT").unwrap_or(8080),
            is_production: env::var("APP_ENV").as_deref() == Ok("production"),
            check_robots_txt: env_bool("CHECK_ROBOTS_TXT").unwrap_or(true),
            fetch_timeout: env_parse("FETCH_TIMEOUT_SECS")
                .map(Duration::from_secs)
                .unwrap_or(DEFAULT_FETCH_TIMEOUT),
            fetch_max_retries: env_parse("FETCH_MAX_RETRIES").unwrap_or(DEFAULT_FETCH_MAX_RETRIES),
            user_agent: env::var("SCRAPER_USER_AGENT")
                .ok()
                .filter(|ua| !ua.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
        }
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

fn env_parse<T: FromStr>(key: &str) -> Option<T> {
    env::var(key).ok()?.trim().parse().ok()
}

fn env_bool(key: &str) -> Option<bool> {
    match env::var(key).ok()?.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
