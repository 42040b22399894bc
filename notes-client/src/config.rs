use std::env;
use std::time::Duration;

/// Environment variable names - single source of truth
pub mod env_vars {
    /// Base URL of the notes backend
    pub const API_URL: &str = "NOTES_API_URL";
    pub const HTTP_TIMEOUT_SECS: &str = "NOTES_HTTP_TIMEOUT_SECS";
    /// How long a notification stays visible
    pub const NOTIFICATION_SECS: &str = "NOTES_NOTIFICATION_SECS";
}

/// Default values
pub mod defaults {
    pub const API_URL: &str = "http://127.0.0.1:8080";
    pub const HTTP_TIMEOUT_SECS: u64 = 10;
    pub const NOTIFICATION_SECS: u64 = 3;
}

#[derive(Clone, Debug)]
pub struct ClientConfig {
    pub api_url: String,
    pub http_timeout: Duration,
    pub notification_duration: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: defaults::API_URL.to_string(),
            http_timeout: Duration::from_secs(defaults::HTTP_TIMEOUT_SECS),
            notification_duration: Duration::from_secs(defaults::NOTIFICATION_SECS),
        }
    }
}

impl ClientConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let secs = |key: &str| -> Option<u64> {
            let raw = lookup(key)?;
            match raw.trim().parse::<u64>() {
                Ok(v) if v > 0 => Some(v),
                _ => {
                    log::warn!("Ignoring invalid {}={:?}", key, raw);
                    None
                }
            }
        };

        Self {
            api_url: lookup(env_vars::API_URL)
                .map(|url| url.trim().trim_end_matches('/').to_string())
                .filter(|url| !url.is_empty())
                .unwrap_or(defaults.api_url),
            http_timeout: secs(env_vars::HTTP_TIMEOUT_SECS)
                .map(Duration::from_secs)
                .unwrap_or(defaults.http_timeout),
            notification_duration: secs(env_vars::NOTIFICATION_SECS)
                .map(Duration::from_secs)
                .unwrap_or(defaults.notification_duration),
        }
    }
}
