use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::chat::DEFAULT_REPLY_DELAY;
use crate::error::{DashboardError, Result};
use crate::ring::RingSpec;

#[derive(Debug, Clone)]
pub struct DashboardConfig {
    pub backend_url: String,
    pub host: String,
    pub port: u16,
    pub reply_delay: Duration,
    pub ring: RingSpec,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        DashboardConfig {
            backend_url: "http://127.0.0.1:5000".to_string(),
            host: "127.0.0.1".to_string(),
            port: 8080,
            reply_delay: DEFAULT_REPLY_DELAY,
            ring: RingSpec::default(),
        }
    }
}

impl DashboardConfig {
    /// Reads `.env` if present, then the process environment.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = DashboardConfig::default();

        let backend_url = lookup("SCORECARD_BACKEND_URL").unwrap_or(defaults.backend_url);
        if !backend_url.starts_with("http://") && !backend_url.starts_with("https://") {
            return Err(DashboardError::config(format!(
                "SCORECARD_BACKEND_URL must be an http(s) URL, got {}",
                backend_url
            )));
        }

        let host = lookup("HOST").unwrap_or(defaults.host);
        let port = parse_var(&lookup, "PORT", defaults.port)?;
        let delay_ms = parse_var(&lookup, "CHAT_REPLY_DELAY_MS", defaults.reply_delay.as_millis() as u64)?;

        Ok(DashboardConfig {
            backend_url,
            host,
            port,
            reply_delay: Duration::from_millis(delay_ms),
            ring: defaults.ring,
        })
    }
}

fn parse_var<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| DashboardError::config(format!("{} has invalid value {:?}", key, raw))),
        None => Ok(default),
    }
}
