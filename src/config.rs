use crate::domain::constants::{
    DEFAULT_CEP_SOURCE, DEFAULT_NOTIFICATION_TTL_MS, DEFAULT_SEARCH_DEBOUNCE_MS,
    DEFAULT_TIMEOUT_MS,
};
use std::{env, fmt::Display, str::FromStr};
use tracing::{info, warn};

#[derive(Debug, Clone)]
pub struct Config {
    pub cep_source: String,
    pub timeout_ms: u64,
    pub notification_ttl_ms: u64,
    pub search_debounce_ms: u64,
}

#[derive(thiserror::Error, Debug)]
#[error("invalid {key} value {value:?}: {reason}")]
pub struct ConfigError {
    pub key: String,
    pub value: String,
    pub reason: String,
}

impl Config {
    pub fn load() -> Result<Self, ConfigError> {
        Ok(Self {
            cep_source: try_load("SOLICITA_CEP_SOURCE", DEFAULT_CEP_SOURCE)?,
            timeout_ms: try_load("SOLICITA_TIMEOUT_MS", &DEFAULT_TIMEOUT_MS.to_string())?,
            notification_ttl_ms: try_load(
                "SOLICITA_NOTIFICATION_TTL_MS",
                &DEFAULT_NOTIFICATION_TTL_MS.to_string(),
            )?,
            search_debounce_ms: try_load(
                "SOLICITA_SEARCH_DEBOUNCE_MS",
                &DEFAULT_SEARCH_DEBOUNCE_MS.to_string(),
            )?,
        })
    }

    /// Command-line flags win over the environment.
    pub fn with_overrides(mut self, cep_source: Option<&str>, timeout_ms: Option<u64>) -> Self {
        if let Some(s) = cep_source {
            self.cep_source = s.to_string();
        }
        if let Some(t) = timeout_ms {
            self.timeout_ms = t;
        }
        self
    }
}

fn try_load<T: FromStr>(key: &str, default: &str) -> Result<T, ConfigError>
where
    T::Err: Display,
{
    let raw = env::var(key).unwrap_or_else(|_| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    });
    raw.trim().parse().map_err(|e: T::Err| {
        warn!("Invalid {key} value: {e}");
        ConfigError {
            key: key.to_string(),
            value: raw.clone(),
            reason: e.to_string(),
        }
    })
}
