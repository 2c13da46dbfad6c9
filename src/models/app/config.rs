use crate::error::ConfigError;
use std::env;
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "http://localhost:8000/api";
const DEFAULT_RETARDO_MS: u64 = 1000;

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub api_url: String,
    /// Minimum latency before every accept/reject call. Zero disables it.
    pub retardo_minimo: Duration,
    /// `None` leaves reqwest's default in place.
    pub timeout: Option<Duration>,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            retardo_minimo: Duration::from_millis(DEFAULT_RETARDO_MS),
            timeout: None,
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Loads `.env` if present, then the `SALUDTOTAL_*` variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenv::dotenv();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();

        if let Some(url) = lookup("SALUDTOTAL_API_URL") {
            let url = url.trim().trim_end_matches('/').to_string();
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(ConfigError::UrlBase(url));
            }
            config.api_url = url;
        }

        if let Some(raw) = lookup("SALUDTOTAL_RETARDO_MS") {
            let ms = raw.trim().parse::<u64>().map_err(|_| ConfigError::Invalida {
                variable: "SALUDTOTAL_RETARDO_MS",
                valor: raw.clone(),
            })?;
            config.retardo_minimo = Duration::from_millis(ms);
        }

        if let Some(raw) = lookup("SALUDTOTAL_TIMEOUT_SECS") {
            let secs = raw.trim().parse::<u64>().map_err(|_| ConfigError::Invalida {
                variable: "SALUDTOTAL_TIMEOUT_SECS",
                valor: raw.clone(),
            })?;
            config.timeout = Some(Duration::from_secs(secs));
        }

        if let Some(level) = lookup("SALUDTOTAL_LOG") {
            config.log_level = level.trim().to_lowercase();
        }

        Ok(config)
    }
}
