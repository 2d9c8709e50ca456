// src/config.rs

use crate::errors::{Result, SuggestionError};
use std::time::Duration;
use url::Url;

pub const BACKEND_URL_VAR: &str = "SUGGESTIONS_BACKEND_URL";
pub const TIMEOUT_VAR: &str = "SUGGESTIONS_HTTP_TIMEOUT_SECS";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub struct Config {
    pub backend_url: Url,
    pub timeout: Duration,
}

impl Config {
    pub fn new(backend_url: &str) -> Result<Self> {
        Ok(Self {
            backend_url: parse_backend_url(backend_url)?,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        })
    }

    /// Reads the backend location from the environment. `override_url` wins
    /// over `SUGGESTIONS_BACKEND_URL` when given.
    pub fn from_env(override_url: Option<&str>) -> Result<Self> {
        let backend_url = match override_url {
            Some(url) => url.to_string(),
            None => std::env::var(BACKEND_URL_VAR).map_err(|_| {
                SuggestionError::Config(format!("{BACKEND_URL_VAR} environment variable not set"))
            })?,
        };

        let timeout = match std::env::var(TIMEOUT_VAR) {
            Ok(raw) => parse_timeout(&raw)?,
            Err(_) => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        };

        Ok(Self {
            backend_url: parse_backend_url(&backend_url)?,
            timeout,
        })
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Endpoints are joined relative to the base, so it must end in `/`.
fn parse_backend_url(raw: &str) -> Result<Url> {
    let trimmed = raw.trim();
    let with_slash = if trimmed.ends_with('/') {
        trimmed.to_string()
    } else {
        format!("{trimmed}/")
    };

    let url = Url::parse(&with_slash)
        .map_err(|e| SuggestionError::Config(format!("invalid backend url {raw:?}: {e}")))?;

    if url.cannot_be_a_base() {
        return Err(SuggestionError::Config(format!(
            "backend url {raw:?} cannot be used as a base"
        )));
    }

    Ok(url)
}

fn parse_timeout(raw: &str) -> Result<Duration> {
    let secs: u64 = raw
        .trim()
        .parse()
        .map_err(|_| SuggestionError::Config(format!("{TIMEOUT_VAR} must be whole seconds, got {raw:?}")))?;

    if secs == 0 {
        return Err(SuggestionError::Config(format!("{TIMEOUT_VAR} must be positive")));
    }

    Ok(Duration::from_secs(secs))
}
