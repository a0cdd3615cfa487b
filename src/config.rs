// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Client configuration loaded from environment variables.
//!
//! The API base URL can also be fixed at build time by setting
//! `STUDY_API_URL` while compiling; the runtime variable still wins.

use std::env;
use std::path::PathBuf;

/// Base URL used when neither the runtime nor the build environment sets one.
/// Matches the development proxy target of the API server.
pub const DEFAULT_API_URL: &str = "http://localhost:8000/api";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Client configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL every API path is appended to (e.g. `https://host/api`)
    pub api_base_url: String,
    /// File holding the persisted bearer token
    pub token_path: PathBuf,
    /// Per-request timeout
    pub request_timeout_secs: u64,
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            api_base_url: build_time_api_url().to_string(),
            token_path: default_token_path(),
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl Config {
    /// Load configuration from environment variables (and `.env` if present).
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let api_base_url =
            env::var("STUDY_API_URL").unwrap_or_else(|_| build_time_api_url().to_string());
        validate_base_url(&api_base_url)?;

        let request_timeout_secs = match env::var("STUDY_HTTP_TIMEOUT_SECS") {
            // Zero would time out every request
            Ok(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => secs,
                _ => return Err(ConfigError::Invalid("STUDY_HTTP_TIMEOUT_SECS", raw)),
            },
            Err(_) => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self {
            api_base_url: api_base_url.trim_end_matches('/').to_string(),
            token_path: env::var("STUDY_TOKEN_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|_| default_token_path()),
            request_timeout_secs,
        })
    }
}

fn build_time_api_url() -> &'static str {
    option_env!("STUDY_API_URL").unwrap_or(DEFAULT_API_URL)
}

fn default_token_path() -> PathBuf {
    dirs::config_dir()
        .map(|dir| dir.join("study-admin").join("token"))
        .unwrap_or_else(|| PathBuf::from(".study-admin-token"))
}

fn validate_base_url(url: &str) -> Result<(), ConfigError> {
    reqwest::Url::parse(url)
        .map(|_| ())
        .map_err(|_| ConfigError::Invalid("STUDY_API_URL", url.to_string()))
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}: {1:?}")]
    Invalid(&'static str, String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_from_env() {
        env::set_var("STUDY_API_URL", "https://study.example.org/api/");
        env::set_var("STUDY_TOKEN_FILE", "/tmp/study-admin-test-token");
        env::set_var("STUDY_HTTP_TIMEOUT_SECS", "5");

        let config = Config::from_env().expect("Config should load");

        assert_eq!(config.api_base_url, "https://study.example.org/api");
        assert_eq!(
            config.token_path,
            PathBuf::from("/tmp/study-admin-test-token")
        );
        assert_eq!(config.request_timeout_secs, 5);

        env::set_var("STUDY_HTTP_TIMEOUT_SECS", "soon");
        assert!(matches!(
            Config::from_env(),
            Err(ConfigError::Invalid("STUDY_HTTP_TIMEOUT_SECS", _))
        ));

        env::set_var("STUDY_HTTP_TIMEOUT_SECS", "0");
        assert!(matches!(
            Config::from_env(),
            Err(ConfigError::Invalid("STUDY_HTTP_TIMEOUT_SECS", _))
        ));

        env::remove_var("STUDY_HTTP_TIMEOUT_SECS");
        env::set_var("STUDY_API_URL", "/api");
        assert!(matches!(
            Config::from_env(),
            Err(ConfigError::Invalid("STUDY_API_URL", _))
        ));

        env::remove_var("STUDY_API_URL");
        env::remove_var("STUDY_TOKEN_FILE");
    }
}
