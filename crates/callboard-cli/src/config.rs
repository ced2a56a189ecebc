//! Configuration management for Callboard CLI
//!
//! Stores the backend URL, auth token and polling settings in
//! ~/.config/callboard/config.toml. Environment variables and command-line
//! flags override the file.

use anyhow::{Context, Result};
use callboard::{ApiConfig, Credential, ListConfig, ResponseOrdering, DEFAULT_API_URL};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

const CONFIG_DIR: &str = "callboard";
const CONFIG_FILE: &str = "config.toml";

pub const ENV_API_URL: &str = "CALLBOARD_API_URL";
pub const ENV_AUTH_TOKEN: &str = "CALLBOARD_AUTH_TOKEN";
pub const ENV_POLL_INTERVAL_MS: &str = "CALLBOARD_POLL_INTERVAL_MS";
pub const ENV_RESPONSE_ORDERING: &str = "CALLBOARD_RESPONSE_ORDERING";

/// Values given on the command line
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub api_url: Option<String>,
    pub auth_token: Option<String>,
    pub poll_interval_ms: Option<u64>,
}

/// CLI Configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_api_url")]
    pub api_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auth_token: Option<String>,
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_ordering: Option<String>,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_poll_interval_ms() -> u64 {
    callboard::DEFAULT_POLL_INTERVAL.as_millis() as u64
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            auth_token: None,
            poll_interval_ms: default_poll_interval_ms(),
            response_ordering: None,
        }
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("api_url", &self.api_url)
            .field("auth_token", &self.auth_token.as_ref().map(|_| "***"))
            .field("poll_interval_ms", &self.poll_interval_ms)
            .field("response_ordering", &self.response_ordering)
            .finish()
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not determine config directory")?
            .join(CONFIG_DIR);
        Ok(config_dir)
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILE))
    }

    /// Load config from file, or create default
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;

        Self::parse(&content)
    }

    fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse config file")
    }

    /// Save config to file
    pub fn save(&self) -> Result<()> {
        let dir = Self::config_dir()?;
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create config directory {:?}", dir))?;

        let path = Self::config_path()?;
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(&path, content)
            .with_context(|| format!("Failed to write config to {:?}", path))?;

        tracing::debug!(path = ?path, "Saved config");
        Ok(())
    }

    /// Load the file, then apply environment and flag overrides
    pub fn resolve(overrides: &Overrides) -> Result<Self> {
        let mut config = Self::load()?;
        config.apply_env(|key| std::env::var(key).ok())?;
        config.apply_overrides(overrides);
        tracing::debug!(config = ?config, "Resolved configuration");
        Ok(config)
    }

    /// Apply `CALLBOARD_*` variables found through `lookup`
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_API_URL) {
            self.api_url = url;
        }
        if let Some(token) = lookup(ENV_AUTH_TOKEN) {
            self.auth_token = Some(token);
        }
        if let Some(raw) = lookup(ENV_POLL_INTERVAL_MS) {
            self.poll_interval_ms = raw
                .trim()
                .parse()
                .map_err(|_| callboard::ConfigError::InvalidInterval(raw.clone()))?;
        }
        if let Some(ordering) = lookup(ENV_RESPONSE_ORDERING) {
            self.response_ordering = Some(ordering);
        }
        Ok(())
    }

    pub fn apply_overrides(&mut self, overrides: &Overrides) {
        if let Some(url) = &overrides.api_url {
            self.api_url = url.clone();
        }
        if let Some(token) = &overrides.auth_token {
            self.auth_token = Some(token.clone());
        }
        if let Some(ms) = overrides.poll_interval_ms {
            self.poll_interval_ms = ms;
        }
    }

    /// Set auth token
    pub fn set_auth_token(&mut self, token: String) {
        self.auth_token = Some(token);
    }

    /// Backend connection settings. Fails when no token is configured.
    pub fn api_config(&self) -> Result<ApiConfig> {
        let token = self
            .auth_token
            .clone()
            .ok_or(callboard::ConfigError::MissingToken)?;
        let config = ApiConfig::new(&self.api_url, Credential::new(token)?)?;
        Ok(config)
    }

    pub fn ordering(&self) -> Result<ResponseOrdering> {
        match &self.response_ordering {
            Some(raw) => Ok(raw.parse()?),
            None => Ok(ResponseOrdering::default()),
        }
    }

    pub fn list_config(&self) -> Result<ListConfig> {
        if self.poll_interval_ms == 0 {
            return Err(callboard::ConfigError::InvalidInterval("0".to_string()).into());
        }
        Ok(ListConfig::default()
            .with_poll_interval(Duration::from_millis(self.poll_interval_ms))
            .with_ordering(self.ordering()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.api_url, "http://localhost:8000/api");
        assert_eq!(config.poll_interval_ms, 2000);
        assert!(config.auth_token.is_none());
        assert_eq!(config.ordering().unwrap(), ResponseOrdering::IssueOrder);
    }

    #[test]
    fn test_parse_partial_file() {
        let config = Config::parse("auth_token = \"abc\"\n").unwrap();
        assert_eq!(config.api_url, "http://localhost:8000/api");
        assert_eq!(config.auth_token.as_deref(), Some("abc"));
        assert_eq!(config.poll_interval_ms, 2000);
    }

    #[test]
    fn test_no_token_is_an_error() {
        let err = Config::default().api_config().unwrap_err();
        assert!(err.to_string().contains("No auth token configured"));
    }

    #[test]
    fn test_env_then_flags_precedence() {
        let mut config = Config::parse("api_url = \"http://file/api\"\nauth_token = \"file\"\n").unwrap();
        config
            .apply_env(env(&[
                (ENV_API_URL, "http://env/api"),
                (ENV_AUTH_TOKEN, "env"),
                (ENV_RESPONSE_ORDERING, "arrival"),
            ]))
            .unwrap();
        assert_eq!(config.api_url, "http://env/api");
        assert_eq!(config.auth_token.as_deref(), Some("env"));
        assert_eq!(config.ordering().unwrap(), ResponseOrdering::ArrivalOrder);

        config.apply_overrides(&Overrides {
            auth_token: Some("flag".to_string()),
            poll_interval_ms: Some(500),
            ..Default::default()
        });
        assert_eq!(config.api_url, "http://env/api");
        assert_eq!(config.auth_token.as_deref(), Some("flag"));
        assert_eq!(config.list_config().unwrap().poll_interval, Duration::from_millis(500));
    }

    #[test]
    fn test_bad_interval_rejected() {
        let mut config = Config::default();
        assert!(config.apply_env(env(&[(ENV_POLL_INTERVAL_MS, "soon")])).is_err());

        config.poll_interval_ms = 0;
        assert!(config.list_config().is_err());
    }

    #[test]
    fn test_debug_redacts_token() {
        let mut config = Config::default();
        config.set_auth_token("very-secret".to_string());
        let debug = format!("{:?}", config);
        assert!(!debug.contains("very-secret"));
        assert!(debug.contains("***"));
    }

    #[test]
    fn test_api_config_from_file_values() {
        let mut config = Config::default();
        config.set_auth_token("abc".to_string());
        config.api_url = "http://example.test/api/".to_string();
        let api = config.api_config().unwrap();
        assert_eq!(api.base_url(), "http://example.test/api");
    }
}
