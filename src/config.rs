//! Startup configuration — API credential and model id.
//!
//! Loaded once from `<config_dir>/ghost-lens/config.json`:
//!
//! ```json
//! { "apiKey": "...", "model": "gemini-pro-vision" }
//! ```
//!
//! `GEMINI_API_KEY` (also picked up from a local `.env`) fills in when the
//! file has no key; the file value wins when both exist. A missing key is
//! fatal at startup.

use serde::Deserialize;
use std::path::PathBuf;

pub const DEFAULT_MODEL: &str = "gemini-pro-vision";

#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    pub model: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("config file is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("apiKey is missing — add it to {0} or set GEMINI_API_KEY")]
    MissingApiKey(String),
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawConfig {
    api_key: Option<String>,
    model: Option<String>,
}

impl Config {
    /// Platform config file location.
    pub fn path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("ghost-lens")
            .join("config.json")
    }

    /// Load the startup config. Called exactly once, before anything else
    /// is wired up.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let path = Self::path();
        let raw = if path.exists() {
            serde_json::from_str(&std::fs::read_to_string(&path)?)?
        } else {
            RawConfig::default()
        };

        let config = Self::resolve(raw, std::env::var("GEMINI_API_KEY").ok())?;
        log::info!("[CONFIG] model: {}", config.model);
        Ok(config)
    }

    fn resolve(raw: RawConfig, env_key: Option<String>) -> Result<Self, ConfigError> {
        let api_key = raw
            .api_key
            .filter(|key| !key.trim().is_empty())
            .or_else(|| env_key.filter(|key| !key.trim().is_empty()))
            .ok_or_else(|| ConfigError::MissingApiKey(Self::path().display().to_string()))?;

        Ok(Self {
            api_key,
            model: raw.model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(json: &str) -> RawConfig {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn file_key_and_model_are_used() {
        let config =
            Config::resolve(raw(r#"{"apiKey":"k1","model":"gemini-1.5-pro"}"#), None).unwrap();
        assert_eq!(config.api_key, "k1");
        assert_eq!(config.model, "gemini-1.5-pro");
    }

    #[test]
    fn model_defaults_when_absent() {
        let config = Config::resolve(raw(r#"{"apiKey":"k1"}"#), None).unwrap();
        assert_eq!(config.model, DEFAULT_MODEL);
    }

    #[test]
    fn env_key_fills_in() {
        let config = Config::resolve(raw("{}"), Some("env-key".into())).unwrap();
        assert_eq!(config.api_key, "env-key");
    }

    #[test]
    fn file_key_wins_over_env() {
        let config =
            Config::resolve(raw(r#"{"apiKey":"file-key"}"#), Some("env-key".into())).unwrap();
        assert_eq!(config.api_key, "file-key");
    }

    #[test]
    fn missing_key_is_an_error() {
        assert!(matches!(
            Config::resolve(raw("{}"), None),
            Err(ConfigError::MissingApiKey(_))
        ));
    }

    #[test]
    fn blank_key_counts_as_missing() {
        assert!(Config::resolve(raw(r#"{"apiKey":"  "}"#), Some("".into())).is_err());
    }
}
