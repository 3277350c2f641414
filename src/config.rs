//! Configuration management
//!
//! Stores settings in ~/.config/idea-validator/config.json

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use url::Url;

/// Default API origin when nothing is configured.
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8080";

/// Environment variable that overrides the configured API origin.
pub const API_URL_ENV: &str = "VALIDATOR_API_URL";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Origin of the validation API.
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Critic personas pre-selected on the form.
    #[serde(default)]
    pub default_critics: Vec<String>,
    /// If true, restore the last session record on startup.
    #[serde(default = "default_restore_session")]
    pub restore_session: bool,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_restore_session() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            default_critics: Vec::new(),
            restore_session: true,
        }
    }
}

impl Config {
    fn config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("idea-validator"))
    }

    fn config_path() -> Option<PathBuf> {
        Self::config_dir().map(|p| p.join("config.json"))
    }

    /// Load config from disk, or return default. A corrupt file is backed
    /// up and replaced with defaults rather than aborting startup.
    pub fn load() -> Self {
        if let Some(path) = Self::config_path() {
            if let Ok(content) = fs::read_to_string(&path) {
                match serde_json::from_str(&content) {
                    Ok(config) => return config,
                    Err(err) => {
                        preserve_corrupt_config(&path, &content);
                        eprintln!(
                            "  Warning: Config file was corrupted ({}). A backup was saved and defaults were loaded.",
                            err
                        );
                    }
                }
            }
        }
        Self::default()
    }

    /// Save config to disk.
    pub fn save(&self) -> anyhow::Result<()> {
        let dir = Self::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
        fs::create_dir_all(&dir)?;
        let path = dir.join("config.json");
        let content = serde_json::to_string_pretty(self)?;
        fs::write(&path, content)?;
        Ok(())
    }

    /// Resolve the API origin: CLI flag first, then environment, then the
    /// configured value.
    pub fn resolve_api_url(&self, cli_override: Option<&str>) -> anyhow::Result<Url> {
        let raw = if let Some(url) = cli_override {
            url.to_string()
        } else if let Ok(url) = std::env::var(API_URL_ENV) {
            url
        } else {
            self.api_url.clone()
        };
        Url::parse(&raw).map_err(|e| anyhow::anyhow!("Invalid API URL '{}': {}", raw, e))
    }
}

fn preserve_corrupt_config(path: &std::path::Path, content: &str) {
    let corrupt_path = path.with_extension("json.corrupt");
    if fs::rename(path, &corrupt_path).is_err() {
        let _ = fs::write(&corrupt_path, content);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_points_at_localhost() {
        let config = Config::default();
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert!(config.restore_session);
    }

    #[test]
    fn cli_override_wins() {
        let config = Config::default();
        let url = config
            .resolve_api_url(Some("http://validator.example.com"))
            .unwrap();
        assert_eq!(url.as_str(), "http://validator.example.com/");
    }

    #[test]
    fn invalid_url_is_rejected() {
        let config = Config::default();
        assert!(config.resolve_api_url(Some("not a url")).is_err());
    }

    #[test]
    fn partial_config_fills_defaults() {
        let config: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert!(config.default_critics.is_empty());
    }
}
