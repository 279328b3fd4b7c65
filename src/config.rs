use serde::Deserialize;
use std::path::PathBuf;

use crate::action::Section;
use crate::error::{FlicksError, Result};
use crate::tmdb::DEFAULT_BASE_URL;

pub const DEFAULT_API_KEY_ENV: &str = "TMDB_API_KEY";

#[derive(Debug, Clone, Deserialize, Default)]
pub struct GeneralConfig {
    #[serde(default)]
    pub start_section: Section,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TmdbConfig {
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
    pub api_key_command: Option<String>,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_language")]
    pub language: String,
}

fn default_api_key_env() -> String {
    DEFAULT_API_KEY_ENV.to_string()
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_language() -> String {
    "en-US".to_string()
}

impl Default for TmdbConfig {
    fn default() -> Self {
        Self {
            api_key_env: default_api_key_env(),
            api_key_command: None,
            base_url: default_base_url(),
            language: default_language(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub tmdb: TmdbConfig,
}

/// ~/.config/flicks (Linux) or ~/Library/Application Support/flicks (macOS)
pub fn config_dir() -> Option<PathBuf> {
    Some(dirs::config_dir()?.join("flicks"))
}

fn config_path() -> Option<PathBuf> {
    Some(config_dir()?.join("config.toml"))
}

impl Config {
    /// Load the config file, falling back to defaults when it is missing or invalid
    pub fn load() -> Self {
        let Some(path) = config_path() else {
            return Config::default();
        };

        let Ok(content) = std::fs::read_to_string(&path) else {
            return Config::default();
        };

        match Config::parse(&content) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "ignoring invalid config");
                Config::default()
            }
        }
    }

    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| FlicksError::Config(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_full_config() {
        let toml_str = r#"
[general]
start_section = "top_rated"

[tmdb]
api_key_env = "MY_TMDB_KEY"
api_key_command = "pass show tmdb"
base_url = "http://localhost:8080/3"
language = "de-DE"
"#;
        let config = Config::parse(toml_str).unwrap();
        assert_eq!(config.general.start_section, Section::TopRated);
        assert_eq!(config.tmdb.api_key_env, "MY_TMDB_KEY");
        assert_eq!(config.tmdb.api_key_command.as_deref(), Some("pass show tmdb"));
        assert_eq!(config.tmdb.base_url, "http://localhost:8080/3");
        assert_eq!(config.tmdb.language, "de-DE");
    }

    #[test]
    fn partial_config_fills_defaults() {
        let config = Config::parse("[tmdb]\nlanguage = \"fr-FR\"\n").unwrap();
        assert_eq!(config.general.start_section, Section::Trending);
        assert_eq!(config.tmdb.api_key_env, DEFAULT_API_KEY_ENV);
        assert_eq!(config.tmdb.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.tmdb.language, "fr-FR");
    }

    #[test]
    fn empty_config_is_default() {
        let config = Config::parse("").unwrap();
        assert_eq!(config.tmdb.language, "en-US");
        assert!(config.tmdb.api_key_command.is_none());
    }

    #[test]
    fn unknown_section_is_an_error() {
        let err = Config::parse("[general]\nstart_section = \"favorites\"\n").unwrap_err();
        assert!(matches!(err, FlicksError::Config(_)));
    }
}
