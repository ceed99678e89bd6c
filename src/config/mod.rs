//! Configuration management for HTTP code snippets.
//!
//! Configuration is read from a settings JSON value under the
//! "http-code-snippets" key, merged with defaults and kept in a process-wide
//! singleton that widgets consult when they are created.

pub mod schema;

pub use schema::{JavaFramework, SnippetConfig};

use once_cell::sync::Lazy;
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::sync::RwLock;
use thiserror::Error;

/// Key holding this crate's settings inside a settings document.
pub const SETTINGS_KEY: &str = "http-code-snippets";

/// Global configuration instance.
static CONFIG: Lazy<RwLock<SnippetConfig>> = Lazy::new(|| RwLock::new(SnippetConfig::default()));

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The merged configuration failed validation.
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    /// The settings file could not be read.
    #[error("Failed to read settings file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The settings file is not valid JSON.
    #[error("Failed to parse settings file {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Loads configuration from a settings JSON value.
///
/// Reads the "http-code-snippets" settings, falls back to defaults if they
/// cannot be deserialized, validates the result and updates the global
/// configuration.
///
/// # Example
///
/// ```no_run
/// use http_code_snippets::config::load_config;
/// use serde_json::json;
///
/// let settings = json!({
///     "http-code-snippets": {
///         "debounceMs": 50
///     }
/// });
///
/// let config = load_config(Some(settings)).unwrap();
/// assert_eq!(config.debounce_ms, 50);
/// ```
pub fn load_config(settings_json: Option<Value>) -> Result<SnippetConfig, ConfigError> {
    let mut config = SnippetConfig::default();

    if let Some(settings) = settings_json {
        if let Some(snippet_settings) = settings.get(SETTINGS_KEY) {
            match serde_json::from_value::<SnippetConfig>(snippet_settings.clone()) {
                Ok(user_config) => config = user_config,
                Err(e) => {
                    log::warn!(
                        "Failed to parse {} settings: {}. Using defaults.",
                        SETTINGS_KEY,
                        e
                    );
                }
            }
        }
    }

    config.validate().map_err(ConfigError::Invalid)?;

    if let Ok(mut global_config) = CONFIG.write() {
        *global_config = config.clone();
    }
    crate::url_details::set_url_cache_capacity(config.url_cache_capacity);

    Ok(config)
}

/// Loads configuration from a JSON settings file.
pub fn load_config_file(path: &Path) -> Result<SnippetConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let settings: Value = serde_json::from_str(&content).map_err(|source| ConfigError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    load_config(Some(settings))
}

/// Gets a copy of the current global configuration.
pub fn get_config() -> SnippetConfig {
    CONFIG
        .read()
        .map(|c| c.clone())
        .unwrap_or_else(|_| SnippetConfig::default())
}

/// Updates the global configuration in place.
///
/// If the update leaves the configuration invalid, it is reset to defaults.
pub fn update_config<F>(updater: F)
where
    F: FnOnce(&mut SnippetConfig),
{
    let capacity = match CONFIG.write() {
        Ok(mut config) => {
            updater(&mut config);

            if let Err(e) = config.validate() {
                log::warn!("Configuration validation failed after update: {}", e);
                *config = SnippetConfig::default();
            }
            config.url_cache_capacity
        }
        Err(_) => return,
    };
    crate::url_details::set_url_cache_capacity(capacity);
}

/// Resets the configuration to defaults.
pub fn reset_config() {
    if let Ok(mut config) = CONFIG.write() {
        *config = SnippetConfig::default();
    }
    crate::url_details::set_url_cache_capacity(SnippetConfig::default().url_cache_capacity);
}
