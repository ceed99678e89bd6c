//! Configuration schema for HTTP code snippets.
//!
//! This module defines the user-configurable settings and their validation.

use serde::{Deserialize, Serialize};

/// Settings shared by every snippet widget.
///
/// All settings can be supplied under the "http-code-snippets" key. Missing
/// settings fall back to defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnippetConfig {
    /// Debounce delay in milliseconds.
    ///
    /// Input changes arriving within this window are coalesced into a single
    /// recomputation. Defaults to 25ms. Must be greater than 0.
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    /// Maximum number of URLs kept by the URL details cache.
    ///
    /// Defaults to 256. Must be greater than 0.
    #[serde(default = "default_url_cache_capacity")]
    pub url_cache_capacity: usize,

    /// Java tab selected when a Java selector is created.
    #[serde(default = "default_java_framework")]
    pub default_java_framework: JavaFramework,
}

/// Java flavors offered by the Java tab selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JavaFramework {
    /// `java.net.HttpURLConnection`
    Platform,
    /// Spring `RestTemplate`
    Spring,
}

impl JavaFramework {
    /// Tab index of this framework in the Java selector.
    pub fn tab_index(&self) -> usize {
        match self {
            JavaFramework::Platform => 0,
            JavaFramework::Spring => 1,
        }
    }
}

impl Default for SnippetConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
            url_cache_capacity: default_url_cache_capacity(),
            default_java_framework: default_java_framework(),
        }
    }
}

impl SnippetConfig {
    /// Validates the configuration.
    ///
    /// # Returns
    ///
    /// `Ok(())` if all settings are valid, or `Err` naming the offending setting.
    pub fn validate(&self) -> Result<(), String> {
        if self.debounce_ms == 0 {
            return Err("debounceMs must be greater than 0".to_string());
        }

        if self.url_cache_capacity == 0 {
            return Err("urlCacheCapacity must be greater than 0".to_string());
        }

        Ok(())
    }

    /// Returns the debounce delay as a `Duration`.
    pub fn debounce_delay(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.debounce_ms)
    }
}

fn default_debounce_ms() -> u64 {
    25
}

fn default_url_cache_capacity() -> usize {
    crate::url_details::DEFAULT_CACHE_CAPACITY
}

fn default_java_framework() -> JavaFramework {
    JavaFramework::Platform
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SnippetConfig::default();
        assert_eq!(config.debounce_ms, 25);
        assert_eq!(config.url_cache_capacity, 256);
        assert_eq!(config.default_java_framework, JavaFramework::Platform);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation_zero_debounce() {
        let config = SnippetConfig {
            debounce_ms: 0,
            ..Default::default()
        };
        assert_eq!(
            config.validate().unwrap_err(),
            "debounceMs must be greater than 0"
        );
    }

    #[test]
    fn test_config_validation_zero_cache() {
        let config = SnippetConfig {
            url_cache_capacity: 0,
            ..Default::default()
        };
        assert_eq!(
            config.validate().unwrap_err(),
            "urlCacheCapacity must be greater than 0"
        );
    }

    #[test]
    fn test_debounce_delay() {
        let config = SnippetConfig {
            debounce_ms: 40,
            ..Default::default()
        };
        assert_eq!(
            config.debounce_delay(),
            std::time::Duration::from_millis(40)
        );
    }

    #[test]
    fn test_deserialization_with_defaults() {
        let json = r#"{ "defaultJavaFramework": "spring" }"#;

        let config: SnippetConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.default_java_framework, JavaFramework::Spring);
        assert_eq!(config.debounce_ms, 25);
        assert_eq!(config.url_cache_capacity, 256);
    }

    #[test]
    fn test_serialization() {
        let json = serde_json::to_string(&SnippetConfig::default()).unwrap();
        assert!(json.contains("debounceMs"));
        assert!(json.contains("urlCacheCapacity"));
        assert!(json.contains("\"platform\""));
    }

    #[test]
    fn test_framework_tab_index() {
        assert_eq!(JavaFramework::Platform.tab_index(), 0);
        assert_eq!(JavaFramework::Spring.tab_index(), 1);
    }
}
