//! Configuration management

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::warn;

/// Default Translator Text API v3 host
pub const DEFAULT_API_BASE_URL: &str = "https://api.cognitive.microsofttranslator.com";

/// Default token issuance endpoint
pub const DEFAULT_TOKEN_URL: &str = "https://api.cognitive.microsoft.com/sts/v1.0/issueToken";

/// Bearer tokens are reused for five minutes
pub const DEFAULT_TOKEN_TTL_SECS: u64 = 5 * 60;

/// Configuration for the translator client
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TranslatorConfig {
    /// Azure subscription key; requests fail until one is set
    pub subscription_key: Option<String>,
    /// Translator Text API host
    pub api_base_url: String,
    /// Token issuance endpoint
    pub token_url: String,
    /// How long an issued bearer token is reused
    pub token_ttl_secs: u64,
    /// Whole-request timeout; `None` keeps the transport default
    pub timeout_ms: Option<u64>,
    /// Sent as `Referer` on every API call when set
    pub referrer: Option<String>,
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            subscription_key: None,
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            token_url: DEFAULT_TOKEN_URL.to_string(),
            token_ttl_secs: DEFAULT_TOKEN_TTL_SECS,
            timeout_ms: Some(30000),
            referrer: None,
        }
    }
}

impl TranslatorConfig {
    /// Create a configuration for the public endpoints with the given key
    pub fn with_subscription_key(key: impl Into<String>) -> Self {
        Self {
            subscription_key: Some(key.into()),
            ..Default::default()
        }
    }

    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        let subscription_key = std::env::var("MS_TRANSLATOR_SUBSCRIPTION_KEY")
            .ok()
            .filter(|k| !k.is_empty());

        let api_base_url = std::env::var("MS_TRANSLATOR_API_URL")
            .unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_string());

        let token_url = std::env::var("MS_TRANSLATOR_TOKEN_URL")
            .unwrap_or_else(|_| DEFAULT_TOKEN_URL.to_string());

        let token_ttl_secs = std::env::var("MS_TRANSLATOR_TOKEN_TTL_SECS")
            .unwrap_or_else(|_| DEFAULT_TOKEN_TTL_SECS.to_string())
            .parse::<u64>()?;

        let timeout_ms = match std::env::var("MS_TRANSLATOR_TIMEOUT_MS") {
            Ok(raw) if raw == "0" => None,
            Ok(raw) => Some(raw.parse::<u64>()?),
            Err(_) => Some(30000),
        };

        let referrer = std::env::var("MS_TRANSLATOR_REFERRER").ok();

        Ok(Self {
            subscription_key,
            api_base_url,
            token_url,
            token_ttl_secs,
            timeout_ms,
            referrer,
        })
    }

    /// Load from JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> anyhow::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate configuration
    ///
    /// A missing subscription key is allowed here; requests fail fast with
    /// a configuration error until one is set.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.api_base_url.is_empty() {
            return Err(anyhow::anyhow!("API base URL is required"));
        }

        if self.token_url.is_empty() {
            return Err(anyhow::anyhow!("Token URL is required"));
        }

        reqwest::Url::parse(&self.api_base_url)
            .map_err(|e| anyhow::anyhow!("Invalid API base URL {}: {}", self.api_base_url, e))?;
        reqwest::Url::parse(&self.token_url)
            .map_err(|e| anyhow::anyhow!("Invalid token URL {}: {}", self.token_url, e))?;

        if self.token_ttl_secs == 0 {
            return Err(anyhow::anyhow!("token_ttl_secs must be greater than 0"));
        }

        if self.subscription_key.is_none() {
            warn!("No subscription key configured");
        }

        Ok(())
    }

    /// Token TTL as a `Duration`
    pub fn token_ttl(&self) -> Duration {
        Duration::from_secs(self.token_ttl_secs)
    }

    /// Whole-request timeout as a `Duration`
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_validation() {
        let config = TranslatorConfig::with_subscription_key("test_key");
        assert!(config.validate().is_ok());
        assert_eq!(config.token_ttl(), Duration::from_secs(300));
    }

    #[test]
    fn test_config_validation_without_key_is_allowed() {
        let config = TranslatorConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation_bad_url() {
        let config = TranslatorConfig {
            api_base_url: "not a url".to_string(),
            ..Default::default()
        };

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_zero_ttl() {
        let config = TranslatorConfig {
            token_ttl_secs: 0,
            ..Default::default()
        };

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("translator.json");

        let config = TranslatorConfig {
            subscription_key: Some("abc".to_string()),
            timeout_ms: None,
            referrer: Some("https://example.com".to_string()),
            ..Default::default()
        };
        config.to_file(&path).unwrap();

        let loaded = TranslatorConfig::from_file(&path).unwrap();
        assert_eq!(loaded.subscription_key.as_deref(), Some("abc"));
        assert_eq!(loaded.timeout_ms, None);
        assert_eq!(loaded.referrer.as_deref(), Some("https://example.com"));
        assert_eq!(loaded.api_base_url, DEFAULT_API_BASE_URL);
    }

    #[test]
    fn test_partial_config_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("partial.json");
        std::fs::write(&path, r#"{"subscription_key": "k"}"#).unwrap();

        let loaded = TranslatorConfig::from_file(&path).unwrap();
        assert_eq!(loaded.token_url, DEFAULT_TOKEN_URL);
        assert_eq!(loaded.token_ttl_secs, DEFAULT_TOKEN_TTL_SECS);
    }
}
