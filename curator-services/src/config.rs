//! Environment-driven configuration

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use curator_core::CuratorError;
use curator_news::NewsError;

/// Which generative provider writes news items
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    DeepSeek,
    Gemini,
    /// Run without generated items
    Disabled,
}

impl FromStr for ProviderKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "deepseek" => Ok(ProviderKind::DeepSeek),
            "gemini" => Ok(ProviderKind::Gemini),
            "none" | "off" | "" => Ok(ProviderKind::Disabled),
            other => Err(ConfigError::InvalidValue {
                key: "GENERATIVE_PROVIDER".to_string(),
                value: other.to_string(),
            }),
        }
    }
}

/// Configuration for the curator service and server
#[derive(Debug, Clone)]
pub struct CuratorConfig {
    pub provider: ProviderKind,
    pub deepseek_api_key: Option<String>,
    pub deepseek_api_base: String,
    pub deepseek_model: String,
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    /// HTTP social feed; the demo accounts are used without it
    pub social_api_base: Option<String>,
    pub sarvam_api_key: Option<String>,
    /// JSON catalog replacing the embedded one
    pub catalog_path: Option<PathBuf>,
    pub provider_timeout_secs: u64,
    pub filter_timeout_secs: u64,
    pub social_timeout_secs: u64,
    pub server_port: u16,
}

impl Default for CuratorConfig {
    fn default() -> Self {
        Self {
            provider: ProviderKind::DeepSeek,
            deepseek_api_key: None,
            deepseek_api_base: "https://api.deepseek.com".to_string(),
            deepseek_model: "deepseek-chat".to_string(),
            gemini_api_key: None,
            gemini_model: "gemini-2.0-flash".to_string(),
            social_api_base: None,
            sarvam_api_key: None,
            catalog_path: None,
            provider_timeout_secs: 30,
            filter_timeout_secs: 20,
            social_timeout_secs: 15,
            server_port: 3001,
        }
    }
}

impl CuratorConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from any key lookup; unset keys keep their defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        Ok(Self {
            provider: match get("GENERATIVE_PROVIDER") {
                Some(value) => value.parse()?,
                None => defaults.provider,
            },
            deepseek_api_key: get("DEEPSEEK_API_KEY"),
            deepseek_api_base: match get("DEEPSEEK_API_BASE") {
                Some(base) => http_url("DEEPSEEK_API_BASE", base)?,
                None => defaults.deepseek_api_base,
            },
            deepseek_model: get("DEEPSEEK_MODEL").unwrap_or(defaults.deepseek_model),
            gemini_api_key: get("GEMINI_API_KEY"),
            gemini_model: get("GEMINI_MODEL").unwrap_or(defaults.gemini_model),
            social_api_base: get("SOCIAL_API_BASE")
                .map(|base| http_url("SOCIAL_API_BASE", base))
                .transpose()?,
            sarvam_api_key: get("SARVAM_API_KEY"),
            catalog_path: get("CATALOG_PATH").map(PathBuf::from),
            provider_timeout_secs: parse_or(
                "PROVIDER_TIMEOUT_SECS",
                get("PROVIDER_TIMEOUT_SECS"),
                defaults.provider_timeout_secs,
            )?,
            filter_timeout_secs: parse_or(
                "FILTER_TIMEOUT_SECS",
                get("FILTER_TIMEOUT_SECS"),
                defaults.filter_timeout_secs,
            )?,
            social_timeout_secs: parse_or(
                "SOCIAL_TIMEOUT_SECS",
                get("SOCIAL_TIMEOUT_SECS"),
                defaults.social_timeout_secs,
            )?,
            server_port: parse_or(
                "SERVER_PORT",
                get("SERVER_PORT"),
                defaults.server_port,
            )?,
        })
    }

    pub fn provider_timeout(&self) -> Duration {
        Duration::from_secs(self.provider_timeout_secs)
    }

    pub fn filter_timeout(&self) -> Duration {
        Duration::from_secs(self.filter_timeout_secs)
    }

    pub fn social_timeout(&self) -> Duration {
        Duration::from_secs(self.social_timeout_secs)
    }
}

fn parse_or<T: FromStr>(key: &str, value: Option<String>, default: T) -> Result<T, ConfigError> {
    match value {
        Some(raw) => raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
            key: key.to_string(),
            value: raw,
        }),
        None => Ok(default),
    }
}

/// Accept only absolute http(s) URLs
fn http_url(key: &str, value: String) -> Result<String, ConfigError> {
    match url::Url::parse(value.trim()) {
        Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => Ok(value.trim().to_string()),
        _ => Err(ConfigError::InvalidValue {
            key: key.to_string(),
            value,
        }),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },

    #[error("Failed to load catalog: {0}")]
    Catalog(#[from] CuratorError),

    #[error("Failed to set up collaborator: {0}")]
    Collaborator(#[from] NewsError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = CuratorConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.provider, ProviderKind::DeepSeek);
        assert_eq!(config.deepseek_model, "deepseek-chat");
        assert_eq!(config.gemini_model, "gemini-2.0-flash");
        assert_eq!(config.provider_timeout(), Duration::from_secs(30));
        assert_eq!(config.filter_timeout(), Duration::from_secs(20));
        assert_eq!(config.social_timeout(), Duration::from_secs(15));
        assert_eq!(config.server_port, 3001);
        assert!(config.catalog_path.is_none());
    }

    #[test]
    fn test_overrides() {
        let config = CuratorConfig::from_lookup(lookup(&[
            ("GENERATIVE_PROVIDER", "Gemini"),
            ("GEMINI_API_KEY", "g-key"),
            ("SERVER_PORT", "8080"),
            ("FILTER_TIMEOUT_SECS", "5"),
            ("CATALOG_PATH", "/tmp/catalog.json"),
            ("SOCIAL_API_BASE", "  "),
        ]))
        .unwrap();
        assert_eq!(config.provider, ProviderKind::Gemini);
        assert_eq!(config.gemini_api_key.as_deref(), Some("g-key"));
        assert_eq!(config.server_port, 8080);
        assert_eq!(config.filter_timeout_secs, 5);
        assert_eq!(config.catalog_path, Some(PathBuf::from("/tmp/catalog.json")));
        assert!(config.social_api_base.is_none());
    }

    #[test]
    fn test_invalid_values() {
        assert!(matches!(
            CuratorConfig::from_lookup(lookup(&[("SERVER_PORT", "abc")])),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert!(matches!(
            CuratorConfig::from_lookup(lookup(&[("GENERATIVE_PROVIDER", "openai")])),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert!(matches!(
            CuratorConfig::from_lookup(lookup(&[("SOCIAL_API_BASE", "localhost:4000")])),
            Err(ConfigError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_provider_disabled() {
        assert_eq!("none".parse::<ProviderKind>().unwrap(), ProviderKind::Disabled);
    }
}
