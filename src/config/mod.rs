//! Process configuration, read once at startup.
//!
//! Values come from the environment (after `.env` has been loaded by
//! `dotenvy`). Only `HUBSPOT_ACCESS_TOKEN` is mandatory; a missing
//! `GEMINI_API_KEY` switches the AI overview to its fallback summary.

use std::env;
use std::fmt;
use std::path::PathBuf;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3001;
pub const DEFAULT_HUBSPOT_API_BASE: &str = "https://api.hubapi.com";
pub const DEFAULT_GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} not found in environment or .env file")]
    MissingVar(&'static str),
    #[error("Invalid value for {name}: {value:?}")]
    InvalidValue { name: &'static str, value: String },
}

#[derive(Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub hubspot: HubSpotConfig,
    pub gemini: GeminiConfig,
    pub static_dir: Option<PathBuf>,
    pub cors_allowed_origins: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Clone)]
pub struct HubSpotConfig {
    pub access_token: String,
    pub api_base: String,
}

#[derive(Clone)]
pub struct GeminiConfig {
    pub api_key: Option<String>,
    pub api_base: String,
    pub model: String,
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("server", &self.server)
            .field("hubspot_api_base", &self.hubspot.api_base)
            .field("gemini_api_base", &self.gemini.api_base)
            .field("gemini_model", &self.gemini.model)
            .field("gemini_enabled", &self.gemini.api_key.is_some())
            .field("static_dir", &self.static_dir)
            .field("cors_allowed_origins", &self.cors_allowed_origins)
            .finish()
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let access_token =
            get("HUBSPOT_ACCESS_TOKEN").ok_or(ConfigError::MissingVar("HUBSPOT_ACCESS_TOKEN"))?;

        let port = match get("PORT") {
            Some(raw) => raw.parse::<u16>().map_err(|_| ConfigError::InvalidValue {
                name: "PORT",
                value: raw,
            })?,
            None => DEFAULT_PORT,
        };

        let cors_allowed_origins = get("CORS_ALLOWED_ORIGINS")
            .map(|origins| {
                origins
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            server: ServerConfig {
                host: get("SERVER_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
                port,
            },
            hubspot: HubSpotConfig {
                access_token,
                api_base: base_url(get("HUBSPOT_API_BASE"), DEFAULT_HUBSPOT_API_BASE),
            },
            gemini: GeminiConfig {
                api_key: get("GEMINI_API_KEY"),
                api_base: base_url(get("GEMINI_API_BASE"), DEFAULT_GEMINI_API_BASE),
                model: get("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string()),
            },
            static_dir: get("STATIC_DIR").map(PathBuf::from),
            cors_allowed_origins,
        })
    }

    pub fn gemini_enabled(&self) -> bool {
        self.gemini.api_key.is_some()
    }
}

fn base_url(value: Option<String>, default: &str) -> String {
    value
        .unwrap_or_else(|| default.to_string())
        .trim_end_matches('/')
        .to_string()
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
    fn test_missing_hubspot_token_is_fatal() {
        let err = AppConfig::from_lookup(lookup(&[("GEMINI_API_KEY", "k")])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingVar("HUBSPOT_ACCESS_TOKEN")));
    }

    #[test]
    fn test_blank_token_counts_as_missing() {
        let err = AppConfig::from_lookup(lookup(&[("HUBSPOT_ACCESS_TOKEN", "  ")])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingVar(_)));
    }

    #[test]
    fn test_defaults() {
        let cfg = AppConfig::from_lookup(lookup(&[("HUBSPOT_ACCESS_TOKEN", "pat-1")])).unwrap();
        assert_eq!(cfg.server.port, DEFAULT_PORT);
        assert_eq!(cfg.server.host, DEFAULT_HOST);
        assert_eq!(cfg.hubspot.api_base, DEFAULT_HUBSPOT_API_BASE);
        assert_eq!(cfg.gemini.model, DEFAULT_GEMINI_MODEL);
        assert!(!cfg.gemini_enabled());
        assert!(cfg.static_dir.is_none());
        assert!(cfg.cors_allowed_origins.is_empty());
    }

    #[test]
    fn test_overrides_and_trailing_slash() {
        let cfg = AppConfig::from_lookup(lookup(&[
            ("HUBSPOT_ACCESS_TOKEN", "pat-1"),
            ("HUBSPOT_API_BASE", "http://127.0.0.1:9000/"),
            ("GEMINI_API_KEY", "g-key"),
            ("PORT", "8080"),
            ("CORS_ALLOWED_ORIGINS", "http://a.test, ,http://b.test"),
        ]))
        .unwrap();
        assert_eq!(cfg.hubspot.api_base, "http://127.0.0.1:9000");
        assert_eq!(cfg.server.port, 8080);
        assert!(cfg.gemini_enabled());
        assert_eq!(cfg.cors_allowed_origins, vec!["http://a.test", "http://b.test"]);
    }

    #[test]
    fn test_invalid_port() {
        let err = AppConfig::from_lookup(lookup(&[
            ("HUBSPOT_ACCESS_TOKEN", "pat-1"),
            ("PORT", "eighty"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { name: "PORT", .. }));
    }

    #[test]
    fn test_debug_hides_secrets() {
        let cfg = AppConfig::from_lookup(lookup(&[
            ("HUBSPOT_ACCESS_TOKEN", "pat-secret"),
            ("GEMINI_API_KEY", "gem-secret"),
        ]))
        .unwrap();
        let debug = format!("{cfg:?}");
        assert!(!debug.contains("pat-secret"));
        assert!(!debug.contains("gem-secret"));
    }
}
