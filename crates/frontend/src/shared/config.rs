//! Client configuration: API base URL and request timeouts.
//!
//! The base URL is fixed at build time through `CONSOLE_API_BASE_URL`. When it
//! is not set, it is derived from the window location on port 3000. A deployment
//! may also override values at runtime with a TOML document in
//! `<meta name="console-config" content="...">`.

use serde::Deserialize;
use thiserror::Error;

pub const DEFAULT_REQUEST_TIMEOUT_MS: u32 = 10_000;
pub const DEFAULT_LOGOUT_TIMEOUT_MS: u32 = 2_000;
pub const SESSION_STORAGE_KEY: &str = "console.session.user";

const CONFIG_META_NAME: &str = "console-config";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub api_base: String,
    pub request_timeout_ms: u32,
    pub logout_timeout_ms: u32,
}

/// Runtime overrides; every field is optional.
#[derive(Debug, Default, Deserialize)]
struct ConfigOverrides {
    api_base: Option<String>,
    request_timeout_ms: Option<u32>,
    logout_timeout_ms: Option<u32>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid console-config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("timeout must be greater than zero")]
    ZeroTimeout,
}

impl ClientConfig {
    pub fn with_base(api_base: impl Into<String>) -> Self {
        Self {
            api_base: api_base.into().trim_end_matches('/').to_string(),
            request_timeout_ms: DEFAULT_REQUEST_TIMEOUT_MS,
            logout_timeout_ms: DEFAULT_LOGOUT_TIMEOUT_MS,
        }
    }

    /// Configuration for the running page.
    pub fn load() -> Self {
        let mut config = Self::with_base(default_api_base());
        if let Some(raw) = read_meta_config() {
            if let Err(e) = config.apply_overrides(&raw) {
                log::warn!("Ignoring runtime configuration: {}", e);
            }
        }
        log::info!("API base: {}", config.api_base);
        config
    }

    /// Applies a TOML override document. On error the config is left untouched.
    pub fn apply_overrides(&mut self, raw: &str) -> Result<(), ConfigError> {
        let overrides: ConfigOverrides = toml::from_str(raw)?;
        if overrides.request_timeout_ms == Some(0) || overrides.logout_timeout_ms == Some(0) {
            return Err(ConfigError::ZeroTimeout);
        }
        if let Some(base) = overrides.api_base {
            self.api_base = base.trim_end_matches('/').to_string();
        }
        if let Some(ms) = overrides.request_timeout_ms {
            self.request_timeout_ms = ms;
        }
        if let Some(ms) = overrides.logout_timeout_ms {
            self.logout_timeout_ms = ms;
        }
        Ok(())
    }

    /// Full URL for an API path such as `/products`.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_base, path)
    }
}

fn default_api_base() -> String {
    if let Some(base) = option_env!("CONSOLE_API_BASE_URL") {
        return base.to_string();
    }
    let window = match web_sys::window() {
        Some(w) => w,
        None => return String::new(),
    };
    let location = window.location();
    let protocol = location.protocol().unwrap_or_else(|_| "http:".to_string());
    let hostname = location
        .hostname()
        .unwrap_or_else(|_| "127.0.0.1".to_string());
    format!("{}//{}:3000", protocol, hostname)
}

fn read_meta_config() -> Option<String> {
    let document = web_sys::window()?.document()?;
    let meta = document
        .query_selector(&format!("meta[name=\"{}\"]", CONFIG_META_NAME))
        .ok()??;
    meta.get_attribute("content")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::with_base("http://api.local:3000/");
        assert_eq!(config.api_base, "http://api.local:3000");
        assert_eq!(config.request_timeout_ms, 10_000);
        assert_eq!(config.logout_timeout_ms, 2_000);
        assert_eq!(config.url("/auth/login"), "http://api.local:3000/auth/login");
    }

    #[test]
    fn test_overrides() {
        let mut config = ClientConfig::with_base("http://a");
        config
            .apply_overrides("api_base = \"https://erp.example.com/api/\"\nrequest_timeout_ms = 15000")
            .unwrap();
        assert_eq!(config.api_base, "https://erp.example.com/api");
        assert_eq!(config.request_timeout_ms, 15_000);
        assert_eq!(config.logout_timeout_ms, 2_000);
    }

    #[test]
    fn test_invalid_overrides_leave_config_untouched() {
        let mut config = ClientConfig::with_base("http://a");
        assert!(matches!(
            config.apply_overrides("request_timeout_ms = \"fast\""),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            config.apply_overrides("api_base = \"http://b\"\nlogout_timeout_ms = 0"),
            Err(ConfigError::ZeroTimeout)
        ));
        assert_eq!(config, ClientConfig::with_base("http://a"));
    }
}
