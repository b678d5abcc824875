use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, net::SocketAddr, path::PathBuf, time::Duration};

pub const DEFAULT_PROVIDER_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";
pub const DEFAULT_PROXY_URL: &str = "http://127.0.0.1:3000";
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

/// Settings for the upstream weather provider, resolved once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderSettings {
    /// Not validated: a missing key simply makes upstream requests fail.
    pub api_key: Option<String>,
    pub base_url: String,
    /// Optional bounded timeout. `None` keeps the HTTP client default.
    pub timeout_secs: Option<u64>,
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_PROVIDER_BASE_URL.to_string(),
            timeout_secs: None,
        }
    }
}

impl ProviderSettings {
    /// Read `OPENWEATHER_API_KEY`, `OPENWEATHER_BASE_URL` and `OPENWEATHER_TIMEOUT_SECS`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from an arbitrary variable lookup, e.g. a fake environment in tests.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup("OPENWEATHER_API_KEY").filter(|k| !k.is_empty());

        let base_url = lookup("OPENWEATHER_BASE_URL")
            .filter(|u| !u.trim().is_empty())
            .map(|u| u.trim().trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_PROVIDER_BASE_URL.to_string());

        let timeout_secs = lookup("OPENWEATHER_TIMEOUT_SECS")
            .map(|raw| {
                raw.trim()
                    .parse::<u64>()
                    .with_context(|| format!("Invalid OPENWEATHER_TIMEOUT_SECS value: {raw:?}"))
            })
            .transpose()?;

        Ok(Self { api_key, base_url, timeout_secs })
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

/// Settings for the proxy HTTP server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerSettings {
    pub bind_addr: SocketAddr,
}

impl ServerSettings {
    /// Read `WEATHER_SERVER_ADDR`, falling back to `127.0.0.1:3000`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let raw = lookup("WEATHER_SERVER_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = raw
            .trim()
            .parse::<SocketAddr>()
            .with_context(|| format!("Invalid WEATHER_SERVER_ADDR value: {raw:?}"))?;

        Ok(Self { bind_addr })
    }
}

/// Client configuration stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Example TOML:
    /// proxy_url = "http://127.0.0.1:3000"
    pub proxy_url: Option<String>,
}

impl Config {
    /// Proxy base URL, or the local default when none is configured.
    pub fn proxy_url_or_default(&self) -> &str {
        self.proxy_url.as_deref().unwrap_or(DEFAULT_PROXY_URL)
    }

    pub fn set_proxy_url(&mut self, url: impl Into<String>) {
        let url = url.into();
        self.proxy_url = Some(url.trim().trim_end_matches('/').to_string());
    }

    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            // First run: no config file, return empty.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_toml(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weather-task", "weather-cli")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    fn from_toml(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> =
            pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn provider_settings_defaults_when_env_empty() {
        let settings = ProviderSettings::from_lookup(env(&[])).unwrap();

        assert_eq!(settings, ProviderSettings::default());
        assert!(settings.timeout().is_none());
    }

    #[test]
    fn provider_settings_reads_injected_values() {
        let settings = ProviderSettings::from_lookup(env(&[
            ("OPENWEATHER_API_KEY", "KEY"),
            ("OPENWEATHER_BASE_URL", "http://localhost:9999/data/"),
            ("OPENWEATHER_TIMEOUT_SECS", "7"),
        ]))
        .unwrap();

        assert_eq!(settings.api_key.as_deref(), Some("KEY"));
        assert_eq!(settings.base_url, "http://localhost:9999/data");
        assert_eq!(settings.timeout(), Some(Duration::from_secs(7)));
    }

    #[test]
    fn empty_api_key_is_treated_as_absent() {
        let settings = ProviderSettings::from_lookup(env(&[("OPENWEATHER_API_KEY", "")])).unwrap();
        assert!(settings.api_key.is_none());
    }

    #[test]
    fn invalid_timeout_is_rejected() {
        let err =
            ProviderSettings::from_lookup(env(&[("OPENWEATHER_TIMEOUT_SECS", "soon")])).unwrap_err();
        assert!(err.to_string().contains("OPENWEATHER_TIMEOUT_SECS"));
    }

    #[test]
    fn server_settings_default_and_override() {
        let default = ServerSettings::from_lookup(env(&[])).unwrap();
        assert_eq!(default.bind_addr.to_string(), DEFAULT_BIND_ADDR);

        let custom =
            ServerSettings::from_lookup(env(&[("WEATHER_SERVER_ADDR", "0.0.0.0:8080")])).unwrap();
        assert_eq!(custom.bind_addr.port(), 8080);

        assert!(ServerSettings::from_lookup(env(&[("WEATHER_SERVER_ADDR", "nope")])).is_err());
    }

    #[test]
    fn proxy_url_falls_back_to_default() {
        let mut cfg = Config::default();
        assert_eq!(cfg.proxy_url_or_default(), DEFAULT_PROXY_URL);

        cfg.set_proxy_url(" http://weather.local:8080/ ");
        assert_eq!(cfg.proxy_url_or_default(), "http://weather.local:8080");
    }

    #[test]
    fn config_parses_from_toml() {
        let cfg = Config::from_toml("proxy_url = \"http://example.test\"\n").unwrap();
        assert_eq!(cfg.proxy_url.as_deref(), Some("http://example.test"));

        assert!(Config::from_toml("proxy_url = 3").is_err());
    }
}
