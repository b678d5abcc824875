//! Application state shared across handlers

use std::sync::Arc;

use weather_core::{OpenWeatherProvider, ProviderSettings, WeatherProvider};

/// Shared application state
#[derive(Debug, Clone)]
pub struct AppState {
    /// Upstream weather source
    pub provider: Arc<dyn WeatherProvider>,
}

impl AppState {
    pub fn new(provider: Arc<dyn WeatherProvider>) -> Self {
        Self { provider }
    }

    /// Build state backed by OpenWeather from settings resolved at startup.
    pub fn from_settings(settings: &ProviderSettings) -> anyhow::Result<Self> {
        let provider = OpenWeatherProvider::new(settings)
            .map_err(|e| anyhow::anyhow!("Failed to initialize weather provider: {e}"))?;
        Ok(Self::new(Arc::new(provider)))
    }
}
