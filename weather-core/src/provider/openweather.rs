use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::value::RawValue;
use tracing::{debug, instrument, warn};

use crate::{ProviderSettings, WeatherQuery};

use super::{Endpoint, UpstreamError, WeatherProvider};

/// OpenWeatherMap client returning raw current-conditions and forecast documents.
#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(settings: &ProviderSettings) -> Result<Self, reqwest::Error> {
        let mut builder = Client::builder();
        if let Some(timeout) = settings.timeout() {
            builder = builder.timeout(timeout);
        }

        if settings.api_key.is_none() {
            warn!("OPENWEATHER_API_KEY is not set; upstream requests will be rejected");
        }

        Ok(Self {
            api_key: settings.api_key.clone().unwrap_or_default(),
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            http: builder.build()?,
        })
    }

    #[instrument(skip(self, query), fields(city = %query.city()))]
    async fn fetch(
        &self,
        endpoint: Endpoint,
        query: &WeatherQuery,
    ) -> Result<Box<RawValue>, UpstreamError> {
        let url = format!("{}/{}", self.base_url, endpoint.path());

        let res = self
            .http
            .get(&url)
            .query(&[
                ("q", query.city()),
                ("appid", self.api_key.as_str()),
                ("units", "metric"),
            ])
            .send()
            .await
            .map_err(|source| UpstreamError::Transport { endpoint, source })?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|source| UpstreamError::Transport { endpoint, source })?;

        if !status.is_success() {
            debug!(status = status.as_u16(), "upstream returned an error status");
            return Err(UpstreamError::Status {
                endpoint,
                status: status.as_u16(),
                detail: error_detail(&body),
            });
        }

        RawValue::from_string(body).map_err(|source| UpstreamError::InvalidBody { endpoint, source })
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn current(&self, query: &WeatherQuery) -> Result<Box<RawValue>, UpstreamError> {
        self.fetch(Endpoint::Current, query).await
    }

    async fn forecast(&self, query: &WeatherQuery) -> Result<Box<RawValue>, UpstreamError> {
        self.fetch(Endpoint::Forecast, query).await
    }
}

/// OpenWeather error payloads look like `{"cod":"404","message":"city not found"}`.
#[derive(Debug, Deserialize)]
struct OwErrorBody {
    message: String,
}

fn error_detail(body: &str) -> String {
    match serde_json::from_str::<OwErrorBody>(body) {
        Ok(parsed) if !parsed.message.is_empty() => parsed.message,
        _ => truncate_body(body),
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
