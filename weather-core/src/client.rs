//! HTTP client for the weather proxy endpoint.

use reqwest::Client;
use thiserror::Error;
use tracing::debug;

use crate::{ErrorBody, WeatherBundle};

pub const FALLBACK_ERROR_MESSAGE: &str = "Error fetching weather data";

#[derive(Debug, Error)]
pub enum ClientError {
    /// The proxy answered with a non-success status.
    #[error("Proxy responded with status {status}: {}", .message.as_deref().unwrap_or(FALLBACK_ERROR_MESSAGE))]
    Server { status: u16, message: Option<String> },

    #[error("Failed to reach weather proxy: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Failed to decode weather proxy response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ClientError {
    /// Text shown to the user: the server's message when it sent one.
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Server { message: Some(message), .. } => message.clone(),
            _ => FALLBACK_ERROR_MESSAGE.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ProxyClient {
    base_url: String,
    http: Client,
}

impl ProxyClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET {base}/weather?city=...`. The city is sent as typed, blank included.
    pub async fn get_weather(&self, city: &str) -> Result<WeatherBundle, ClientError> {
        let url = format!("{}/weather", self.base_url);

        let res = self.http.get(&url).query(&[("city", city)]).send().await?;
        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorBody>(&body)
                .ok()
                .map(|b| b.message)
                .filter(|m| !m.is_empty());
            debug!(status = status.as_u16(), ?message, "proxy returned an error");
            return Err(ClientError::Server { status: status.as_u16(), message });
        }

        Ok(serde_json::from_str(&body)?)
    }
}
