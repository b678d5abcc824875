use async_trait::async_trait;
use serde_json::value::RawValue;
use std::fmt::{self, Debug};
use thiserror::Error;

use crate::WeatherQuery;

pub mod openweather;

/// The two provider lookups the proxy performs per query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Current,
    Forecast,
}

impl Endpoint {
    /// Path segment appended to the provider base URL.
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::Current => "weather",
            Endpoint::Forecast => "forecast",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::Current => f.write_str("current weather"),
            Endpoint::Forecast => f.write_str("forecast"),
        }
    }
}

/// Failure of a single upstream lookup.
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("Weather provider {endpoint} request failed with status {status}: {detail}")]
    Status {
        endpoint: Endpoint,
        status: u16,
        detail: String,
    },

    #[error("Failed to reach weather provider ({endpoint}): {source}")]
    Transport {
        endpoint: Endpoint,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to parse weather provider {endpoint} JSON: {source}")]
    InvalidBody {
        endpoint: Endpoint,
        #[source]
        source: serde_json::Error,
    },
}

impl UpstreamError {
    /// Upstream HTTP status when the provider answered, 500 otherwise.
    pub fn status_code(&self) -> u16 {
        match self {
            UpstreamError::Status { status, .. } => *status,
            UpstreamError::Transport { .. } | UpstreamError::InvalidBody { .. } => 500,
        }
    }

    pub fn endpoint(&self) -> Endpoint {
        match self {
            UpstreamError::Status { endpoint, .. }
            | UpstreamError::Transport { endpoint, .. }
            | UpstreamError::InvalidBody { endpoint, .. } => *endpoint,
        }
    }
}

/// An upstream weather source. Payloads are returned verbatim.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn current(&self, query: &WeatherQuery) -> Result<Box<RawValue>, UpstreamError>;

    async fn forecast(&self, query: &WeatherQuery) -> Result<Box<RawValue>, UpstreamError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_keeps_upstream_status() {
        let err = UpstreamError::Status {
            endpoint: Endpoint::Forecast,
            status: 404,
            detail: "city not found".into(),
        };

        assert_eq!(err.status_code(), 404);
        assert_eq!(err.endpoint(), Endpoint::Forecast);
        assert_eq!(
            err.to_string(),
            "Weather provider forecast request failed with status 404: city not found"
        );
    }

    #[test]
    fn invalid_body_maps_to_500() {
        let source = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let err = UpstreamError::InvalidBody { endpoint: Endpoint::Current, source };

        assert_eq!(err.status_code(), 500);
        assert!(err.to_string().contains("current weather"));
    }

    #[test]
    fn endpoint_paths() {
        assert_eq!(Endpoint::Current.path(), "weather");
        assert_eq!(Endpoint::Forecast.path(), "forecast");
    }
}
