//! Core library for the weather proxy and its display client.
//!
//! This crate defines:
//! - Configuration (provider settings from the environment, client config on disk)
//! - Abstraction over the upstream weather provider
//! - The proxy operation merging current conditions and forecast
//! - Shared domain models (query, bundle, error body)
//! - The display client state machine and its text rendering
//!
//! It is used by `weather-server` and `weather-cli`.

pub mod background;
pub mod client;
pub mod config;
pub mod display;
pub mod model;
pub mod provider;
pub mod proxy;
pub mod render;

pub use background::BackgroundClass;
pub use client::{ClientError, ProxyClient};
pub use config::{Config, ProviderSettings, ServerSettings};
pub use display::{DisplayClient, ViewState};
pub use model::{ErrorBody, QueryError, WeatherBundle, WeatherQuery};
pub use provider::{UpstreamError, WeatherProvider, openweather::OpenWeatherProvider};
pub use proxy::{RawBundle, fetch_bundle};
