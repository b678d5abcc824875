//! Merging of the two provider lookups into one response body.

use serde::Serialize;
use serde_json::value::RawValue;
use tracing::{info, instrument, warn};

use crate::{UpstreamError, WeatherProvider, WeatherQuery};

/// `{"current": ..., "forecast": ...}` with both upstream documents embedded unchanged.
#[derive(Debug, Serialize)]
pub struct RawBundle {
    pub current: Box<RawValue>,
    pub forecast: Box<RawValue>,
}

/// Fetch current conditions and forecast concurrently.
///
/// Both lookups must succeed; the first error observed is returned and no
/// partial bundle is ever produced.
#[instrument(skip(provider, query), fields(city = %query.city()))]
pub async fn fetch_bundle<P>(provider: &P, query: &WeatherQuery) -> Result<RawBundle, UpstreamError>
where
    P: WeatherProvider + ?Sized,
{
    let result = tokio::try_join!(provider.current(query), provider.forecast(query));

    match result {
        Ok((current, forecast)) => {
            info!("weather bundle fetched");
            Ok(RawBundle { current, forecast })
        }
        Err(err) => {
            warn!(endpoint = %err.endpoint(), status = err.status_code(), error = %err, "upstream lookup failed");
            Err(err)
        }
    }
}
