//! Weather proxy handler

use axum::{
    Json,
    extract::{RawQuery, State},
};
use tracing::{debug, instrument};
use url::form_urlencoded;
use weather_core::{RawBundle, WeatherQuery, fetch_bundle};

use crate::{error::ApiError, state::AppState};

/// First value of `name` in a raw query string; later repeats are ignored.
pub fn first_param(raw_query: Option<&str>, name: &str) -> Option<String> {
    form_urlencoded::parse(raw_query?.as_bytes())
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.into_owned())
}

/// `GET /weather?city=` - current conditions and forecast merged into one body.
#[instrument(skip(state))]
pub async fn get_weather(
    State(state): State<AppState>,
    RawQuery(raw_query): RawQuery,
) -> Result<Json<RawBundle>, ApiError> {
    let city = first_param(raw_query.as_deref(), "city");
    let query = WeatherQuery::parse(city.as_deref()).inspect_err(|_| {
        debug!("rejecting request without a city");
    })?;

    let bundle = fetch_bundle(state.provider.as_ref(), &query).await?;
    Ok(Json(bundle))
}
