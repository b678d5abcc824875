use serde::{Deserialize, Deserializer, Serialize, de::DeserializeOwned};
use thiserror::Error;

/// A validated city lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeatherQuery {
    city: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("City is required")]
    MissingCity,
}

impl WeatherQuery {
    /// Absent, empty and whitespace-only input are all rejected.
    pub fn parse(city: Option<&str>) -> Result<Self, QueryError> {
        match city.map(str::trim) {
            Some(city) if !city.is_empty() => Ok(Self { city: city.to_string() }),
            _ => Err(QueryError::MissingCity),
        }
    }

    pub fn city(&self) -> &str {
        &self.city
    }
}

/// JSON shape of every error the proxy returns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub message: String,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

/// Merged proxy response as seen by the display client.
///
/// Provider payloads have an expected but unenforced shape. Every field is
/// optional, and a field holding the wrong JSON type falls back to its
/// default rather than failing the whole bundle.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct WeatherBundle {
    #[serde(default, deserialize_with = "lenient")]
    pub current: CurrentWeather,
    #[serde(default, deserialize_with = "lenient")]
    pub forecast: ForecastResponse,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CurrentWeather {
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub main: Option<MainReadings>,
    #[serde(default, deserialize_with = "lenient_items")]
    pub weather: Vec<Condition>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct MainReadings {
    #[serde(default, deserialize_with = "lenient")]
    pub temp: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Condition {
    #[serde(default, deserialize_with = "lenient")]
    pub main: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ForecastResponse {
    /// Chronological, in upstream order.
    #[serde(default, deserialize_with = "lenient_items")]
    pub list: Vec<ForecastEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ForecastEntry {
    /// Unix seconds.
    #[serde(default, deserialize_with = "lenient")]
    pub dt: Option<i64>,
    #[serde(default, deserialize_with = "lenient")]
    pub main: Option<MainReadings>,
    #[serde(default, deserialize_with = "lenient_items")]
    pub weather: Vec<Condition>,
}

impl WeatherBundle {
    pub fn city_name(&self) -> Option<&str> {
        self.current.name.as_deref()
    }

    pub fn current_temp(&self) -> Option<f64> {
        self.current.main.as_ref().and_then(|m| m.temp)
    }

    pub fn current_description(&self) -> Option<&str> {
        self.current.weather.first().and_then(|w| w.description.as_deref())
    }

    /// Short condition group of the first current entry, e.g. "Clouds".
    pub fn condition_main(&self) -> Option<&str> {
        self.current.weather.first().and_then(|w| w.main.as_deref())
    }

    pub fn forecast_entries(&self) -> &[ForecastEntry] {
        &self.forecast.list
    }
}

impl ForecastEntry {
    pub fn temp(&self) -> Option<f64> {
        self.main.as_ref().and_then(|m| m.temp)
    }

    pub fn description(&self) -> Option<&str> {
        self.weather.first().and_then(|w| w.description.as_deref())
    }
}

fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(T::deserialize(value).unwrap_or_default())
}

/// Like [`lenient`], but keeps the sequence length: malformed items become defaults.
fn lenient_items<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    let serde_json::Value::Array(items) = value else {
        return Ok(Vec::new());
    };

    Ok(items.into_iter().map(|item| T::deserialize(item).unwrap_or_default()).collect())
}
