//! Plain-text rendering of a [`ViewState`].

use chrono::{DateTime, TimeZone};
use std::fmt::{self, Display};

use crate::{ViewState, WeatherBundle};

const MISSING: &str = "N/A";
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Unix seconds as a local timestamp in `tz`; `None` when out of range.
pub fn format_timestamp<Tz>(unix_secs: i64, tz: &Tz) -> Option<String>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let utc = DateTime::from_timestamp(unix_secs, 0)?;
    Some(utc.with_timezone(tz).format(TIMESTAMP_FORMAT).to_string())
}

pub fn format_temp(temp: Option<f64>) -> String {
    match temp {
        Some(t) => format!("{t}°C"),
        None => MISSING.to_string(),
    }
}

/// Loading line, error line and bundle panel, in that order, for whichever are set.
pub fn render_view<Tz>(state: &ViewState, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    ViewPanel { state, tz }.to_string()
}

struct ViewPanel<'a, Tz> {
    state: &'a ViewState,
    tz: &'a Tz,
}

impl<Tz> Display for ViewPanel<'_, Tz>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Weather App [{}]", self.state.background_class())?;

        if self.state.loading {
            writeln!(f, "Loading...")?;
        }

        if let Some(error) = &self.state.error {
            writeln!(f, "{error}")?;
        }

        match &self.state.weather_data {
            Some(bundle) => write_bundle(f, bundle, self.tz),
            None => Ok(()),
        }
    }
}

fn write_bundle<Tz>(f: &mut fmt::Formatter<'_>, bundle: &WeatherBundle, tz: &Tz) -> fmt::Result
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    writeln!(f)?;
    writeln!(f, "{}", bundle.city_name().unwrap_or(MISSING))?;
    writeln!(f, "Current Temperature: {}", format_temp(bundle.current_temp()))?;
    writeln!(f, "Condition: {}", bundle.current_description().unwrap_or(MISSING))?;

    writeln!(f)?;
    writeln!(f, "Forecast (3-hour intervals)")?;
    for entry in bundle.forecast_entries() {
        let date = entry
            .dt
            .and_then(|dt| format_timestamp(dt, tz))
            .unwrap_or_else(|| MISSING.to_string());

        writeln!(f, "----------------------------------------")?;
        writeln!(f, "Date: {date}")?;
        writeln!(f, "Temp: {}", format_temp(entry.temp()))?;
        writeln!(f, "Condition: {}", entry.description().unwrap_or(MISSING))?;
    }
    Ok(())
}
