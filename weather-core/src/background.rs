use std::fmt;

use crate::WeatherBundle;

/// Background style derived from the current condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BackgroundClass {
    Clear,
    Cloudy,
    Rainy,
    Stormy,
    Snowy,
    Misty,
    #[default]
    Default,
}

impl BackgroundClass {
    /// First matching rule wins: clear, cloud, rain, storm, snow, mist/fog.
    pub fn from_condition(condition: &str) -> Self {
        let condition = condition.to_lowercase();

        if condition.contains("clear") {
            BackgroundClass::Clear
        } else if condition.contains("cloud") {
            BackgroundClass::Cloudy
        } else if condition.contains("rain") {
            BackgroundClass::Rainy
        } else if condition.contains("storm") {
            BackgroundClass::Stormy
        } else if condition.contains("snow") {
            BackgroundClass::Snowy
        } else if condition.contains("mist") || condition.contains("fog") {
            BackgroundClass::Misty
        } else {
            BackgroundClass::Default
        }
    }

    /// Uses `current.weather[0].main`; absent data gives [`BackgroundClass::Default`].
    pub fn for_bundle(bundle: Option<&WeatherBundle>) -> Self {
        bundle
            .and_then(WeatherBundle::condition_main)
            .filter(|main| !main.is_empty())
            .map(Self::from_condition)
            .unwrap_or_default()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BackgroundClass::Clear => "bg-clear",
            BackgroundClass::Cloudy => "bg-cloudy",
            BackgroundClass::Rainy => "bg-rainy",
            BackgroundClass::Stormy => "bg-stormy",
            BackgroundClass::Snowy => "bg-snowy",
            BackgroundClass::Misty => "bg-misty",
            BackgroundClass::Default => "bg-default",
        }
    }
}

impl fmt::Display for BackgroundClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_conditions() {
        assert_eq!(BackgroundClass::from_condition("Clear").as_str(), "bg-clear");
        assert_eq!(BackgroundClass::from_condition("Clouds").as_str(), "bg-cloudy");
        assert_eq!(BackgroundClass::from_condition("Light Rain").as_str(), "bg-rainy");
        assert_eq!(BackgroundClass::from_condition("Thunderstorm").as_str(), "bg-stormy");
        assert_eq!(BackgroundClass::from_condition("SNOW").as_str(), "bg-snowy");
        assert_eq!(BackgroundClass::from_condition("Mist").as_str(), "bg-misty");
        assert_eq!(BackgroundClass::from_condition("Fog").as_str(), "bg-misty");
    }

    #[test]
    fn unknown_and_empty_are_default() {
        assert_eq!(BackgroundClass::from_condition("Tornado"), BackgroundClass::Default);
        assert_eq!(BackgroundClass::from_condition(""), BackgroundClass::Default);
    }

    #[test]
    fn priority_order_applies() {
        // "cloud" is checked before "rain".
        assert_eq!(BackgroundClass::from_condition("rain clouds"), BackgroundClass::Cloudy);
        // "rain" is checked before "storm".
        assert_eq!(BackgroundClass::from_condition("rainstorm"), BackgroundClass::Rainy);
        assert_eq!(BackgroundClass::from_condition("clear after snow"), BackgroundClass::Clear);
    }

    #[test]
    fn bundle_without_data_is_default() {
        assert_eq!(BackgroundClass::for_bundle(None), BackgroundClass::Default);
        assert_eq!(
            BackgroundClass::for_bundle(Some(&WeatherBundle::default())),
            BackgroundClass::Default
        );
    }

    #[test]
    fn bundle_uses_first_condition_main() {
        let bundle: WeatherBundle = serde_json::from_value(serde_json::json!({
            "current": { "weather": [ { "main": "Snow" }, { "main": "Clear" } ] }
        }))
        .unwrap();

        assert_eq!(BackgroundClass::for_bundle(Some(&bundle)).to_string(), "bg-snowy");
    }
}
