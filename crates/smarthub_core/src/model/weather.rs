//! Display model for the weather lookup tool.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    pub main: String,
    pub description: String,
    pub icon: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    /// Rounded to the nearest whole degree.
    pub temp: i64,
    pub humidity: i64,
    pub wind_speed: f64,
    pub condition: Condition,
}

/// One forecast day, taken from a single 3-hour sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyForecast {
    /// Short weekday label, e.g. `Mon`.
    pub date: String,
    pub min: i64,
    pub max: i64,
    pub main: String,
    pub icon: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReport {
    pub city: String,
    pub country: String,
    pub current: CurrentConditions,
    pub forecast: Vec<DailyForecast>,
}

/// Autocomplete candidate from the geocoding endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CitySuggestion {
    pub name: String,
    pub country: String,
}

impl CitySuggestion {
    /// Query text used when the suggestion is picked.
    pub fn label(&self) -> String {
        format!("{}, {}", self.name, self.country)
    }
}
