//! OpenWeatherMap-compatible API contracts and blocking HTTP client.

use super::{WeatherError, WeatherResult};
use crate::config::WeatherConfig;
use log::{info, warn};
use reqwest::blocking::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::{Duration, Instant};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ConditionDto {
    pub main: String,
    #[serde(default)]
    pub description: String,
    pub icon: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CurrentMain {
    pub temp: f64,
    pub humidity: i64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Wind {
    pub speed: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Sys {
    #[serde(default)]
    pub country: String,
}

/// Body of the current-conditions endpoint.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CurrentResponse {
    pub name: String,
    pub sys: Sys,
    pub main: CurrentMain,
    pub wind: Wind,
    pub weather: Vec<ConditionDto>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ForecastMain {
    pub temp_min: f64,
    pub temp_max: f64,
}

/// One 3-hour forecast sample.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ForecastEntry {
    /// Unix seconds.
    pub dt: i64,
    pub main: ForecastMain,
    pub weather: Vec<ConditionDto>,
}

/// Body of the forecast endpoint.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ForecastResponse {
    pub list: Vec<ForecastEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GeoEntry {
    pub name: String,
    #[serde(default)]
    pub country: String,
}

/// External weather collaborator.
pub trait WeatherApi {
    fn current(&self, city: &str) -> WeatherResult<CurrentResponse>;
    fn forecast(&self, city: &str) -> WeatherResult<ForecastResponse>;
    fn geocode(&self, prefix: &str, limit: usize) -> WeatherResult<Vec<GeoEntry>>;
}

impl<A: WeatherApi + ?Sized> WeatherApi for &A {
    fn current(&self, city: &str) -> WeatherResult<CurrentResponse> {
        (**self).current(city)
    }

    fn forecast(&self, city: &str) -> WeatherResult<ForecastResponse> {
        (**self).forecast(city)
    }

    fn geocode(&self, prefix: &str, limit: usize) -> WeatherResult<Vec<GeoEntry>> {
        (**self).geocode(prefix, limit)
    }
}

/// Blocking client for OpenWeatherMap endpoints.
pub struct OpenWeatherClient {
    client: Client,
    api_key: String,
    base_url: String,
    geo_url: String,
    units: String,
}

impl OpenWeatherClient {
    pub fn new(config: &WeatherConfig) -> WeatherResult<Self> {
        let api_key = config
            .api_key
            .clone()
            .filter(|key| !key.trim().is_empty())
            .ok_or(WeatherError::MissingApiKey)?;
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            client,
            api_key,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            geo_url: config.geo_url.clone(),
            units: config.units.clone(),
        })
    }

    fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &'static str,
        url: &str,
        query: &[(&str, &str)],
    ) -> WeatherResult<T> {
        let started_at = Instant::now();
        let response = self
            .client
            .get(url)
            .query(query)
            .query(&[("appid", self.api_key.as_str())])
            .send()?;
        let response = check_status(endpoint, response)?;
        let body = response.json::<T>()?;
        info!(
            "event=weather_fetch module=weather status=ok endpoint={} duration_ms={}",
            endpoint,
            started_at.elapsed().as_millis()
        );
        Ok(body)
    }
}

impl WeatherApi for OpenWeatherClient {
    fn current(&self, city: &str) -> WeatherResult<CurrentResponse> {
        let url = format!("{}/weather", self.base_url);
        self.get_json(
            "current",
            &url,
            &[("q", city), ("units", self.units.as_str())],
        )
    }

    fn forecast(&self, city: &str) -> WeatherResult<ForecastResponse> {
        let url = format!("{}/forecast", self.base_url);
        self.get_json(
            "forecast",
            &url,
            &[("q", city), ("units", self.units.as_str())],
        )
    }

    fn geocode(&self, prefix: &str, limit: usize) -> WeatherResult<Vec<GeoEntry>> {
        let limit = limit.to_string();
        self.get_json(
            "geocode",
            &self.geo_url,
            &[("q", prefix), ("limit", limit.as_str())],
        )
    }
}

fn check_status(endpoint: &'static str, response: Response) -> WeatherResult<Response> {
    let status = response.status();
    if !status.is_success() {
        warn!(
            "event=weather_fetch module=weather status=error endpoint={} http_status={}",
            endpoint,
            status.as_u16()
        );
        return Err(WeatherError::Status {
            endpoint,
            status: status.as_u16(),
        });
    }
    Ok(response)
}
