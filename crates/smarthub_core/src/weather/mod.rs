//! Weather lookup plumbing: API client, response normalization and
//! autocomplete debouncing.
//!
//! # Responsibility
//! - Talk to the current-conditions, forecast and geocoding endpoints.
//! - Turn raw responses into the flat display model.
//!
//! # Invariants
//! - Any non-OK response is an error; no partial report is produced.
//! - No request is retried.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod api;
pub mod debounce;
pub mod forecast;

pub use api::{OpenWeatherClient, WeatherApi};
pub use debounce::Debouncer;
pub use forecast::{downsample, normalize_report};

pub type WeatherResult<T> = Result<T, WeatherError>;

#[derive(Debug)]
pub enum WeatherError {
    /// No API key configured.
    MissingApiKey,
    /// Endpoint answered with a non-success status.
    Status { endpoint: &'static str, status: u16 },
    /// Transport or body decoding failure.
    Http(reqwest::Error),
    /// Response decoded but lacks data the display model needs.
    Incomplete(&'static str),
}

impl Display for WeatherError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingApiKey => write!(f, "weather API key is not configured"),
            Self::Status { endpoint, status } => {
                write!(f, "{endpoint} endpoint returned HTTP {status}")
            }
            Self::Http(err) => write!(f, "weather request failed: {err}"),
            Self::Incomplete(details) => write!(f, "incomplete weather response: {details}"),
        }
    }
}

impl Error for WeatherError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Http(err) => Some(err),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for WeatherError {
    fn from(value: reqwest::Error) -> Self {
        Self::Http(value)
    }
}
