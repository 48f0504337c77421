use serde_json::Value;

use crate::error::FetchFailure;

/// Raw JSON document returned by the weather service.
///
/// The schema belongs to the provider; it is passed through untouched and only
/// the handful of fields shown to the operator are read (see [`crate::sink`]).
pub type WeatherResult = Value;

/// Unit system requested from the service.
pub const UNITS: &str = "metric";

/// Language code for condition descriptions.
pub const LANGUAGE: &str = "en";

/// Parameters of one weather request. Built per request, never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeatherQuery {
    pub city: String,
    pub api_key: String,
    pub units: &'static str,
    pub language: &'static str,
}

impl WeatherQuery {
    pub fn new(city: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self { city: city.into(), api_key: api_key.into(), units: UNITS, language: LANGUAGE }
    }

    /// Query string pairs in the order the service documents them.
    pub fn params(&self) -> [(&'static str, &str); 4] {
        [
            ("q", self.city.as_str()),
            ("appid", self.api_key.as_str()),
            ("units", self.units),
            ("lang", self.language),
        ]
    }
}

/// Classified result of a single fetch attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Success(WeatherResult),
    NotFound,
    Unauthorized,
    NetworkError(FetchFailure),
}

impl Outcome {
    /// Operator-facing diagnostic for a non-success outcome.
    pub fn diagnostic(&self) -> Option<String> {
        match self {
            Outcome::Success(_) => None,
            Outcome::NotFound => {
                Some("City not found. Please check the city name and try again.".to_string())
            }
            Outcome::Unauthorized => {
                Some("Invalid API key. Please check your configuration.".to_string())
            }
            Outcome::NetworkError(failure) => {
                Some(format!("Error fetching weather data: {failure}"))
            }
        }
    }
}
