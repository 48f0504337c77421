use async_trait::async_trait;
use std::fmt::Debug;

use crate::{Config, Outcome, provider::openweather::OpenWeatherClient};

pub mod openweather;

/// A source of current-weather documents.
///
/// Implementations classify every attempt into an [`Outcome`] instead of
/// returning errors; the caller decides what to report.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn fetch(&self, city: &str) -> Outcome;
}

/// Construct the OpenWeather provider from config, optionally against a non-default endpoint.
pub fn provider_from_config(config: &Config, endpoint: Option<&str>) -> Box<dyn WeatherProvider> {
    let client = OpenWeatherClient::new(config.api_key.clone());

    match endpoint {
        Some(url) => Box::new(client.with_endpoint(url)),
        None => Box::new(client),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::openweather::DEFAULT_ENDPOINT;

    #[test]
    fn provider_from_config_uses_default_endpoint() {
        let provider = provider_from_config(&Config::new("KEY"), None);
        assert!(format!("{provider:?}").contains(DEFAULT_ENDPOINT));
    }

    #[test]
    fn provider_from_config_honours_endpoint_override() {
        let provider = provider_from_config(&Config::new("KEY"), Some("http://127.0.0.1:9/weather"));
        assert!(format!("{provider:?}").contains("http://127.0.0.1:9/weather"));
    }

    #[test]
    fn debug_output_hides_api_key() {
        let provider = provider_from_config(&Config::new("SECRET-KEY"), None);
        assert!(!format!("{provider:?}").contains("SECRET-KEY"));
    }
}
