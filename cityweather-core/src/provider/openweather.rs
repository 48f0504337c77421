use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::{error::Error as StdError, fmt};

use crate::{
    error::FetchFailure,
    model::{Outcome, WeatherQuery, WeatherResult},
};

use super::WeatherProvider;

/// OpenWeather current-weather endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://api.openweathermap.org/data/2.5/weather";

#[derive(Clone)]
pub struct OpenWeatherClient {
    api_key: String,
    endpoint: String,
    http: Client,
}

impl OpenWeatherClient {
    pub fn new(api_key: String) -> Self {
        Self { api_key, endpoint: DEFAULT_ENDPOINT.to_string(), http: Client::new() }
    }

    /// Point the client at another server speaking the same API.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Issue one GET for `query` and classify the result. No retries.
    pub async fn fetch_query(&self, query: &WeatherQuery) -> Outcome {
        tracing::debug!(
            endpoint = %self.endpoint,
            city = %query.city,
            units = query.units,
            lang = query.language,
            "requesting current weather"
        );

        let res = match self.http.get(&self.endpoint).query(&query.params()).send().await {
            Ok(res) => res,
            Err(err) => {
                return Outcome::NetworkError(FetchFailure::Transport(describe_transport_error(
                    err,
                )));
            }
        };

        let status = res.status();
        tracing::debug!(%status, "weather service responded");

        match status {
            StatusCode::OK => {
                let body = match res.text().await {
                    Ok(body) => body,
                    Err(err) => {
                        return Outcome::NetworkError(FetchFailure::Transport(
                            describe_transport_error(err),
                        ));
                    }
                };

                match serde_json::from_str::<WeatherResult>(&body) {
                    Ok(payload) => Outcome::Success(payload),
                    Err(err) => Outcome::NetworkError(FetchFailure::Decode(err.to_string())),
                }
            }
            StatusCode::NOT_FOUND => Outcome::NotFound,
            StatusCode::UNAUTHORIZED => Outcome::Unauthorized,
            other => {
                let body = res.text().await.unwrap_or_default();
                Outcome::NetworkError(FetchFailure::Status {
                    status: other.as_u16(),
                    body: truncate_body(&body),
                })
            }
        }
    }
}

impl fmt::Debug for OpenWeatherClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenWeatherClient")
            .field("endpoint", &self.endpoint)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherClient {
    async fn fetch(&self, city: &str) -> Outcome {
        let query = WeatherQuery::new(city, self.api_key.as_str());
        let outcome = self.fetch_query(&query).await;

        match &outcome {
            Outcome::Success(_) => tracing::info!(city, "weather fetched"),
            Outcome::NotFound => tracing::warn!(city, "city not found"),
            Outcome::Unauthorized => tracing::warn!("api key rejected"),
            Outcome::NetworkError(failure) => tracing::warn!(city, error = %failure, "fetch failed"),
        }

        outcome
    }
}

/// Flatten a reqwest error and its sources into one line.
/// reqwest's top-level message omits the cause (e.g. "connection refused").
/// The URL is dropped first: its query string carries `appid`.
fn describe_transport_error(err: reqwest::Error) -> String {
    let err = err.without_url();
    let mut message = err.to_string();
    let mut source = err.source();

    while let Some(cause) = source {
        let text = cause.to_string();
        if !text.is_empty() && !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }

    if message.is_empty() { "no response received".to_string() } else { message }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.chars().count() > MAX {
        format!("{}...", body.chars().take(MAX).collect::<String>())
    } else {
        body.to_string()
    }
}
