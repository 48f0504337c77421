//! Core library for the `cityweather` CLI.
//!
//! This crate defines:
//! - Configuration loading (`config.json`)
//! - The OpenWeather client and its outcome classification
//! - The result sink (console summary and `output.json`)
//! - The pipeline tying them together
//!
//! It is used by `cityweather-cli`, but can also be reused by other binaries or services.

pub mod config;
pub mod error;
pub mod model;
pub mod pipeline;
pub mod provider;
pub mod sink;

pub use config::Config;
pub use error::{ConfigError, FetchFailure, SinkError};
pub use model::{Outcome, WeatherQuery, WeatherResult};
pub use pipeline::{Delivery, Pipeline};
pub use provider::{WeatherProvider, openweather::OpenWeatherClient, provider_from_config};
