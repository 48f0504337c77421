//! Sequential composition: fetch, then display and persist on success only.

use std::{
    io::{self, Write},
    path::PathBuf,
};

use crate::{error::SinkError, model::Outcome, provider::WeatherProvider, sink};

/// What happened to a fetched payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    /// The fetch did not succeed; the sink was never invoked.
    Skipped,
    Delivered { displayed: bool, persisted: bool },
}

#[derive(Debug)]
pub struct Pipeline {
    provider: Box<dyn WeatherProvider>,
    output_path: PathBuf,
}

impl Pipeline {
    pub fn new(provider: Box<dyn WeatherProvider>, output_path: impl Into<PathBuf>) -> Self {
        Self { provider, output_path: output_path.into() }
    }

    /// Run one lookup for `city`, writing progress, diagnostics and the summary to `out`.
    ///
    /// Fetch and sink failures are reported to `out` and absorbed. Only a failure
    /// to write to `out` itself is returned.
    pub async fn run<W: Write>(&self, city: &str, out: &mut W) -> io::Result<Delivery> {
        writeln!(out, "Fetching weather data for {city}...")?;
        out.flush()?;

        let payload = match self.provider.fetch(city).await {
            Outcome::Success(payload) => payload,
            failed => {
                if let Some(message) = failed.diagnostic() {
                    writeln!(out, "{message}")?;
                }
                return Ok(Delivery::Skipped);
            }
        };

        let displayed = match sink::display(&payload, &mut *out) {
            Ok(()) => true,
            Err(SinkError::Output(err)) => return Err(err),
            Err(err) => {
                tracing::warn!(error = %err, "weather payload is missing summary fields");
                writeln!(out, "Unexpected weather data format: {err}")?;
                false
            }
        };

        let persisted = match sink::persist(&self.output_path, &payload) {
            Ok(()) => {
                writeln!(out, "Weather data saved to {}", self.output_path.display())?;
                true
            }
            Err(err) => {
                tracing::warn!(error = %err, "failed to persist weather data");
                writeln!(out, "Error saving weather data: {err}")?;
                false
            }
        };

        Ok(Delivery::Delivered { displayed, persisted })
    }
}
