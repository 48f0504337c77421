//! Presentation and storage of a successful fetch.
//!
//! `display` and `persist` are independent: a summary that cannot be rendered
//! does not prevent the raw payload from being written, and vice versa.

use serde::Deserialize;
use std::{fs, io::Write, path::Path};

use crate::{error::SinkError, model::WeatherResult};

/// Default location of the persisted payload, relative to the working directory.
pub const DEFAULT_OUTPUT_FILE: &str = "output.json";

const HEADER: &str = "===== Weather Forecast =====";
const FOOTER: &str = "============================";

/// The subset of the provider payload shown to the operator.
#[derive(Debug, Deserialize)]
struct Summary {
    name: String,
    sys: SummarySys,
    main: SummaryMain,
    weather: Vec<SummaryWeather>,
    wind: SummaryWind,
}

#[derive(Debug, Deserialize)]
struct SummarySys {
    country: String,
}

#[derive(Debug, Deserialize)]
struct SummaryMain {
    temp: f64,
    feels_like: f64,
    humidity: f64,
    pressure: f64,
}

#[derive(Debug, Deserialize)]
struct SummaryWeather {
    description: String,
}

#[derive(Debug, Deserialize)]
struct SummaryWind {
    speed: f64,
}

/// Render the human-readable summary, header and footer included.
///
/// A missing or mistyped field is reported as [`SinkError::Summary`], never
/// papered over with a placeholder.
pub fn render(result: &WeatherResult) -> Result<String, SinkError> {
    let summary = Summary::deserialize(result).map_err(SinkError::Summary)?;

    let condition = summary.weather.first().map(|w| w.description.as_str()).ok_or_else(|| {
        SinkError::Summary(<serde_json::Error as serde::de::Error>::invalid_length(
            0,
            &"at least one weather entry",
        ))
    })?;

    let lines = [
        HEADER.to_string(),
        format!("Location: {}, {}", summary.name, summary.sys.country),
        format!("Temperature: {}°C", summary.main.temp),
        format!("Feels like: {}°C", summary.main.feels_like),
        format!("Humidity: {}%", summary.main.humidity),
        format!("Pressure: {} hPa", summary.main.pressure),
        format!("Conditions: {condition}"),
        format!("Wind speed: {} m/s", summary.wind.speed),
        FOOTER.to_string(),
    ];

    Ok(lines.join("\n") + "\n")
}

/// Write the summary to `out`.
pub fn display<W: Write>(result: &WeatherResult, out: &mut W) -> Result<(), SinkError> {
    let text = render(result)?;
    out.write_all(text.as_bytes()).map_err(SinkError::Output)
}

/// Serialize `result` as two-space indented JSON to `path`, replacing any existing file.
pub fn persist(path: impl AsRef<Path>, result: &WeatherResult) -> Result<(), SinkError> {
    let path = path.as_ref();

    let json = serde_json::to_string_pretty(result).map_err(SinkError::Serialize)?;

    fs::write(path, json)
        .map_err(|source| SinkError::Write { path: path.to_path_buf(), source })?;

    tracing::info!(path = %path.display(), "weather data persisted");
    Ok(())
}
