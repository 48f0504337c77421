use std::{io, path::PathBuf};

use thiserror::Error;

/// Failure to load or store the configuration file. Fatal for a run.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to parse config file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to serialize configuration to JSON: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("Failed to write config file {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Why a fetch produced no usable payload, other than "not found" or "unauthorized".
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchFailure {
    /// The service answered with a status other than 200, 404 or 401.
    #[error("request failed with status {status}: {body}")]
    Status { status: u16, body: String },

    /// No response was received (DNS, connectivity, timeout).
    #[error("{0}")]
    Transport(String),

    /// A 200 response whose body is not valid JSON.
    #[error("response body is not valid JSON: {0}")]
    Decode(String),
}

/// Failure inside the result sink. Never fatal to the process.
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("{0}")]
    Summary(#[source] serde_json::Error),

    #[error("Failed to serialize weather data: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("Failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to write summary: {0}")]
    Output(#[source] io::Error),
}
