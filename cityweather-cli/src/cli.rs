use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use cityweather_core::{
    Config, Pipeline, config::DEFAULT_CONFIG_FILE, provider_from_config,
    sink::DEFAULT_OUTPUT_FILE,
};
use inquire::{InquireError, Password, PasswordDisplayMode, Text};
use std::{
    io::{self, Write},
    path::{Path, PathBuf},
};

const CITY_PROMPT: &str = "Enter city name to get weather forecast:";

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "cityweather", version, about = "Current weather for a city, saved as JSON")]
pub struct Cli {
    /// City to look up; prompts when omitted.
    pub city: Option<String>,

    /// Path to the JSON config file holding `api_key`.
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Where the raw weather response is written.
    #[arg(long, global = true, default_value = DEFAULT_OUTPUT_FILE)]
    pub output: PathBuf,

    /// Alternative current-weather endpoint.
    #[arg(long, global = true, hide = true)]
    pub endpoint: Option<String>,

    /// Log debug diagnostics to stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show the current weather for a city (the default).
    Show {
        /// City name; prompts when omitted.
        city: Option<String>,
    },

    /// Store an OpenWeather API key in the config file.
    Configure,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let Cli { city, config, output, endpoint, command, .. } = self;

        match command {
            Some(Command::Configure) => configure(&config),
            Some(Command::Show { city }) => show(&config, output, endpoint, city).await,
            None => show(&config, output, endpoint, city).await,
        }
    }
}

async fn show(
    config_path: &Path,
    output: PathBuf,
    endpoint: Option<String>,
    city: Option<String>,
) -> anyhow::Result<()> {
    // Fatal: nothing can be fetched without the key.
    let config = Config::load(config_path).context("Could not load configuration")?;

    let city = match city {
        Some(city) => city,
        None => prompt_city()?,
    };

    let provider = provider_from_config(&config, endpoint.as_deref());
    let pipeline = Pipeline::new(provider, output);

    let delivery = pipeline.run(&city, &mut io::stdout()).await?;
    tracing::debug!(?delivery, "run finished");

    Ok(())
}

fn configure(config_path: &Path) -> anyhow::Result<()> {
    let api_key = Password::new("OpenWeather API key:")
        .without_confirmation()
        .with_display_mode(PasswordDisplayMode::Masked)
        .prompt()
        .context("Failed to read API key")?;

    let api_key = api_key.trim();
    if api_key.is_empty() {
        bail!("API key must not be empty");
    }

    Config::upsert_api_key(config_path, api_key.to_string())
        .context("Could not save configuration")?;

    println!("Saved API key to {}", config_path.display());
    Ok(())
}

fn prompt_city() -> anyhow::Result<String> {
    match Text::new(CITY_PROMPT).prompt() {
        Ok(city) => Ok(city),
        Err(InquireError::NotTTY) => read_city_line(),
        Err(err) => Err(err).context("Failed to read city name"),
    }
}

/// Plain prompt for piped stdin, where inquire cannot draw.
fn read_city_line() -> anyhow::Result<String> {
    print!("{CITY_PROMPT} ");
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().read_line(&mut line).context("Failed to read city name")?;

    Ok(strip_line_ending(&line).to_string())
}

fn strip_line_ending(line: &str) -> &str {
    line.trim_end_matches(['\n', '\r'])
}
