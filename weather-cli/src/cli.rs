use std::{fs, io, path::PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use inquire::{Password, PasswordDisplayMode, Select};
use weather_core::{
    Config, NormalizedWeather, UnitSystem, WeatherError, WeatherProvider, WeatherQuery, lookup,
    normalize, provider::openweather::parse_observation, provider_from_config,
};

use crate::output;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather", version, about = "Weather CLI")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeather API key and default units.
    Configure,

    /// Show current weather for a location.
    Show {
        /// Location name, e.g. "Kansas City" or "Paris,FR".
        location: String,

        /// "imperial" or "metric"; defaults to the configured units.
        #[arg(long)]
        units: Option<String>,

        /// Print the normalized record as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Normalize a raw OpenWeather response without any network access.
    Normalize {
        /// File holding the JSON body; reads stdin when absent.
        file: Option<PathBuf>,

        /// Units the body was requested in; defaults to the configured units.
        #[arg(long)]
        units: Option<String>,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Show { location, units, json } => {
                let config = Config::load()?;
                let query =
                    WeatherQuery::from_params_or(Some(&location), units.as_deref(), config.units())
                        .map_err(caller_facing)?;
                tracing::debug!(?query, "looking up current weather");
                let provider = provider_from_config(&config).map_err(|err| {
                    anyhow::anyhow!(
                        "{}.\nHint: run `weather configure` or set OPENWEATHER_API_KEY.",
                        err.public_message()
                    )
                })?;

                let weather = fetch_weather(provider.as_ref(), &query).await?;
                print_weather(&weather, json)
            }
            Command::Normalize { file, units } => {
                let config = Config::load()?;
                let units = match units {
                    Some(units) => units.parse()?,
                    None => config.units(),
                };

                let body = match &file {
                    Some(path) => fs::read_to_string(path)
                        .with_context(|| format!("Failed to read {}", path.display()))?,
                    None => io::read_to_string(io::stdin()).context("Failed to read stdin")?,
                };

                println!("{}", normalize_body(&body, units)?);
                Ok(())
            }
        }
    }
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let api_key = Password::new("OpenWeather API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;

    let starting = UnitSystem::all()
        .iter()
        .position(|u| *u == config.units())
        .unwrap_or_default();
    let units = Select::new("Default units:", UnitSystem::all().to_vec())
        .with_starting_cursor(starting)
        .prompt()
        .context("Failed to read default units")?;

    config.set_api_key(api_key.trim().to_string());
    config.set_default_units(units);
    config.save()?;

    println!("Saved configuration to {}", Config::config_file_path()?.display());
    Ok(())
}

/// Lookup whose failures carry only the caller-facing message; details go to the log.
async fn fetch_weather(
    provider: &dyn WeatherProvider,
    query: &WeatherQuery,
) -> anyhow::Result<NormalizedWeather> {
    lookup(provider, query).await.map_err(caller_facing)
}

fn caller_facing(err: WeatherError) -> anyhow::Error {
    tracing::debug!(error = ?err, "weather lookup failed");
    anyhow::Error::msg(err.public_message())
}

/// Raw OpenWeather body in, pretty normalized JSON out.
fn normalize_body(body: &str, units: UnitSystem) -> anyhow::Result<String> {
    let raw = parse_observation(body)?;
    serde_json::to_string_pretty(&normalize(&raw, units)).context("Failed to serialize weather")
}

fn print_weather(weather: &NormalizedWeather, json: bool) -> anyhow::Result<()> {
    if json {
        let body = serde_json::to_string_pretty(weather).context("Failed to serialize weather")?;
        println!("{body}");
    } else {
        println!("{}", output::render(weather));
    }
    Ok(())
}
