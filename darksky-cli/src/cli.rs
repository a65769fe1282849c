use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use darksky_core::{Config, ForecastClient, SUPPORTED_LANGUAGES, UnitSystem};
use inquire::{Password, PasswordDisplayMode, Select};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "darksky", version, about = "Dark Sky forecast CLI")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the API key and default language/units.
    Configure,

    /// Fetch a forecast and print the JSON document.
    Forecast {
        #[arg(long, allow_hyphen_values = true)]
        lat: String,

        #[arg(long, allow_hyphen_values = true)]
        lon: String,

        /// RFC 3339 instant for a Time Machine request, e.g. 2017-07-14T02:40:00Z.
        #[arg(long)]
        time: Option<String>,

        /// Override the configured language.
        #[arg(long)]
        lang: Option<String>,

        /// Override the configured units (auto, ca, uk2, us, si).
        #[arg(long)]
        units: Option<String>,

        /// Data blocks to leave out, comma-separated.
        #[arg(long, value_delimiter = ',')]
        exclude: Vec<String>,

        /// Return 168 hours of hourly data instead of 48.
        #[arg(long)]
        extend_hourly: bool,
    },
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Forecast { lat, lon, time, lang, units, exclude, extend_hourly } => {
                let config = Config::load()?;
                let client = ForecastClient::from_config(&config)?;

                let mut request = client
                    .create_request()
                    .with_latitude(lat)
                    .with_longitude(lon)
                    .with_excluded_blocks(exclude)
                    .with_extended_hourly(extend_hourly);

                if let Some(time) = time {
                    let when: DateTime<Utc> = DateTime::parse_from_rfc3339(&time)
                        .with_context(|| format!("Invalid --time '{time}', expected RFC 3339"))?
                        .into();
                    request = request.with_time(when);
                }
                if let Some(lang) = lang {
                    request = request.with_language(lang);
                }
                if let Some(units) = units {
                    request = request.with_units(units);
                }

                let forecast = request.execute().await.context("Forecast request failed")?;
                println!("{}", serde_json::to_string_pretty(&forecast)?);
                Ok(())
            }
        }
    }
}

fn configure() -> Result<()> {
    let mut config = Config::load()?;

    let api_key = Password::new("Dark Sky API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;
    config.set_api_key(api_key.trim().to_string());

    let start = UnitSystem::all().iter().position(|u| *u == UnitSystem::Si).unwrap_or(0);
    let units = Select::new("Default units:", UnitSystem::all().to_vec())
        .with_starting_cursor(start)
        .prompt()
        .context("Failed to read default units")?;
    config.units = Some(units);

    let start = SUPPORTED_LANGUAGES.iter().position(|l| *l == "en").unwrap_or(0);
    let language = Select::new("Default language:", SUPPORTED_LANGUAGES.to_vec())
        .with_starting_cursor(start)
        .prompt()
        .context("Failed to read default language")?;
    config.language = Some(language.to_string());

    let path = config.save()?;
    println!("Configuration saved to {}", path.display());

    Ok(())
}
