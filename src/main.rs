use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use demandcast::config::Config;
use demandcast::error::{DemandcastErrorTrait, Error};
use demandcast::parser::Delimiter;
use demandcast::report::OutputFormat;

mod commands;

#[derive(Parser)]
#[command(
    name = "demandcast",
    version,
    about = "Short-horizon linear demand forecasting from CSV time series",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log format (text, json)
    #[arg(long, global = true)]
    log_format: Option<String>,

    /// TOML configuration file (defaults to DEMANDCAST_* environment variables)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Field delimiter (comma, semicolon, tab, pipe, auto)
    #[arg(long, global = true)]
    delimiter: Option<Delimiter>,

    /// Header name of the date column
    #[arg(long, global = true)]
    date_column: Option<String>,

    /// Header name of the demand column
    #[arg(long, global = true)]
    demand_column: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Project the demand trend forward
    Forecast {
        /// CSV file to read, or - for stdin
        input: String,

        /// Number of future days to project
        #[arg(short, long)]
        periods: Option<usize>,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Describe the parsed series and its fitted trend
    Summary {
        /// CSV file to read, or - for stdin
        input: String,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Backtest the trend forecast on the last observations
    Evaluate {
        /// CSV file to read, or - for stdin
        input: String,

        /// Number of trailing observations to hold out
        #[arg(long)]
        holdout: usize,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = load_config(&cli)?;

    // Initialize tracing/logging
    setup_tracing(&config.logging.format, &config.logging.level, cli.verbose)?;

    tracing::debug!(config = ?config, "Resolved configuration");

    let outcome = match cli.command {
        Commands::Forecast {
            input,
            periods,
            format,
        } => {
            let mut config = config;
            if let Some(periods) = periods {
                config.forecast.periods = periods;
            }
            tracing::info!(
                input = %input,
                periods = %config.forecast.periods,
                format = %format,
                "Starting forecast command"
            );
            commands::forecast(&input, &config, format)
        }

        Commands::Summary { input, format } => {
            tracing::info!(input = %input, format = %format, "Starting summary command");
            commands::summary(&input, &config, format)
        }

        Commands::Evaluate {
            input,
            holdout,
            format,
        } => {
            tracing::info!(
                input = %input,
                holdout = %holdout,
                format = %format,
                "Starting evaluate command"
            );
            commands::evaluate(&input, holdout, &config, format)
        }
    };

    if let Err(err) = &outcome {
        if let Some(source) = err.downcast_ref::<Error>() {
            tracing::error!(
                category = source.category().description(),
                recoverable = source.is_recoverable(),
                "{source}"
            );
        }
    }

    outcome
}

/// Load the config file or environment, then apply command-line overrides
fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::from_env()?,
    };

    if let Some(format) = &cli.log_format {
        config.logging.format = format.clone();
    }
    if let Some(delimiter) = cli.delimiter {
        config.input.delimiter = delimiter;
    }
    if let Some(column) = &cli.date_column {
        config.input.date_column = column.clone();
    }
    if let Some(column) = &cli.demand_column {
        config.input.demand_column = column.clone();
    }

    config.validate().context("Invalid configuration")?;
    Ok(config)
}

fn setup_tracing(format: &str, level: &str, verbose: bool) -> Result<()> {
    let env_filter = if verbose {
        tracing_subscriber::EnvFilter::new("demandcast=debug,info")
    } else {
        tracing_subscriber::EnvFilter::try_new(format!("demandcast={level},warn"))
            .context("Invalid log level")?
    };

    match format {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }

    Ok(())
}
