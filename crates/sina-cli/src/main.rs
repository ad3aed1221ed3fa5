use std::path::PathBuf;

use clap::{Parser, Subcommand};
use eyre::Result;
use sina_core::ingest::IngestReport;

mod commands;
mod config;

use config::LogFormat;

#[derive(Parser)]
#[command(name = "sina")]
#[command(about = "Assessment scoring and longitudinal patient reports")]
#[command(version)]
struct Cli {
    /// Records file: a JSON array of stored assessments
    #[arg(long, global = true)]
    records: Option<PathBuf>,
    /// Config file to use instead of the default location
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Log filter when RUST_LOG is unset (e.g. `debug`)
    #[arg(long, global = true)]
    log_level: Option<String>,
    #[arg(long, global = true, value_enum)]
    log_format: Option<LogFormat>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List patients with record counts
    Patients,
    /// Show a patient's visits and overall progress
    Timeline {
        /// National id of the patient
        #[arg(long)]
        patient: String,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Show medication usage intervals for a patient
    Medications {
        /// National id of the patient
        #[arg(long)]
        patient: String,
        /// End of the latest interval (RFC 3339); defaults to now
        #[arg(long)]
        now: Option<String>,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Export consecutive-visit training rows as JSON
    Training {
        /// Output file; stdout when omitted
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Report scale values outside their valid ranges
    Validate,
    /// Show the config, or update it with the given values
    Config {
        /// Default records file to store
        #[arg(long)]
        set_records: Option<PathBuf>,
        /// Log level to store
        #[arg(long)]
        set_log_level: Option<String>,
        /// Log format to store
        #[arg(long, value_enum)]
        set_log_format: Option<LogFormat>,
    },
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    let config_path = match cli.config {
        Some(path) => path,
        None => config::default_config_path()?,
    };
    let (config, migrated_from) = config::load_config(&config_path)?;

    let log_level = cli.log_level.as_deref().unwrap_or(&config.log_level);
    init_tracing(log_level, cli.log_format.unwrap_or(config.log_format));
    tracing::debug!(path = %config_path.display(), version = config.config_version, "config loaded");
    if let Some(from) = migrated_from {
        tracing::info!(
            path = %config_path.display(),
            from,
            to = config.config_version,
            "migrated config"
        );
    }

    let records = cli.records.or_else(|| config.records_path.clone());
    let load = || -> Result<IngestReport> {
        let path = records.as_deref().ok_or_else(|| {
            eyre::eyre!("no records file given; pass --records or set one with `sina config --set-records`")
        })?;
        commands::load_records(path)
    };

    match cli.command {
        Commands::Patients => commands::patients(&load()?),
        Commands::Timeline { patient, json } => commands::timeline(&load()?, &patient, json),
        Commands::Medications { patient, now, json } => {
            commands::medications(&load()?, &patient, now.as_deref(), json)
        }
        Commands::Training { out } => commands::training(&load()?, out.as_deref()),
        Commands::Validate => commands::validate(&load()?),
        Commands::Config {
            set_records,
            set_log_level,
            set_log_format,
        } => commands::config(
            &config_path,
            config,
            commands::ConfigUpdate {
                records_path: set_records,
                log_level: set_log_level,
                log_format: set_log_format,
            },
        ),
    }
}

fn init_tracing(level: &str, format: LogFormat) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    match format {
        LogFormat::Text => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
}
