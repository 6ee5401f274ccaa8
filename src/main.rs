//! Command line entry point for the football Elo ledger
//!
//! Loads configuration, opens the rating database and runs exactly one
//! subcommand against it.

use anyhow::Result;
use clap::Parser;
use football_elo::config::AppConfig;
use football_elo::matchmaking::RandomTeamSplitter;
use football_elo::shell::{execute, render_json, render_text, Command};
use football_elo::{EloLedger, VERSION};
use std::path::PathBuf;
use tracing::debug;

/// Football Elo - team ratings for casual football
#[derive(Parser)]
#[command(
    name = "football-elo",
    version,
    about = "Track Elo ratings for casual team football",
    long_about = "Football Elo keeps a roster of players in a SQLite database, records \
                 yellow-versus-white matches with their scores, updates every player's rating \
                 with a margin-of-victory weighted team Elo formula, and randomly splits the \
                 players present into two teams."
)]
struct Args {
    /// Configuration file path
    #[arg(
        short,
        long,
        value_name = "FILE",
        help = "Path to configuration file (TOML format)"
    )]
    config: Option<PathBuf>,

    /// Database path override
    #[arg(long, value_name = "FILE", help = "Override the SQLite database path")]
    database: Option<PathBuf>,

    /// Log level override
    #[arg(
        short,
        long,
        value_name = "LEVEL",
        help = "Override log level (trace, debug, info, warn, error)"
    )]
    log_level: Option<String>,

    /// Enable debug mode
    #[arg(short, long, help = "Enable debug mode with verbose logging")]
    debug: bool,

    /// Print results as JSON
    #[arg(long, help = "Print command results as JSON instead of text")]
    json: bool,

    /// Seed for auto-match
    #[arg(long, value_name = "SEED", help = "Seed the team splitter for reproducible teams")]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

/// Initialize structured logging on stderr so command output stays clean
fn init_logging(log_level: &str) -> Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_level.into()),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}

/// Load configuration from file or environment, then apply CLI overrides
fn load_config(args: &Args) -> Result<AppConfig> {
    let mut config = if let Some(config_path) = &args.config {
        AppConfig::from_file(config_path)?
    } else {
        AppConfig::from_env()?
    };

    if let Some(database) = &args.database {
        config.storage.database_path = database.clone();
    }

    if let Some(log_level) = &args.log_level {
        config.service.log_level = log_level.clone();
    }

    if args.debug {
        config.service.log_level = "debug".to_string();
    }

    football_elo::config::validate_config(&config)?;

    Ok(config)
}

fn run(args: Args, config: AppConfig) -> Result<()> {
    debug!(
        "{} {} using database {}",
        config.service.name,
        VERSION,
        config.storage.database_path.display()
    );

    let mut ledger = EloLedger::from_config(&config)?;

    if let Some(seed) = args.seed {
        debug!("Using seeded team splitter ({})", seed);
        ledger = ledger.with_splitter(Box::new(RandomTeamSplitter::with_seed(seed)));
    }

    let output = execute(&mut ledger, args.command)?;

    if args.json {
        println!("{}", render_json(&output)?);
    } else {
        print!("{}", render_text(&output));
    }

    Ok(())
}

fn main() {
    let args = Args::parse();

    let config = load_config(&args).unwrap_or_else(|e| {
        eprintln!("Configuration error: {}", e);
        std::process::exit(1);
    });

    if let Err(e) = init_logging(&config.service.log_level) {
        eprintln!("Failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    if let Err(e) = run(args, config) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
