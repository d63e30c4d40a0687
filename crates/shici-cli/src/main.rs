use std::path::PathBuf;

use clap::Parser;
use eyre::Result;
use shici_search::{SearchConfig, Searcher};
use tracing_subscriber::EnvFilter;

mod commands;

use commands::Command;

/// Administer and query the shici poetry search index.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON config file. Without it, settings come from SHICI_* variables.
    #[arg(long, env = "SHICI_CONFIG")]
    config: Option<PathBuf>,

    /// Engine base URL
    #[arg(long)]
    url: Option<String>,

    /// Request timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,

    /// Drop hits scoring at or below this
    #[arg(long)]
    min_score: Option<f64>,

    /// Log as JSON lines
    #[arg(long)]
    json_logs: bool,

    #[command(subcommand)]
    command: Command,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let logs = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if args.json_logs {
        logs.json().init();
    } else {
        logs.init();
    }

    if let Command::NewId = args.command {
        return commands::new_id();
    }

    let config = load_config(&args)?;
    let searcher = Searcher::from_config(&config)?;
    commands::run(&searcher, args.command)
}

/// File or environment settings, then command-line overrides.
fn load_config(args: &Args) -> Result<SearchConfig> {
    let mut config = match &args.config {
        Some(path) => SearchConfig::load(path)?,
        None => SearchConfig::from_env()?,
    };
    if let Some(url) = &args.url {
        config.url = url.clone();
    }
    if let Some(timeout) = args.timeout {
        config.timeout_secs = timeout;
    }
    if let Some(min_score) = args.min_score {
        config.min_score = min_score;
    }
    config.validate()?;
    Ok(config)
}
