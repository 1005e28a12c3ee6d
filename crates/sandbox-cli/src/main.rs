//! Circuit sandbox command-line interface.

mod commands;
mod interactive;
mod report;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use sandbox_calc::CalcConfig;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::commands::Command;
use crate::interactive::Session;
use crate::report::Format;

#[derive(Parser)]
#[command(name = "circuit-sandbox")]
#[command(about = "Educational calculators for basic circuit analysis", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Output format
    #[arg(long, value_enum, global = true, default_value = "text")]
    format: Format,

    /// JSON file with sampling settings
    #[arg(long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => CalcConfig::default(),
    };
    debug!(?config, "configuration");

    let stdout = io::stdout();
    match &cli.command {
        Command::Interactive => {
            Session::new(io::stdin().lock(), stdout.lock(), &config, cli.format).run()?;
        }
        command => {
            let outcome = command.run(&config)?;
            outcome
                .report
                .render(cli.format, outcome.show_table, &mut stdout.lock())?;
        }
    }

    Ok(())
}

/// Log to stderr so stdout only carries results.
fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn load_config(path: &Path) -> Result<CalcConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config: {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse config: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("circuit-sandbox-{}-{name}", std::process::id()))
    }

    #[test]
    fn test_load_partial_config() {
        let path = scratch_path("partial.json");
        fs::write(&path, r#"{ "waveform_periods": 5 }"#).unwrap();
        let config = load_config(&path);
        fs::remove_file(&path).unwrap();

        let config = config.unwrap();
        assert_eq!(config.waveform_periods, 5);
        assert_eq!(config.transient_points, 500);
    }

    #[test]
    fn test_load_config_errors_name_the_file() {
        let missing = scratch_path("missing.json");
        let err = load_config(&missing).unwrap_err();
        assert!(err.to_string().starts_with("Failed to read config"));

        let path = scratch_path("broken.json");
        fs::write(&path, "{ not json").unwrap();
        let err = load_config(&path);
        fs::remove_file(&path).unwrap();
        assert!(err.unwrap_err().to_string().starts_with("Failed to parse config"));
    }
}
