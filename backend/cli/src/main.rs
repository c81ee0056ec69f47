mod client;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use handle_config::{check_config, config_dir, config_file_path, load_resolved, redact, HandleConfig};
use handle_core::validate_name;
use handle_logging::{init_logger, LogTarget};
use handle_tui::{ScreenOutcome, Theme, UsernameScreen};

use client::build_client;

#[derive(Parser)]
#[command(name = "handle")]
#[command(about = "Choose a new username for your account")]
#[command(version)]
struct Cli {
    /// Config file to read instead of ~/.handle/config.yaml
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Naming server URL, overriding the config
    #[arg(long, global = true)]
    server: Option<String>,

    /// Use a local in-memory registry instead of the server
    #[arg(long, global = true)]
    offline: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Clone)]
enum Commands {
    /// Pick a new username interactively (default)
    Name,
    /// Set a username without the interactive screen
    Set {
        /// The username to claim
        name: String,
    },
    /// Print the effective configuration
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| config_file_path(&config_dir()));
    let config = apply_cli_overrides(load_resolved(&config_path).await?, &cli);

    let command = cli.command.clone().unwrap_or(Commands::Name);

    // The interactive screen owns stdout, so it only logs to file.
    let target = match command {
        Commands::Name => LogTarget::FileOnly,
        Commands::Set { .. } | Commands::Config => LogTarget::FileAndConsole,
    };
    let log_dir = config
        .logging
        .dir
        .clone()
        .unwrap_or_else(|| config_dir().join("logs"));
    init_logger(&log_dir, &config.logging.level, target)
        .with_context(|| format!("Failed to open log directory: {}", log_dir.display()))?;
    check_config(&config)?;

    match command {
        Commands::Name => run_screen(&config, cli.offline).await,
        Commands::Set { name } => set_name(&config, cli.offline, &name).await,
        Commands::Config => print_config(&config),
    }
}

/// Flags win over the config file and `HANDLE_*` variables.
fn apply_cli_overrides(mut config: HandleConfig, cli: &Cli) -> HandleConfig {
    if let Some(url) = &cli.server {
        config.server.url = url.clone();
    }
    config
}

async fn run_screen(config: &HandleConfig, offline: bool) -> Result<()> {
    let client = build_client(&config.server, offline)?;
    let theme = Theme::from_config(&config.theme)?;
    let screen = UsernameScreen::new(client, theme, config.validation.max_len);

    match screen.run().await? {
        ScreenOutcome::NameSet(name) => {
            info!(name = %name, "Username changed");
            println!("OK! Your new username is {}", name);
        }
        ScreenOutcome::Cancelled => {
            info!("Username unchanged");
        }
    }
    Ok(())
}

async fn set_name(config: &HandleConfig, offline: bool, name: &str) -> Result<()> {
    validate_name(name, config.validation.max_len)?;
    let client = build_client(&config.server, offline)?;
    let recorded = client
        .set_name(name)
        .await
        .with_context(|| format!("Failed to set username to {:?}", name))?;
    info!(name = %recorded, "Username changed");
    println!("OK! Your new username is {}", recorded);
    Ok(())
}

fn print_config(config: &HandleConfig) -> Result<()> {
    let value = serde_json::to_value(config).context("Failed to serialize config")?;
    let yaml = serde_yaml::to_string(&redact(&value)).context("Failed to render config")?;
    print!("{}", yaml);
    Ok(())
}
