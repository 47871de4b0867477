use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use placement_core::config::{LogFormat, LoggingConfig, PortalConfig};
use placement_infrastructure::ConfigService;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

mod commands;

#[derive(Parser)]
#[command(name = "placement")]
#[command(about = "Placement portal CLI - access decisions and application statuses", long_about = None)]
struct Cli {
    /// Path to the configuration file (defaults to the user config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List application statuses with their labels and badges
    Statuses {
        #[arg(long)]
        json: bool,
    },
    /// Decide what a view requiring a role should do for a session
    Guard {
        /// Role the view requires
        #[arg(long)]
        required: String,
        /// Role of the signed-in session (omit for a signed-out visitor)
        #[arg(long)]
        role: Option<String>,
        /// Treat the session as still loading
        #[arg(long)]
        loading: bool,
        #[arg(long)]
        json: bool,
    },
    /// Resolve a request path through the route table and guard
    Route {
        path: String,
        #[arg(long)]
        role: Option<String>,
        #[arg(long)]
        loading: bool,
        #[arg(long)]
        json: bool,
    },
    /// Manage the configuration file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the effective configuration
    Show,
    /// Write a default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Print the configuration file path
    Path,
}

impl Commands {
    /// Commands that locate or rewrite the config file must work when it is broken.
    fn tolerates_broken_config(&self) -> bool {
        matches!(
            self,
            Commands::Config {
                action: ConfigAction::Init { .. } | ConfigAction::Path
            }
        )
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_service = match cli.config {
        Some(path) => ConfigService::with_path(path),
        None => ConfigService::new()?,
    };
    let (config, load_error) = match config_service.get_config() {
        Ok(config) => (config, None),
        Err(err) if cli.command.tolerates_broken_config() => (PortalConfig::default(), Some(err)),
        Err(err) => return Err(err.into()),
    };
    init_logging(&config.logging);
    match load_error {
        Some(err) => tracing::warn!(
            path = %config_service.config_path().display(),
            "Ignoring unreadable configuration: {}", err
        ),
        None => tracing::debug!(
            path = %config_service.config_path().display(),
            "Configuration loaded"
        ),
    }

    match cli.command {
        Commands::Statuses { json } => commands::statuses::run(json)?,
        Commands::Guard {
            required,
            role,
            loading,
            json,
        } => commands::guard::decide(&config.routes, &required, role.as_deref(), loading, json)?,
        Commands::Route {
            path,
            role,
            loading,
            json,
        } => {
            commands::guard::route(&config.routes, &path, role.as_deref(), loading, json).await?
        }
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config::show(&config)?,
            ConfigAction::Init { force } => commands::config::init(&config_service, force)?,
            ConfigAction::Path => commands::config::path(&config_service),
        },
    }

    Ok(())
}

/// Installs the global subscriber. `RUST_LOG` wins over the configured level.
fn init_logging(config: &LoggingConfig) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    match config.format {
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(
                    fmt::layer()
                        .json()
                        .flatten_event(true)
                        .with_current_span(false)
                        .with_writer(std::io::stderr),
                )
                .init();
        }
        LogFormat::Text => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn test_config_repair_commands_skip_loading() {
        assert!(parse(&["placement", "config", "init", "--force"])
            .command
            .tolerates_broken_config());
        assert!(parse(&["placement", "--config", "/tmp/x.toml", "config", "path"])
            .command
            .tolerates_broken_config());
        assert!(!parse(&["placement", "config", "show"])
            .command
            .tolerates_broken_config());
        assert!(!parse(&["placement", "guard", "--required", "admin"])
            .command
            .tolerates_broken_config());
    }
}
