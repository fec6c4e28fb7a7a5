pub mod commands;

use crate::config::{Direction, Environment, PortalIntegrationConfig};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "handoff")]
#[command(author, version, about = "Build and inspect portal/dashboard handoff links", long_about = None)]
pub struct Cli {
    /// Environment whose built-in config to use (development, production)
    #[arg(short, long, global = true, env = "HANDOFF_ENV", default_value = "development")]
    pub env: String,

    /// JSON config file overriding the built-in environment presets
    #[arg(short, long, global = true, env = "HANDOFF_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Application a link points at.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum Target {
    Portal,
    Dashboard,
}

impl From<Target> for Direction {
    fn from(target: Target) -> Self {
        match target {
            Target::Portal => Direction::ToPortal,
            Target::Dashboard => Direction::ToDashboard,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Build an outbound URL, optionally carrying handoff state
    Url {
        /// Application to link to
        target: Target,

        /// Route name (e.g. landing, auth, profile, home, deployments, analytics, team)
        route: String,

        /// URL the receiving app should return to
        #[arg(long)]
        return_url: Option<String>,

        /// Context entries as key=value (values are parsed as JSON when possible)
        #[arg(long = "context", value_name = "KEY=VALUE")]
        context: Vec<String>,
    },

    /// Decode the handoff token in a URL and show the cleaned URL
    Decode {
        /// Full URL or path containing a `handoff` query parameter
        url: String,
    },

    /// Probe the SSO endpoint for an authenticated session
    Sso,

    /// Show the resolved integration config
    Config,
}

impl Cli {
    /// Resolve the integration config from `--config` or `--env`.
    pub fn resolve_config(&self) -> Result<PortalIntegrationConfig, String> {
        if let Some(path) = &self.config {
            return Ok(PortalIntegrationConfig::load(path)?);
        }
        Ok(PortalIntegrationConfig::for_environment(
            Environment::from_indicator(&self.env),
        ))
    }
}

/// Run the CLI with parsed arguments
pub fn run(cli: Cli) -> Result<(), String> {
    let config = cli.resolve_config()?;

    match cli.command {
        Commands::Url {
            target,
            route,
            return_url,
            context,
        } => commands::url::run(config, target.into(), &route, return_url, &context, cli.format),
        Commands::Decode { url } => commands::decode::run(config, &url, cli.format),
        Commands::Sso => commands::sso::run(&config, cli.format),
        Commands::Config => commands::config::run(&config, cli.format),
    }
}
