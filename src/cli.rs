//! CLI argument parsing and command dispatch

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use log::LevelFilter;

use crate::commands;
use template_sync::config;
use template_sync::output::OutputConfig;

/// Template Sync - Reconcile local templates and banks with system content
#[derive(Parser, Debug)]
#[command(name = "template-sync")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Colorize output (always, never, auto)
    #[arg(long, global = true, value_name = "WHEN", default_value = "auto")]
    color: String,

    /// Set log level (error, warn, info, debug, trace)
    #[arg(long, global = true, value_name = "LEVEL", default_value = "warn")]
    log_level: String,

    /// Path to a .template-sync.yaml settings file
    #[arg(long, global = true, value_name = "FILE", env = "TEMPLATE_SYNC_CONFIG")]
    config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Reconcile the local snapshot with the system snapshot and save the result
    Sync(commands::sync::SyncArgs),

    /// Show what a sync would change without writing anything
    Check(commands::check::CheckArgs),

    /// List the templates of a snapshot
    Templates(commands::templates::TemplatesArgs),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        init_logging(self.log_level.parse().unwrap_or(LevelFilter::Warn));
        let output = OutputConfig::from_env_and_flag(&self.color);

        if let Some(path) = &self.config {
            if !path.exists() {
                return Err(template_sync::suggestions::config_not_found(path));
            }
        }
        let working_dir = std::env::current_dir()?;
        let settings = config::discover(self.config.as_deref(), &working_dir)?;

        let context = commands::Context { output, settings };
        match self.command {
            Commands::Sync(args) => commands::sync::execute(args, &context),
            Commands::Check(args) => commands::check::execute(args, &context),
            Commands::Templates(args) => commands::templates::execute(args, &context),
        }
    }
}

/// Route `log` records to stderr. `RUST_LOG`, when set, takes precedence.
fn init_logging(level: LevelFilter) {
    let mut builder = env_logger::Builder::new();
    builder.filter_level(level);
    if let Ok(filters) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filters);
    }
    let _ = builder.format_timestamp(None).try_init();
}
