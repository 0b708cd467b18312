//! # CLI Command Implementations
//!
//! This module contains the implementation for each subcommand of the
//! `template-sync` command-line tool. Each subcommand is defined in its own
//! file.
//!
//! ## Structure
//!
//! Each command module contains:
//! - An `Args` struct that defines the command-specific arguments and options,
//!   derived using `clap`.
//! - An `execute` function that takes the parsed `Args` and the shared
//!   [`Context`] and performs the command's logic by calling into the
//!   `template_sync` library.

pub mod check;
pub mod sync;
pub mod templates;

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use log::info;

use template_sync::config::Settings;
use template_sync::output::OutputConfig;
use template_sync::snapshot::{self, LocalSnapshot, SystemSnapshot};
use template_sync::suggestions;

/// State shared by every command.
#[derive(Debug)]
pub struct Context {
    pub output: OutputConfig,
    pub settings: Settings,
}

/// The pair of snapshot files a reconciliation works on.
#[derive(Args, Debug)]
pub struct SnapshotArgs {
    /// The local snapshot file (JSON, or YAML with a .yaml/.yml extension).
    ///
    /// A missing local file is treated as an empty snapshot.
    #[arg(short, long, value_name = "FILE")]
    pub local: PathBuf,

    /// The system snapshot file holding the canonical content.
    #[arg(short, long, value_name = "FILE")]
    pub system: PathBuf,
}

impl SnapshotArgs {
    /// Load both snapshots.
    pub fn load(&self) -> Result<(LocalSnapshot, SystemSnapshot)> {
        if !self.system.exists() {
            return Err(suggestions::snapshot_not_found("system", &self.system));
        }
        let system = snapshot::load_system(&self.system)?;

        let local = if self.local.exists() {
            snapshot::load_local(&self.local)?
        } else {
            info!(
                "local snapshot {} not found, starting from an empty one",
                self.local.display()
            );
            LocalSnapshot::default()
        };

        Ok((local, system))
    }
}
