//! # Check Command Implementation
//!
//! This module implements the `check` subcommand, which reports what a sync
//! would do without writing anything.
//!
//! ## Functionality
//!
//! - **Version Check**: Compares the data version recorded in the local
//!   snapshot with the system snapshot's version.
//! - **Dry Reconciliation**: Runs the full reconciliation in memory and
//!   prints the changelog it would produce.
//! - **Exit Codes**: Returns 0 when the local snapshot is already up to date,
//!   1 when a sync would change it.
//!
//! This command is a safe, read-only operation that does not modify any files.

use anyhow::Result;
use clap::Args;

use super::{Context, SnapshotArgs};
use template_sync::output::render_changelog;
use template_sync::suggestions;
use template_sync::sync::{needs_sync, synchronize};

/// Show what a sync would change without writing anything
#[derive(Args, Debug)]
pub struct CheckArgs {
    #[command(flatten)]
    pub snapshots: SnapshotArgs,
}

/// Execute the `check` command.
///
/// The local snapshot is up to date when it already carries the system data
/// version and reconciling it again would leave it unchanged.
pub fn execute(args: CheckArgs, context: &Context) -> Result<()> {
    let (local, system) = args.snapshots.load()?;

    let behind = needs_sync(&local, &system);
    let outcome = synchronize(&local, &system, &context.settings.sync_options(None))?;

    println!(
        "Local version: {}",
        local.data_version.as_deref().unwrap_or("(never synced)")
    );
    println!("System version: {}", system.data_version);
    println!();
    print!("{}", render_changelog(&context.output, &outcome.notes));

    if behind || outcome.snapshot != local {
        return Err(suggestions::sync_required());
    }

    println!("Up to date.");
    Ok(())
}
