//! Sync command implementation
//!
//! Reconciles the local snapshot with the system snapshot:
//! 1. Loads both snapshots
//! 2. Reconciles templates, then banks
//! 3. Skips writing if the local snapshot is already at the system version
//!    and the merge leaves it unchanged
//! 4. Writes the merged snapshot and prints the changelog

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use super::{Context, SnapshotArgs};
use template_sync::output::{emoji, render_changelog};
use template_sync::snapshot;
use template_sync::sync::{needs_sync, synchronize};

/// Arguments for the sync command
#[derive(Args, Debug)]
pub struct SyncArgs {
    #[command(flatten)]
    pub snapshots: SnapshotArgs,

    /// Where to write the merged snapshot (defaults to the local snapshot file)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Suffix appended to the names of backed up templates
    #[arg(long, value_name = "SUFFIX")]
    pub backup_suffix: Option<String>,

    /// Write the merged snapshot even if it is already up to date
    #[arg(short, long)]
    pub force: bool,

    /// Show what would change without writing anything
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Suppress all output except errors
    #[arg(short, long)]
    pub quiet: bool,
}

/// Execute the sync command
pub fn execute(args: SyncArgs, context: &Context) -> Result<()> {
    let (local, system) = args.snapshots.load()?;
    let output = &context.output;

    let options = context
        .settings
        .sync_options(args.backup_suffix.as_deref());
    let outcome = synchronize(&local, &system, &options)?;

    // Edits made after the last sync still need reconciling at the same version.
    if !args.force && !needs_sync(&local, &system) && outcome.snapshot == local {
        if !args.quiet {
            println!(
                "{} Already at system version {}, nothing to do.",
                emoji(output, "✅", "[OK]"),
                system.data_version
            );
        }
        return Ok(());
    }

    if !args.quiet {
        print!("{}", render_changelog(output, &outcome.notes));
    }

    if args.dry_run {
        if !args.quiet {
            println!(
                "{} Dry run: no files were written.",
                emoji(output, "🔎", "[DRY RUN]")
            );
        }
        return Ok(());
    }

    let destination = args.output.as_ref().unwrap_or(&args.snapshots.local);
    snapshot::save_local(destination, &outcome.snapshot)?;

    if !args.quiet {
        println!(
            "{} Saved {} templates and {} banks at version {} to {}",
            emoji(output, "💾", "[SAVED]"),
            outcome.snapshot.templates.len(),
            outcome.snapshot.banks.len(),
            system.data_version,
            destination.display()
        );
    }

    Ok(())
}
