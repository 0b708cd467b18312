//! # Sync Orchestrator
//!
//! Runs one full reconciliation of a local snapshot against a system
//! snapshot: templates first, then banks. The result is a complete new local
//! snapshot, stamped with the system data version, plus the combined
//! changelog.
//!
//! ## Caller Obligations
//!
//! Each pass only knows about the backups it creates itself. Repeated syncs
//! stay stable only if the caller persists the whole merged snapshot returned
//! here and feeds it back as the local snapshot next time. Fetching,
//! persisting, retrying and cancelling are all left to the caller.

use log::info;

use crate::defaults::DEFAULT_BACKUP_SUFFIX;
use crate::error::Result;
use crate::merge::{reconcile_banks, reconcile_templates};
use crate::snapshot::{LocalSnapshot, SystemSnapshot};

/// Options for a sync pass.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SyncOptions {
    /// Appended to the display name of every backup.
    pub backup_suffix: String,
}

impl Default for SyncOptions {
    fn default() -> Self {
        Self {
            backup_suffix: DEFAULT_BACKUP_SUFFIX.to_string(),
        }
    }
}

/// Outcome of a sync pass.
#[derive(Clone, Debug, PartialEq)]
pub struct SyncOutcome {
    /// The merged snapshot to persist in place of the local one.
    pub snapshot: LocalSnapshot,
    /// Template notes followed by bank notes.
    pub notes: Vec<String>,
}

impl SyncOutcome {
    /// Whether the pass reported anything.
    pub fn has_notes(&self) -> bool {
        !self.notes.is_empty()
    }
}

/// Whether `local` was last reconciled against a different system version.
pub fn needs_sync(local: &LocalSnapshot, system: &SystemSnapshot) -> bool {
    local.data_version.as_deref() != Some(system.data_version.as_str())
}

/// Reconcile `local` with `system`.
///
/// # Errors
///
/// Returns `Error::Serialization` if a bank option cannot be reduced to its
/// identity.
pub fn synchronize(
    local: &LocalSnapshot,
    system: &SystemSnapshot,
    options: &SyncOptions,
) -> Result<SyncOutcome> {
    let templates = reconcile_templates(&local.templates, &system.templates, &options.backup_suffix);
    let banks = reconcile_banks(&local.banks, &local.defaults, &system.banks, &system.defaults)?;

    let mut notes = templates.notes;
    notes.extend(banks.notes);

    info!(
        "synchronized local snapshot ({}) to system version {} with {} notes",
        local.data_version.as_deref().unwrap_or("never synced"),
        system.data_version,
        notes.len()
    );

    Ok(SyncOutcome {
        snapshot: LocalSnapshot {
            data_version: Some(system.data_version.clone()),
            templates: templates.templates,
            banks: banks.banks,
            defaults: banks.defaults,
        },
        notes,
    })
}
