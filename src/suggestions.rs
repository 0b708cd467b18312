//! # Error Suggestions
//!
//! Helper functions for error messages with hints. Errors should tell users
//! what went wrong AND how to fix it.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use template_sync::suggestions;
//!
//! // Instead of:
//! anyhow::bail!("Snapshot file not found: {}", path.display());
//!
//! // Use:
//! return Err(suggestions::snapshot_not_found("local", path));
//! ```

use std::path::Path;

/// Generate an error for a snapshot file that does not exist.
///
/// `role` is `local` or `system`.
pub fn snapshot_not_found(role: &str, path: &Path) -> anyhow::Error {
    anyhow::anyhow!(
        "{role} snapshot not found: {path}\n\n\
         hint: Use --{role} to point at the {role} snapshot file\n\
         hint: Snapshots are JSON, or YAML when the file ends in .yaml/.yml",
        role = role,
        path = path.display()
    )
}

/// Generate an error for a settings file that does not exist.
pub fn config_not_found(path: &Path) -> anyhow::Error {
    anyhow::anyhow!(
        "Configuration file not found: {path}\n\n\
         hint: Omit --config to use .template-sync.yaml from the current directory\n\
         hint: Unset the TEMPLATE_SYNC_CONFIG environment variable",
        path = path.display()
    )
}

/// Generate the error reported by `check` when a sync would change content.
pub fn sync_required() -> anyhow::Error {
    anyhow::anyhow!(
        "Sync required\n\n\
         hint: Run `template-sync sync` with the same --local and --system files"
    )
}
