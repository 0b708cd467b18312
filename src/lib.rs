//! # Template Sync Library
//!
//! This library reconciles a client's local, possibly edited copy of prompt
//! templates and option banks with the canonical content published by a
//! server. It is used by the `template-sync` command-line tool but is plain
//! synchronous code with no I/O in its core, so any client can embed it.
//!
//! ## Quick Example
//!
//! ```
//! use template_sync::merge::reconcile_templates;
//! use template_sync::model::Template;
//!
//! let system = vec![Template::new("poster", "Poster", "A poster of {subject}")];
//! let local = vec![
//!     Template::new("poster", "My poster", "A poster of {subject}"),
//!     Template::new("mine", "Mine", "Something of my own"),
//! ];
//!
//! let merged = reconcile_templates(&local, &system, " (backup)");
//! let ids: Vec<&str> = merged.templates.iter().map(|t| t.id.as_str()).collect();
//! assert_eq!(ids, ["poster", "poster_user", "mine"]);
//! assert_eq!(merged.notes.len(), 1);
//! ```
//!
//! ## Core Concepts
//!
//! - **Model (`model`)**: Templates, banks, localized text and option values.
//! - **Keys (`keys`)**: Collision-free id allocation and backup-id detection.
//! - **Values (`value`)**: Option identity and shape-tolerant text equality.
//! - **Merge (`merge`)**: The template and bank reconcilers. System content
//!   always wins, user edits survive as backups, custom content is kept.
//! - **Snapshots (`snapshot`)**: Local and system documents on disk.
//! - **Sync (`sync`)**: Runs both reconcilers over a pair of snapshots.
//!
//! ## Execution Flow
//!
//! A client fetches the system snapshot, loads its local snapshot, and calls
//! [`sync::synchronize`], which:
//!
//! 1.  **Templates**: Reconciles the template lists, backing up edited system
//!     templates and dropping backups a fresh one supersedes.
//! 2.  **Banks**: Reconciles banks and default selections, keeping user-only
//!     options and custom banks.
//! 3.  **Stamp**: Marks the merged snapshot with the system data version.
//!
//! The caller persists the merged snapshot and shows the notes as a
//! changelog.

pub mod config;
pub mod defaults;
pub mod error;
pub mod keys;
pub mod merge;
pub mod model;
pub mod output;
pub mod snapshot;
pub mod suggestions;
pub mod sync;
pub mod value;

#[cfg(test)]
mod merge_proptest;
