//! Reconciliation of local content with canonical system content
//!
//! This module holds the two reconcilers. Each one takes a local snapshot
//! (possibly edited by the user, possibly carrying leftovers from earlier
//! passes) and the canonical system snapshot, and produces a merged snapshot
//! plus a list of human-readable notes describing what changed.
//!
//! ## Reconcilers
//!
//! - Templates (templates.rs) - system content wins, divergent user edits are
//!   kept as a single backup per system template
//! - Banks (banks.rs) - system banks win, user-only options are appended
//!
//! Both are pure functions. They hold no state between calls, so separate
//! callers may run them concurrently. The template reconciler should run
//! before the bank reconciler; neither calls the other.
//!
//! ## Shared State
//!
//! [`MergeState`] is the per-call accumulator of ids already present in the
//! output and notes emitted so far. It is created at the start of a pass and
//! consumed at the end.

pub mod banks;
pub mod templates;

pub use banks::{reconcile_banks, BankMerge};
pub use templates::{reconcile_templates, TemplateMerge};

use std::collections::HashSet;

use crate::keys::allocate_unique_key;

/// Ids claimed in the output of one reconciliation pass, plus its notes.
#[derive(Debug, Default)]
pub struct MergeState {
    used: HashSet<String>,
    notes: Vec<String>,
}

impl MergeState {
    /// Start a pass with `ids` already claimed.
    pub fn seeded<I>(ids: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        Self {
            used: ids.into_iter().collect(),
            notes: Vec::new(),
        }
    }

    /// Whether `id` is already present in the output.
    pub fn is_used(&self, id: &str) -> bool {
        self.used.contains(id)
    }

    /// Claim `id` as is.
    pub fn reserve(&mut self, id: &str) {
        self.used.insert(id.to_string());
    }

    /// Allocate and claim a fresh id derived from `base`.
    pub fn claim_derived(&mut self, base: &str, tag: &str) -> String {
        let id = allocate_unique_key(base, &self.used, tag);
        self.used.insert(id.clone());
        id
    }

    /// Record a note for the changelog.
    pub fn note(&mut self, note: String) {
        self.notes.push(note);
    }

    /// Notes recorded so far.
    pub fn notes(&self) -> &[String] {
        &self.notes
    }

    /// Finish the pass and return its notes.
    pub fn into_notes(self) -> Vec<String> {
        self.notes
    }
}
