//! Bank reconciliation
//!
//! Merges local banks and default selections with the canonical system set.
//!
//! System banks always win. For a bank the user also has locally, the only
//! thing carried over is the set of options the system list lacks; they are
//! appended after the system options in local order. Label, category and any
//! other property of a shared bank come from the system silently.
//!
//! Local-only banks are kept as custom banks, together with their default
//! selection. Local defaults also fill in any bank the system gives no
//! default for.

use std::collections::HashSet;

use log::{debug, info};

use super::MergeState;
use crate::error::Result;
use crate::keys::CUSTOM_TAG;
use crate::model::{BankMap, DefaultMap, OptionValue};
use crate::value::option_identity;

/// Result of a bank reconciliation pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BankMerge {
    pub banks: BankMap,
    pub defaults: DefaultMap,
    pub notes: Vec<String>,
}

/// Reconcile local banks and defaults with the canonical system ones.
///
/// # Errors
///
/// Returns `Error::Serialization` if an option value cannot be reduced to
/// its identity. This points at malformed input, not at a merge failure.
///
/// # Examples
///
/// ```
/// use template_sync::merge::reconcile_banks;
/// use template_sync::model::{Bank, BankMap, DefaultMap, OptionValue};
///
/// let system = BankMap::from([("colors".to_string(), Bank::new("Colors", ["red", "blue"]))]);
/// let local = BankMap::from([(
///     "colors".to_string(),
///     Bank::new("Colors", ["red", "blue", "green"]),
/// )]);
///
/// let merged = reconcile_banks(&local, &DefaultMap::new(), &system, &DefaultMap::new()).unwrap();
/// let options: Vec<OptionValue> = ["red", "blue", "green"].into_iter().map(Into::into).collect();
/// assert_eq!(merged.banks["colors"].options, options);
/// assert_eq!(merged.notes.len(), 1);
/// ```
pub fn reconcile_banks(
    local: &BankMap,
    local_defaults: &DefaultMap,
    system: &BankMap,
    system_defaults: &DefaultMap,
) -> Result<BankMerge> {
    let mut banks = system.clone();
    let mut defaults = system_defaults.clone();
    let mut state = MergeState::seeded(system.keys().cloned());

    for (key, bank) in local.iter().filter(|(key, _)| system.contains_key(*key)) {
        let Some(target) = banks.get_mut(key) else {
            continue;
        };

        let custom = custom_options(&target.options, &bank.options)?;
        if custom.is_empty() {
            continue;
        }

        debug!("keeping {} custom options in bank {}", custom.len(), key);
        target.options.extend(custom);
        state.note(format!(
            "bank {} synced with system update, custom options preserved",
            key
        ));
    }

    for (key, bank) in local.iter().filter(|(key, _)| !system.contains_key(*key)) {
        let new_key = if state.is_used(key) {
            let renamed = state.claim_derived(key, CUSTOM_TAG);
            debug!("renaming custom bank {} to {}", key, renamed);
            state.note(format!(
                "custom bank {} renamed to {} due to conflict",
                key, renamed
            ));
            renamed
        } else {
            state.reserve(key);
            key.clone()
        };

        banks.insert(new_key.clone(), bank.clone());
        if let Some(value) = local_defaults.get(key) {
            defaults.insert(new_key, value.clone());
        }
    }

    for (key, value) in local_defaults {
        if !defaults.contains_key(key) && banks.contains_key(key) {
            defaults.insert(key.clone(), value.clone());
        }
    }

    info!(
        "reconciled {} local banks against {} system banks: {} merged",
        local.len(),
        system.len(),
        banks.len()
    );

    Ok(BankMerge {
        banks,
        defaults,
        notes: state.into_notes(),
    })
}

/// Options in `local` whose identity is not in `system`, first occurrence
/// only, in local order.
fn custom_options(system: &[OptionValue], local: &[OptionValue]) -> Result<Vec<OptionValue>> {
    let mut seen = system
        .iter()
        .map(|option| option_identity(option).map(|identity| identity.into_owned()))
        .collect::<Result<HashSet<String>>>()?;

    let mut custom = Vec::new();
    for option in local {
        if seen.insert(option_identity(option)?.into_owned()) {
            custom.push(option.clone());
        }
    }
    Ok(custom)
}
