//! Identifier allocation and backup-id recognition.
//!
//! Both reconcilers must keep ids (and bank keys) unique in their output. New
//! ids are derived from an existing one by appending a tag and, if needed, a
//! counter: `poster_user`, `poster_user1`, `poster_user2`, ...
//!
//! Backups of system templates are recognized purely by that naming scheme,
//! see [`SystemIds::backup_origin`].

use std::collections::{HashMap, HashSet};

/// Tag used for backups of edited system templates.
pub const USER_TAG: &str = "user";

/// Tag used when a custom entity is renamed away from a conflicting id.
pub const CUSTOM_TAG: &str = "custom";

/// Allocate an id derived from `base` that is not in `used`.
///
/// Returns `{base}_{tag}` if free, otherwise `{base}_{tag}1`, `{base}_{tag}2`,
/// and so on. `used` is not modified; the caller must insert the result
/// before allocating again.
///
/// # Examples
///
/// ```
/// use std::collections::{HashMap, HashSet};
/// use template_sync::keys::allocate_unique_key;
///
/// let mut used: HashSet<String> = ["t1".to_string()].into();
/// let first = allocate_unique_key("t1", &used, "user");
/// assert_eq!(first, "t1_user");
/// used.insert(first);
/// assert_eq!(allocate_unique_key("t1", &used, "user"), "t1_user1");
/// ```
pub fn allocate_unique_key(base: &str, used: &HashSet<String>, tag: &str) -> String {
    let stem = format!("{base}_{tag}");
    if !used.contains(&stem) {
        return stem;
    }
    let mut counter: u64 = 1;
    loop {
        let candidate = format!("{stem}{counter}");
        if !used.contains(&candidate) {
            return candidate;
        }
        counter += 1;
    }
}

/// Lookup table over the system ids of one reconciliation pass.
///
/// Remembers the position of each id's first occurrence, which is also what
/// decides between competing matches in [`SystemIds::backup_origin`].
#[derive(Debug, Default)]
pub struct SystemIds<'a> {
    positions: HashMap<&'a str, usize>,
}

impl<'a> SystemIds<'a> {
    /// Index `ids` in the order given.
    pub fn new<I>(ids: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut positions = HashMap::new();
        for (index, id) in ids.into_iter().enumerate() {
            positions.entry(id).or_insert(index);
        }
        Self { positions }
    }

    /// Position of the first occurrence of `id`.
    pub fn position(&self, id: &str) -> Option<usize> {
        self.positions.get(id).copied()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.positions.contains_key(id)
    }

    /// Find the system id that `id` is a backup of, if any.
    ///
    /// An id is treated as a backup of system id `s` when it is not `s`
    /// itself and starts with `s_user` or `s_custom`. When several system ids
    /// qualify, the one listed first wins.
    ///
    /// This is a pure naming check: a custom template whose id happens to
    /// follow the pattern is classified as a backup too.
    pub fn backup_origin(&self, id: &str) -> Option<&'a str> {
        id.match_indices('_')
            .filter(|(at, _)| {
                let rest = &id[at + 1..];
                rest.starts_with(USER_TAG) || rest.starts_with(CUSTOM_TAG)
            })
            .filter_map(|(at, _)| self.positions.get_key_value(&id[..at]))
            .min_by_key(|(_, position)| **position)
            .map(|(system_id, _)| *system_id)
    }
}
