//! Property-based tests for the reconcilers.
//!
//! These tests use proptest to generate random local and system snapshots
//! and verify that the merge invariants hold for all of them.

#[cfg(test)]
mod proptest_tests {
    use std::collections::{HashMap, HashSet};

    use proptest::prelude::*;
    use serde_json::json;

    use crate::keys::{SystemIds, CUSTOM_TAG, USER_TAG};
    use crate::merge::{reconcile_banks, reconcile_templates};
    use crate::model::{Bank, BankMap, DefaultMap, LocalizedText, OptionValue, Template};
    use crate::value::{option_identity, same_template_content};

    const SUFFIX: &str = " (backup)";

    // ============================================================================
    // Strategies
    // ============================================================================

    /// Ids drawn from a small pool so collisions and backup-shaped ids are common.
    fn id_strategy() -> impl Strategy<Value = String> {
        prop::sample::select(vec![
            "a", "b", "c", "a_user", "a_user1", "a_custom", "b_user", "b_custom2", "c_user_x",
        ])
        .prop_map(str::to_string)
    }

    fn text_strategy() -> impl Strategy<Value = LocalizedText> {
        prop_oneof![
            prop::sample::select(vec!["A", "B", "C"]).prop_map(LocalizedText::from),
            (
                prop::sample::select(vec!["甲", "乙"]),
                prop::sample::select(vec!["A", "B"])
            )
                .prop_map(|(cn, en)| LocalizedText::localized([("cn", cn), ("en", en)])),
        ]
    }

    fn template_strategy() -> impl Strategy<Value = Template> {
        (
            id_strategy(),
            text_strategy(),
            text_strategy(),
            prop::option::of(prop::sample::select(vec!["red", "blue"])),
        )
            .prop_map(|(id, name, content, selection)| {
                let template = Template::new(id, name, content);
                match selection {
                    Some(value) => template.with_selection("color", value),
                    None => template,
                }
            })
    }

    /// System lists never repeat an id.
    fn system_strategy() -> impl Strategy<Value = Vec<Template>> {
        prop::collection::vec(template_strategy(), 0..6).prop_map(|templates| {
            let mut seen = HashSet::new();
            templates
                .into_iter()
                .filter(|t| seen.insert(t.id.clone()))
                .collect()
        })
    }

    fn local_strategy() -> impl Strategy<Value = Vec<Template>> {
        prop::collection::vec(template_strategy(), 0..8)
    }

    fn option_strategy() -> impl Strategy<Value = OptionValue> {
        prop_oneof![
            prop::sample::select(vec!["red", "blue", "green", "teal"]).prop_map(OptionValue::from),
            prop::sample::select(vec!["oil", "ink"])
                .prop_map(|en| OptionValue::from(json!({"en": en, "cn": en.to_uppercase()}))),
        ]
    }

    fn bank_map_strategy() -> impl Strategy<Value = BankMap> {
        prop::collection::btree_map(
            prop::sample::select(vec!["colors", "styles", "moods"]).prop_map(str::to_string),
            prop::collection::vec(option_strategy(), 0..6)
                .prop_map(|options| Bank::new("label", options)),
            0..3,
        )
    }

    fn identities(options: &[OptionValue]) -> Vec<String> {
        options
            .iter()
            .map(|o| option_identity(o).unwrap().into_owned())
            .collect()
    }

    // ============================================================================
    // Template reconciler properties
    // ============================================================================

    proptest! {
        /// Property: reconciling the merged output again reports nothing
        #[test]
        fn reconcile_templates_is_idempotent(local in local_strategy(), system in system_strategy()) {
            let first = reconcile_templates(&local, &system, SUFFIX);
            let second = reconcile_templates(&first.templates, &system, SUFFIX);
            prop_assert!(second.notes.is_empty(), "second pass notes: {:?}", second.notes);
            prop_assert_eq!(second.templates, first.templates);
        }

        /// Property: merged template ids are pairwise distinct
        #[test]
        fn reconcile_templates_ids_are_unique(local in local_strategy(), system in system_strategy()) {
            let merged = reconcile_templates(&local, &system, SUFFIX);
            let mut seen = HashSet::new();
            for template in &merged.templates {
                prop_assert!(seen.insert(template.id.as_str()), "duplicate id {}", template.id);
            }
        }

        /// Property: every system id keeps its system name and content
        #[test]
        fn reconcile_templates_system_wins(local in local_strategy(), system in system_strategy()) {
            let merged = reconcile_templates(&local, &system, SUFFIX);
            for sys in &system {
                let matching: Vec<_> = merged.templates.iter().filter(|t| t.id == sys.id).collect();
                prop_assert_eq!(matching.len(), 1);
                prop_assert!(same_template_content(matching[0], sys));
            }
        }

        /// Property: at most one backup per system id per pass, and each backup
        /// named in a note is present in the output
        #[test]
        fn reconcile_templates_single_backup_per_id(local in local_strategy(), system in system_strategy()) {
            let merged = reconcile_templates(&local, &system, SUFFIX);
            let merged_ids: HashSet<&str> = merged.templates.iter().map(|t| t.id.as_str()).collect();

            let mut backups_per_id: HashMap<String, usize> = HashMap::new();
            for note in &merged.notes {
                if let Some(rest) = note.strip_prefix("template ") {
                    let (sys_id, backup_id) = rest
                        .split_once(" updated, old version backed up as ")
                        .expect("backup note format");
                    *backups_per_id.entry(sys_id.to_string()).or_default() += 1;
                    let prefix = format!("{}_user", sys_id);
                    prop_assert!(backup_id.starts_with(&prefix), "{} is not a backup of {}", backup_id, sys_id);
                    prop_assert!(merged_ids.contains(backup_id));
                }
            }
            for (sys_id, count) in backups_per_id {
                prop_assert!(count <= 1, "{} backed up {} times", sys_id, count);
            }
        }

        /// Property: output length never exceeds system plus local
        #[test]
        fn reconcile_templates_never_invents_entries(local in local_strategy(), system in system_strategy()) {
            let merged = reconcile_templates(&local, &system, SUFFIX);
            prop_assert!(merged.templates.len() <= system.len() + local.len());
            prop_assert!(merged.templates.len() >= system.len());
        }
    }

    // ============================================================================
    // Backup-id lookup properties
    // ============================================================================

    /// Scan every system id in order, the straightforward way.
    fn scan_backup_origin<'a>(id: &str, system_ids: &[&'a str]) -> Option<&'a str> {
        system_ids.iter().copied().find(|system_id| {
            id != *system_id
                && id
                    .strip_prefix(system_id)
                    .and_then(|rest| rest.strip_prefix('_'))
                    .is_some_and(|rest| rest.starts_with(USER_TAG) || rest.starts_with(CUSTOM_TAG))
        })
    }

    fn segment_strategy() -> impl Strategy<Value = &'static str> {
        prop::sample::select(vec!["a", "b", "user", "custom", "user1", "x"])
    }

    fn joined_id_strategy() -> impl Strategy<Value = String> {
        prop::collection::vec(segment_strategy(), 1..5).prop_map(|parts| parts.join("_"))
    }

    proptest! {
        /// Property: the indexed lookup agrees with a scan over all system ids
        #[test]
        fn backup_origin_matches_scan(
            id in joined_id_strategy(),
            system in prop::collection::vec(joined_id_strategy(), 0..6)
        ) {
            let system_ids: Vec<&str> = system.iter().map(String::as_str).collect();
            let index = SystemIds::new(system_ids.iter().copied());
            prop_assert_eq!(index.backup_origin(&id), scan_backup_origin(&id, &system_ids));
        }
    }

    // ============================================================================
    // Bank reconciler properties
    // ============================================================================

    proptest! {
        /// Property: shared banks keep every system option in order, followed by
        /// each local-only option exactly once
        #[test]
        fn reconcile_banks_option_superset(local in bank_map_strategy(), system in bank_map_strategy()) {
            let merged = reconcile_banks(&local, &DefaultMap::new(), &system, &DefaultMap::new()).unwrap();

            for (key, sys_bank) in &system {
                let merged_ids = identities(&merged.banks[key].options);
                let sys_ids = identities(&sys_bank.options);
                prop_assert_eq!(&merged_ids[..sys_ids.len()], &sys_ids[..]);

                if let Some(local_bank) = local.get(key) {
                    for identity in identities(&local_bank.options) {
                        if !sys_ids.contains(&identity) {
                            let count = merged_ids.iter().filter(|i| **i == identity).count();
                            prop_assert_eq!(count, 1);
                        }
                    }
                }
            }
        }

        /// Property: every local bank key ends up in the output
        #[test]
        fn reconcile_banks_keeps_every_key(local in bank_map_strategy(), system in bank_map_strategy()) {
            let merged = reconcile_banks(&local, &DefaultMap::new(), &system, &DefaultMap::new()).unwrap();
            for key in local.keys().chain(system.keys()) {
                prop_assert!(merged.banks.contains_key(key));
            }
            prop_assert_eq!(
                merged.banks.len(),
                local.keys().chain(system.keys()).collect::<HashSet<_>>().len()
            );
        }
    }
}
