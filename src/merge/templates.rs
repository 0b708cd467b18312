//! Template reconciliation
//!
//! Merges a local template list with the canonical system list.
//!
//! ## Rules
//!
//! - Every system template is copied into the output as is. System content
//!   always wins.
//! - A local template with a system id only contributes its placeholder
//!   selections, which are layered over the system copy.
//! - If its name or content differs from the system copy, it is also kept as
//!   a backup under a fresh `<id>_user[N]` id with the backup suffix appended
//!   to its name. At most one backup is made per system id per pass.
//! - Local backups left over from earlier passes (`<id>_user*`,
//!   `<id>_custom*`) are dropped when a fresh backup of the same system id was
//!   made in this pass, so backups never pile up across syncs.
//! - Every other local template is custom content and is kept, renamed to
//!   `<id>_custom[N]` if its id is already taken.
//!
//! System-matching templates are always processed before the others; the
//! stale-backup rule depends on knowing every fresh backup first.
//!
//! A template that disappears from the system list gets no special treatment:
//! its local copy becomes a custom template from the next pass on.

use std::collections::HashSet;

use log::{debug, info};

use super::MergeState;
use crate::keys::{SystemIds, CUSTOM_TAG, USER_TAG};
use crate::model::Template;
use crate::value::same_template_content;

/// Result of a template reconciliation pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TemplateMerge {
    /// Merged templates: system templates first, in system order, followed by
    /// backups and then custom templates in local order.
    pub templates: Vec<Template>,
    /// Human-readable description of every backup and rename.
    pub notes: Vec<String>,
}

/// Reconcile `local` templates with the canonical `system` templates.
///
/// `backup_suffix` is appended to every locale of a backup's name.
///
/// # Examples
///
/// ```
/// use template_sync::merge::reconcile_templates;
/// use template_sync::model::Template;
///
/// let system = vec![Template::new("t1", "A", "X")];
/// let local = vec![Template::new("t1", "A-edit", "X")];
///
/// let merged = reconcile_templates(&local, &system, " (backup)");
/// assert_eq!(merged.templates.len(), 2);
/// assert_eq!(merged.templates[1].id, "t1_user");
/// assert_eq!(merged.notes.len(), 1);
/// ```
pub fn reconcile_templates(
    local: &[Template],
    system: &[Template],
    backup_suffix: &str,
) -> TemplateMerge {
    let mut templates: Vec<Template> = system.to_vec();
    let system_ids = SystemIds::new(system.iter().map(|t| t.id.as_str()));

    let mut state = MergeState::seeded(system.iter().map(|t| t.id.clone()));
    let mut backed_up: HashSet<&str> = HashSet::new();

    for template in local.iter() {
        let Some(position) = system_ids.position(&template.id) else {
            continue;
        };
        let canonical = &mut templates[position];
        canonical.selections.extend(
            template
                .selections
                .iter()
                .map(|(placeholder, value)| (placeholder.clone(), value.clone())),
        );

        if same_template_content(template, canonical) || backed_up.contains(template.id.as_str())
        {
            continue;
        }

        let backup_id = state.claim_derived(&template.id, USER_TAG);
        debug!("backing up edited template {} as {}", template.id, backup_id);
        templates.push(Template {
            id: backup_id.clone(),
            name: template
                .name
                .as_ref()
                .map(|name| name.with_suffix(backup_suffix)),
            ..template.clone()
        });
        state.note(format!(
            "template {} updated, old version backed up as {}",
            template.id, backup_id
        ));
        backed_up.insert(template.id.as_str());
    }

    for template in local.iter().filter(|t| !system_ids.contains(&t.id)) {
        if let Some(origin) = system_ids.backup_origin(&template.id) {
            if backed_up.contains(origin) {
                debug!(
                    "dropping stale backup {} superseded by a fresh backup of {}",
                    template.id, origin
                );
                continue;
            }
        }

        let id = if state.is_used(&template.id) {
            let renamed = state.claim_derived(&template.id, CUSTOM_TAG);
            debug!("renaming custom template {} to {}", template.id, renamed);
            state.note(format!(
                "custom template {} renamed to {} due to conflict",
                template.id, renamed
            ));
            renamed
        } else {
            state.reserve(&template.id);
            template.id.clone()
        };

        templates.push(Template {
            id,
            ..template.clone()
        });
    }

    info!(
        "reconciled {} local templates against {} system templates: {} merged, {} backed up",
        local.len(),
        system.len(),
        templates.len(),
        backed_up.len()
    );

    TemplateMerge {
        templates,
        notes: state.into_notes(),
    }
}
