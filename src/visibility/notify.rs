// SPDX-License-Identifier: MIT

//! Channel notifications for tasks added by a property change

use serde::Serialize;

use super::diff::ChecklistDiff;
use crate::property::{PropertySnapshot, PropertyUpdate};

/// One changed field as it should be described to users
#[derive(Debug, Clone, PartialEq, Eq)]
struct ChangedField {
    field_id: String,
    name: String,
    label: String,
}

/// Who changed what, accumulated until the result is displayed
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ChangeSummary {
    pub actor: String,
    fields: Vec<ChangedField>,
}

impl ChangeSummary {
    /// Describe `update` using the snapshot it produced
    pub fn from_update(update: &PropertyUpdate, after: &PropertySnapshot) -> Self {
        let fields = update
            .changes
            .iter()
            .filter_map(|change| {
                let field = after.field(&change.field_id)?;
                Some(ChangedField {
                    field_id: field.id.clone(),
                    name: field.name.clone(),
                    label: after.value_label(&field.id),
                })
            })
            .collect();

        Self {
            actor: update.actor.clone(),
            fields,
        }
    }

    /// Fold a later change into this one; later labels replace earlier ones
    pub fn merge(&mut self, later: ChangeSummary) {
        self.actor = later.actor;
        for field in later.fields {
            match self.fields.iter_mut().find(|f| f.field_id == field.field_id) {
                Some(existing) => *existing = field,
                None => self.fields.push(field),
            }
        }
    }

    pub fn field_name(&self) -> String {
        self.fields
            .iter()
            .map(|f| f.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn value_label(&self) -> String {
        self.fields
            .iter()
            .map(|f| f.label.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Payload handed to the channel-message poster
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub checklist_title: String,
    pub field_name: String,
    pub new_value_label: String,
    pub added_count: usize,
    pub actor: String,
}

impl Notification {
    pub fn message(&self) -> String {
        let noun = if self.added_count == 1 { "task" } else { "tasks" };
        format!(
            "{} updated {} to {}, resulting in the addition of {} new {} to {} checklist",
            self.actor,
            self.field_name,
            self.new_value_label,
            self.added_count,
            noun,
            self.checklist_title
        )
    }
}

impl std::fmt::Display for Notification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

/// Notification for one checklist, if the change added any tasks to it
pub fn compose(diff: &ChecklistDiff, summary: &ChangeSummary) -> Option<Notification> {
    if diff.added == 0 {
        return None;
    }
    Some(Notification {
        checklist_title: diff.title.clone(),
        field_name: summary.field_name(),
        new_value_label: summary.value_label(),
        added_count: diff.added,
        actor: summary.actor.clone(),
    })
}

/// At most one notification per checklist
pub fn compose_all(diffs: &[ChecklistDiff], summary: &ChangeSummary) -> Vec<Notification> {
    diffs
        .iter()
        .filter_map(|d| compose(d, summary))
        .inspect(|n| log::info!("{}", n.message()))
        .collect()
}
