// SPDX-License-Identifier: MIT

//! Immutable property snapshot for one target

use chrono::Utc;
use std::collections::HashMap;

use super::schema::{FieldType, FieldValue, PropertyField, PropertyValue, TargetType};
use super::update::PropertyUpdate;

/// Label used when a field has no value
pub const UNSET_LABEL: &str = "none";

/// The target a snapshot's values belong to
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PropertyTarget {
    pub id: String,
    pub target_type: TargetType,
}

impl PropertyTarget {
    pub fn run(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            target_type: TargetType::Run,
        }
    }

    pub fn playbook(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            target_type: TargetType::Playbook,
        }
    }
}

/// Field definitions and current values of one run or playbook
#[derive(Debug, Clone, Default)]
pub struct PropertySnapshot {
    target: PropertyTarget,
    /// Field definitions by field id
    fields: HashMap<String, PropertyField>,
    /// Values by field id
    values: HashMap<String, PropertyValue>,
}

impl PropertySnapshot {
    /// Index fields and the values that belong to `target`
    pub fn new(
        target: PropertyTarget,
        fields: impl IntoIterator<Item = PropertyField>,
        values: impl IntoIterator<Item = PropertyValue>,
    ) -> Self {
        let fields = fields
            .into_iter()
            .map(|f| (f.id.clone(), f))
            .collect::<HashMap<_, _>>();

        let mut by_field = HashMap::new();
        for value in values {
            if value.target_type != target.target_type || value.target_id != target.id {
                log::debug!(
                    "Ignoring value {} for foreign target {}",
                    value.id,
                    value.target_id
                );
                continue;
            }
            by_field.insert(value.field_id.clone(), value);
        }

        Self {
            target,
            fields,
            values: by_field,
        }
    }

    /// Snapshot with definitions only
    pub fn empty(target: PropertyTarget, fields: impl IntoIterator<Item = PropertyField>) -> Self {
        Self::new(target, fields, Vec::new())
    }

    pub fn target(&self) -> &PropertyTarget {
        &self.target
    }

    pub fn field(&self, field_id: &str) -> Option<&PropertyField> {
        self.fields.get(field_id)
    }

    pub fn value(&self, field_id: &str) -> Option<&PropertyValue> {
        self.values.get(field_id)
    }

    /// Non-empty stored value of a field
    pub fn present_value(&self, field_id: &str) -> Option<&FieldValue> {
        self.values.get(field_id).and_then(PropertyValue::present)
    }

    /// All values, ordered by field id
    pub fn values(&self) -> Vec<PropertyValue> {
        let mut values: Vec<PropertyValue> = self.values.values().cloned().collect();
        values.sort_by(|a, b| a.field_id.cmp(&b.field_id));
        values
    }

    /// Produce the snapshot that results from applying `update`.
    ///
    /// Values are updated in place or created on first write. Changes to
    /// unknown fields are dropped.
    pub fn apply(&self, update: &PropertyUpdate) -> PropertySnapshot {
        let mut next = self.clone();
        let now = Utc::now();

        for change in &update.changes {
            if !next.fields.contains_key(&change.field_id) {
                log::warn!(
                    "Ignoring change to unknown field {} by {}",
                    change.field_id,
                    update.actor
                );
                continue;
            }

            let target = &next.target;
            let entry = next
                .values
                .entry(change.field_id.clone())
                .or_insert_with(|| PropertyValue {
                    id: uuid::Uuid::new_v4().to_string(),
                    field_id: change.field_id.clone(),
                    target_id: target.id.clone(),
                    target_type: target.target_type,
                    value: None,
                    updated_at: None,
                });
            entry.value = change.value.clone();
            entry.updated_at = Some(now);
        }

        next
    }

    /// Human-readable label of a field's current value
    pub fn value_label(&self, field_id: &str) -> String {
        let Some(value) = self.present_value(field_id) else {
            return UNSET_LABEL.to_string();
        };
        let field = self.fields.get(field_id);

        match (field.map(|f| f.field_type), value) {
            (Some(FieldType::Select | FieldType::Multiselect), FieldValue::Text(id)) => field
                .map(|f| f.option_name(id).to_string())
                .unwrap_or_else(|| id.clone()),
            (Some(FieldType::Select | FieldType::Multiselect), FieldValue::List(ids)) => ids
                .iter()
                .map(|id| {
                    field
                        .map(|f| f.option_name(id).to_string())
                        .unwrap_or_else(|| id.clone())
                })
                .collect::<Vec<_>>()
                .join(", "),
            (_, FieldValue::Text(s)) => s.clone(),
            (_, FieldValue::List(items)) => items.join(", "),
        }
    }
}
