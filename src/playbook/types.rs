// SPDX-License-Identifier: MIT

//! Playbook and run definitions

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::condition::Condition;
use crate::error::{EngineError, Result};
use crate::property::{PropertyField, PropertySnapshot, PropertyTarget, PropertyValue, TargetType};

/// User-recorded progress on a checklist item
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ItemStatus {
    #[default]
    #[serde(alias = "")]
    Open,
    Closed,
    Skipped,
}

/// A task within a checklist
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct ChecklistItem {
    #[serde(default)]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub state: ItemStatus,
    /// Condition gating visibility; absent means always visible
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition_id: Option<String>,
}

impl ChecklistItem {
    /// Checked or skipped by a user
    pub fn is_interacted(&self) -> bool {
        self.state != ItemStatus::Open
    }
}

/// An ordered list of tasks. Item order is authoring order and is never changed here.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct Checklist {
    #[serde(default)]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub items: Vec<ChecklistItem>,
}

/// An authored template
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct Playbook {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub checklists: Vec<Checklist>,
    /// Conditions by id, referenced from `ChecklistItem::condition_id`
    #[serde(default)]
    pub conditions: BTreeMap<String, Condition>,
    #[serde(default)]
    pub fields: Vec<PropertyField>,
    #[serde(default)]
    pub values: Vec<PropertyValue>,
}

impl Playbook {
    pub fn snapshot(&self) -> PropertySnapshot {
        PropertySnapshot::new(
            PropertyTarget::playbook(self.id.clone()),
            self.fields.iter().cloned(),
            self.values.iter().cloned(),
        )
    }
}

/// A live instantiation of a playbook
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct Run {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub playbook_id: String,
    #[serde(default)]
    pub checklists: Vec<Checklist>,
    #[serde(default)]
    pub conditions: BTreeMap<String, Condition>,
    #[serde(default)]
    pub fields: Vec<PropertyField>,
    #[serde(default)]
    pub values: Vec<PropertyValue>,
}

impl Run {
    /// Instantiate a run, copying checklists, conditions, fields and the
    /// playbook's values by value. The run evolves independently afterwards.
    pub fn from_playbook(playbook: &Playbook, name: impl Into<String>) -> Self {
        let id = uuid::Uuid::new_v4().to_string();

        let values = playbook
            .values
            .iter()
            .filter(|v| v.target_type == TargetType::Playbook && v.target_id == playbook.id)
            .map(|v| PropertyValue {
                id: uuid::Uuid::new_v4().to_string(),
                field_id: v.field_id.clone(),
                target_id: id.clone(),
                target_type: TargetType::Run,
                value: v.value.clone(),
                updated_at: None,
            })
            .collect();

        let checklists = playbook
            .checklists
            .iter()
            .cloned()
            .map(|mut checklist| {
                for item in &mut checklist.items {
                    item.state = ItemStatus::Open;
                }
                checklist
            })
            .collect();

        log::debug!("Created run {} from playbook {}", id, playbook.id);

        Self {
            id,
            name: name.into(),
            playbook_id: playbook.id.clone(),
            checklists,
            conditions: playbook.conditions.clone(),
            fields: playbook.fields.clone(),
            values,
        }
    }

    pub fn target(&self) -> PropertyTarget {
        PropertyTarget::run(self.id.clone())
    }

    /// Current property snapshot of this run
    pub fn snapshot(&self) -> PropertySnapshot {
        PropertySnapshot::new(
            self.target(),
            self.fields.iter().cloned(),
            self.values.iter().cloned(),
        )
    }

    pub fn item(&self, checklist: usize, item: usize) -> Option<&ChecklistItem> {
        self.checklists.get(checklist)?.items.get(item)
    }

    /// Record a check, skip or reopen on an item
    pub fn set_item_status(
        &mut self,
        checklist: usize,
        item: usize,
        status: ItemStatus,
    ) -> Result<()> {
        let entry = self
            .checklists
            .get_mut(checklist)
            .and_then(|c| c.items.get_mut(item))
            .ok_or(EngineError::ItemNotFound { checklist, item })?;
        entry.state = status;
        Ok(())
    }

    /// Number of items gated by a condition
    pub fn condition_usage(&self, condition_id: &str) -> usize {
        self.checklists
            .iter()
            .flat_map(|c| c.items.iter())
            .filter(|i| i.condition_id.as_deref() == Some(condition_id))
            .count()
    }

    /// Ids of conditions that reference a field
    pub fn conditions_referencing(&self, field_id: &str) -> Vec<&str> {
        self.conditions
            .iter()
            .filter(|(_, c)| c.references(field_id))
            .map(|(id, _)| id.as_str())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::property::{FieldAttrs, FieldType, FieldValue};

    fn playbook() -> Playbook {
        Playbook {
            id: "pb1".to_string(),
            title: "Incident".to_string(),
            checklists: vec![Checklist {
                id: "c1".to_string(),
                title: "Stage 1".to_string(),
                items: vec![
                    ChecklistItem {
                        id: "i1".to_string(),
                        title: "Page on-call".to_string(),
                        state: ItemStatus::Closed,
                        condition_id: Some("cond1".to_string()),
                    },
                    ChecklistItem {
                        id: "i2".to_string(),
                        title: "Open bridge".to_string(),
                        state: ItemStatus::Open,
                        condition_id: None,
                    },
                ],
            }],
            conditions: BTreeMap::from([(
                "cond1".to_string(),
                Condition::is("priority", vec!["high"]),
            )]),
            fields: vec![PropertyField {
                id: "priority".to_string(),
                group_id: String::new(),
                name: "Priority".to_string(),
                field_type: FieldType::Select,
                attrs: FieldAttrs::default(),
            }],
            values: vec![PropertyValue {
                id: "pv1".to_string(),
                field_id: "priority".to_string(),
                target_id: "pb1".to_string(),
                target_type: TargetType::Playbook,
                value: Some(FieldValue::from("high")),
                updated_at: None,
            }],
        }
    }

    #[test]
    fn test_item_status_deserialize() {
        let item: ChecklistItem = serde_json::from_str(r#"{"title": "t", "state": ""}"#).unwrap();
        assert_eq!(item.state, ItemStatus::Open);
        assert!(!item.is_interacted());

        let item: ChecklistItem =
            serde_json::from_str(r#"{"title": "t", "state": "skipped"}"#).unwrap();
        assert!(item.is_interacted());
    }

    #[test]
    fn test_from_playbook_copies_by_value() {
        let pb = playbook();
        let mut run = Run::from_playbook(&pb, "Outage #1");

        assert_eq!(run.playbook_id, "pb1");
        assert_eq!(run.conditions, pb.conditions);
        assert_eq!(run.checklists[0].items[0].state, ItemStatus::Open);
        assert_eq!(run.values.len(), 1);
        assert_eq!(run.values[0].target_id, run.id);
        assert_eq!(run.values[0].target_type, TargetType::Run);
        assert_ne!(run.values[0].id, "pv1");

        run.conditions
            .insert("cond1".to_string(), Condition::is("priority", vec!["low"]));
        run.fields[0].name = "Severity".to_string();
        assert_eq!(pb.conditions["cond1"], Condition::is("priority", vec!["high"]));
        assert_eq!(pb.fields[0].name, "Priority");
    }

    #[test]
    fn test_run_snapshot_uses_run_values() {
        let run = Run::from_playbook(&playbook(), "Outage #1");
        let snapshot = run.snapshot();

        assert_eq!(snapshot.present_value("priority"), Some(&FieldValue::from("high")));
    }

    #[test]
    fn test_set_item_status() {
        let mut run = Run::from_playbook(&playbook(), "Outage #1");

        run.set_item_status(0, 1, ItemStatus::Skipped).unwrap();
        assert_eq!(run.item(0, 1).unwrap().state, ItemStatus::Skipped);

        let err = run.set_item_status(0, 9, ItemStatus::Closed).unwrap_err();
        assert!(matches!(
            err,
            EngineError::ItemNotFound {
                checklist: 0,
                item: 9
            }
        ));
    }

    #[test]
    fn test_condition_usage_and_references() {
        let run = Run::from_playbook(&playbook(), "Outage #1");

        assert_eq!(run.condition_usage("cond1"), 1);
        assert_eq!(run.condition_usage("other"), 0);
        assert_eq!(run.conditions_referencing("priority"), vec!["cond1"]);
        assert!(run.conditions_referencing("status").is_empty());
    }
}
