// SPDX-License-Identifier: MIT

//! Per-checklist condition results

use std::collections::BTreeMap;

use crate::condition::{self, Condition};
use crate::playbook::{Checklist, ChecklistItem};
use crate::property::PropertySnapshot;

/// Whether an item's condition currently holds.
///
/// Items without a condition always hold. A dangling `condition_id` is
/// logged and treated the same way so the rest of the checklist renders.
pub fn condition_met(
    item: &ChecklistItem,
    conditions: &BTreeMap<String, Condition>,
    snapshot: &PropertySnapshot,
) -> bool {
    let Some(condition_id) = item.condition_id.as_deref() else {
        return true;
    };

    match conditions.get(condition_id) {
        Some(condition) => condition::evaluate(condition, snapshot),
        None => {
            log::warn!(
                "Item '{}' references unknown condition {}",
                item.title,
                condition_id
            );
            true
        }
    }
}

/// Condition result for every item, in authoring order
pub fn compute_visibility(
    checklist: &Checklist,
    conditions: &BTreeMap<String, Condition>,
    snapshot: &PropertySnapshot,
) -> Vec<bool> {
    checklist
        .items
        .iter()
        .map(|item| condition_met(item, conditions, snapshot))
        .collect()
}

/// Indices of items whose condition holds, ascending
pub fn visible_indices(
    checklist: &Checklist,
    conditions: &BTreeMap<String, Condition>,
    snapshot: &PropertySnapshot,
) -> Vec<usize> {
    compute_visibility(checklist, conditions, snapshot)
        .into_iter()
        .enumerate()
        .filter_map(|(i, met)| met.then_some(i))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::playbook::ItemStatus;
    use crate::property::{
        FieldAttrs, FieldType, PropertyField, PropertyTarget, PropertyUpdate,
    };

    fn item(title: &str, condition_id: Option<&str>) -> ChecklistItem {
        ChecklistItem {
            id: title.to_string(),
            title: title.to_string(),
            state: ItemStatus::Open,
            condition_id: condition_id.map(str::to_string),
        }
    }

    fn setup() -> (Checklist, BTreeMap<String, Condition>, PropertySnapshot) {
        let checklist = Checklist {
            id: "c1".to_string(),
            title: "Stage 1".to_string(),
            items: vec![
                item("always", None),
                item("abc-only", Some("is_abc")),
                item("dangling", Some("missing")),
                item("not-abc", Some("not_abc")),
            ],
        };
        let conditions = BTreeMap::from([
            ("is_abc".to_string(), Condition::is("code", "abc")),
            ("not_abc".to_string(), Condition::is_not("code", "abc")),
        ]);
        let snapshot = PropertySnapshot::empty(
            PropertyTarget::run("run1"),
            vec![PropertyField {
                id: "code".to_string(),
                group_id: String::new(),
                name: "Code".to_string(),
                field_type: FieldType::Text,
                attrs: FieldAttrs::default(),
            }],
        );
        (checklist, conditions, snapshot)
    }

    #[test]
    fn test_visibility_preserves_order() {
        let (checklist, conditions, snapshot) = setup();

        assert_eq!(
            compute_visibility(&checklist, &conditions, &snapshot),
            vec![true, false, true, true]
        );
        assert_eq!(visible_indices(&checklist, &conditions, &snapshot), vec![0, 2, 3]);
    }

    #[test]
    fn test_visibility_follows_value() {
        let (checklist, conditions, snapshot) = setup();
        let snapshot = snapshot.apply(&PropertyUpdate::single("alice", "code", Some("ABC".into())));

        assert_eq!(visible_indices(&checklist, &conditions, &snapshot), vec![0, 1, 2]);
    }
}
