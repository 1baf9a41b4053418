// SPDX-License-Identifier: MIT

//! Property value changes and coalescing

use serde::{Deserialize, Serialize};

use super::schema::FieldValue;

/// A new value for one field; `None` clears it
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct FieldChange {
    pub field_id: String,
    #[serde(default)]
    pub value: Option<FieldValue>,
}

/// One atomic edit of a run's properties, attributed to an actor
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Default)]
pub struct PropertyUpdate {
    /// Display name of whoever made the change
    pub actor: String,
    #[serde(default)]
    pub changes: Vec<FieldChange>,
}

impl PropertyUpdate {
    /// Update setting a single field
    pub fn single(
        actor: impl Into<String>,
        field_id: impl Into<String>,
        value: Option<FieldValue>,
    ) -> Self {
        Self {
            actor: actor.into(),
            changes: vec![FieldChange {
                field_id: field_id.into(),
                value,
            }],
        }
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    /// Fold updates that arrived together into one transition.
    ///
    /// The last value written to a field wins; fields keep the position of
    /// their first appearance. The actor is taken from the last update.
    pub fn coalesce<I>(updates: I) -> PropertyUpdate
    where
        I: IntoIterator<Item = PropertyUpdate>,
    {
        let mut merged = PropertyUpdate::default();
        for update in updates {
            merged.actor = update.actor;
            for change in update.changes {
                match merged
                    .changes
                    .iter_mut()
                    .find(|c| c.field_id == change.field_id)
                {
                    Some(existing) => existing.value = change.value,
                    None => merged.changes.push(change),
                }
            }
        }
        merged
    }
}
