// SPDX-License-Identifier: MIT

//! Condition expressions gating checklist items
//!
//! On the wire a condition is an object with exactly one of the keys
//! `and`, `or`, `is`, `isNot`, or no keys at all:
//!
//! ```json
//! {"and": [{"is": {"field_id": "priority", "value": ["high"]}},
//!          {"isNot": {"field_id": "status", "value": ["closed"]}}]}
//! ```

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::property::FieldValue;

/// A leaf comparison against one property field
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Comparison {
    pub field_id: String,
    pub value: FieldValue,
}

/// A condition expression
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
#[serde(from = "RawCondition", into = "RawCondition")]
pub enum Condition {
    /// `{}`
    #[default]
    Empty,
    /// Every nested condition holds
    And(Vec<Condition>),
    /// At least one nested condition holds
    Or(Vec<Condition>),
    /// The field's value matches
    Is(Comparison),
    /// The field's value does not match
    IsNot(Comparison),
    /// A non-empty object with none of the known keys
    Unrecognized(Map<String, Value>),
}

impl Condition {
    pub fn is(field_id: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        Condition::Is(Comparison {
            field_id: field_id.into(),
            value: value.into(),
        })
    }

    pub fn is_not(field_id: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        Condition::IsNot(Comparison {
            field_id: field_id.into(),
            value: value.into(),
        })
    }

    /// Ids of every field referenced anywhere in the expression, in first-seen order
    pub fn field_ids(&self) -> Vec<&str> {
        let mut ids = Vec::new();
        self.collect_field_ids(&mut ids);
        ids
    }

    fn collect_field_ids<'a>(&'a self, ids: &mut Vec<&'a str>) {
        match self {
            Condition::Empty | Condition::Unrecognized(_) => {}
            Condition::And(children) | Condition::Or(children) => {
                for child in children {
                    child.collect_field_ids(ids);
                }
            }
            Condition::Is(cmp) | Condition::IsNot(cmp) => {
                if !ids.contains(&cmp.field_id.as_str()) {
                    ids.push(&cmp.field_id);
                }
            }
        }
    }

    /// Whether the expression references `field_id`
    pub fn references(&self, field_id: &str) -> bool {
        self.field_ids().contains(&field_id)
    }
}

/// Wire shape of a condition object
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
struct RawCondition {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    and: Option<Vec<Condition>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    or: Option<Vec<Condition>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    is: Option<Comparison>,
    #[serde(default, rename = "isNot", skip_serializing_if = "Option::is_none")]
    is_not: Option<Comparison>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl From<RawCondition> for Condition {
    fn from(raw: RawCondition) -> Self {
        if let Some(children) = raw.and {
            Condition::And(children)
        } else if let Some(children) = raw.or {
            Condition::Or(children)
        } else if let Some(cmp) = raw.is {
            Condition::Is(cmp)
        } else if let Some(cmp) = raw.is_not {
            Condition::IsNot(cmp)
        } else if raw.extra.is_empty() {
            Condition::Empty
        } else {
            Condition::Unrecognized(raw.extra)
        }
    }
}

impl From<Condition> for RawCondition {
    fn from(condition: Condition) -> Self {
        let mut raw = RawCondition::default();
        match condition {
            Condition::Empty => {}
            Condition::And(children) => raw.and = Some(children),
            Condition::Or(children) => raw.or = Some(children),
            Condition::Is(cmp) => raw.is = Some(cmp),
            Condition::IsNot(cmp) => raw.is_not = Some(cmp),
            Condition::Unrecognized(extra) => raw.extra = extra,
        }
        raw
    }
}
