// SPDX-License-Identifier: MIT

//! Property field definitions and stored values

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Supported property field types
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Text,
    Select,
    Multiselect,
    Date,
    User,
    Multiuser,
}

impl std::fmt::Display for FieldType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldType::Text => write!(f, "text"),
            FieldType::Select => write!(f, "select"),
            FieldType::Multiselect => write!(f, "multiselect"),
            FieldType::Date => write!(f, "date"),
            FieldType::User => write!(f, "user"),
            FieldType::Multiuser => write!(f, "multiuser"),
        }
    }
}

/// One selectable option of a select/multiselect field
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct FieldOption {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// Author-editable attributes of a field
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Default)]
pub struct FieldAttrs {
    /// Display visibility ("always", "when_set", "hidden")
    #[serde(default)]
    pub visibility: String,
    #[serde(default)]
    pub sort_order: f64,
    /// Options for select/multiselect fields
    #[serde(default)]
    pub options: Option<Vec<FieldOption>>,
    /// Field this one was copied from, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
}

/// A typed, named property attached to a playbook or run
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct PropertyField {
    pub id: String,
    #[serde(default)]
    pub group_id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    #[serde(default)]
    pub attrs: FieldAttrs,
}

impl PropertyField {
    /// Find an option by id
    pub fn option(&self, option_id: &str) -> Option<&FieldOption> {
        self.attrs
            .options
            .as_ref()
            .and_then(|opts| opts.iter().find(|o| o.id == option_id))
    }

    /// Display name of an option id, falling back to the id itself
    pub fn option_name<'a>(&'a self, option_id: &'a str) -> &'a str {
        self.option(option_id)
            .map(|o| o.name.as_str())
            .unwrap_or(option_id)
    }
}

/// A stored value or a comparison operand: a single string or a list of strings
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    List(Vec<String>),
}

impl FieldValue {
    /// `""` and `[]` count as no value
    pub fn is_empty(&self) -> bool {
        match self {
            FieldValue::Text(s) => s.is_empty(),
            FieldValue::List(items) => items.is_empty(),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            FieldValue::List(_) => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            FieldValue::Text(_) => None,
            FieldValue::List(items) => Some(items),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl From<Vec<&str>> for FieldValue {
    fn from(items: Vec<&str>) -> Self {
        FieldValue::List(items.into_iter().map(str::to_string).collect())
    }
}

/// What a property value belongs to
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TargetType {
    Playbook,
    #[default]
    Run,
}

/// The current value of one field for one target
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct PropertyValue {
    pub id: String,
    pub field_id: String,
    #[serde(default)]
    pub target_id: String,
    #[serde(default)]
    pub target_type: TargetType,
    /// `null` means the value was cleared
    #[serde(default)]
    pub value: Option<FieldValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl PropertyValue {
    /// The stored value, treating empty strings and lists as unset
    pub fn present(&self) -> Option<&FieldValue> {
        self.value.as_ref().filter(|v| !v.is_empty())
    }
}
