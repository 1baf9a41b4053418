// SPDX-License-Identifier: MIT

//! Per-field-type comparison rules
//!
//! `comparator_for` is the single table mapping a field type to the rule
//! used by `is` / `isNot`. Supporting a new field type means adding an arm
//! there.

use crate::property::{FieldType, FieldValue};

/// Result of comparing a stored value against a condition operand
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchOutcome {
    Match,
    NoMatch,
    /// The operand's shape does not fit the field's type family
    TypeMismatch,
    /// Comparisons on this field type are not implemented
    Unsupported,
}

impl MatchOutcome {
    pub fn is_match(self) -> bool {
        self == MatchOutcome::Match
    }
}

/// Compares a stored (non-empty) value with a condition operand
pub type Comparator = fn(stored: &FieldValue, expected: &FieldValue) -> MatchOutcome;

/// Look up the comparison rule for a field type
pub fn comparator_for(field_type: FieldType) -> Comparator {
    match field_type {
        FieldType::Text => compare_text,
        FieldType::Select => compare_select,
        FieldType::Multiselect => compare_multiselect,
        FieldType::Date | FieldType::User | FieldType::Multiuser => unsupported,
    }
}

fn outcome(matched: bool) -> MatchOutcome {
    if matched {
        MatchOutcome::Match
    } else {
        MatchOutcome::NoMatch
    }
}

/// Case-insensitive exact equality of two strings
fn compare_text(stored: &FieldValue, expected: &FieldValue) -> MatchOutcome {
    match (stored, expected) {
        (FieldValue::Text(s), FieldValue::Text(e)) => outcome(s.to_lowercase() == e.to_lowercase()),
        _ => MatchOutcome::TypeMismatch,
    }
}

/// Stored option id is one of the operand ids (case-sensitive)
fn compare_select(stored: &FieldValue, expected: &FieldValue) -> MatchOutcome {
    match (stored, expected) {
        (FieldValue::Text(id), FieldValue::List(ids)) => outcome(ids.iter().any(|e| e == id)),
        _ => MatchOutcome::TypeMismatch,
    }
}

/// Stored option ids and operand ids intersect
fn compare_multiselect(stored: &FieldValue, expected: &FieldValue) -> MatchOutcome {
    match (stored, expected) {
        (FieldValue::List(selected), FieldValue::List(ids)) => {
            outcome(selected.iter().any(|s| ids.contains(s)))
        }
        _ => MatchOutcome::TypeMismatch,
    }
}

fn unsupported(_stored: &FieldValue, _expected: &FieldValue) -> MatchOutcome {
    MatchOutcome::Unsupported
}
