// SPDX-License-Identifier: MIT

//! Condition expression evaluator

use super::ast::{Comparison, Condition};
use super::comparator::{comparator_for, MatchOutcome};
use crate::property::PropertySnapshot;

/// Evaluate a condition against a property snapshot.
///
/// Total and side-effect free apart from logging: unknown fields, missing
/// values and type mismatches all resolve to a boolean.
pub fn evaluate(condition: &Condition, snapshot: &PropertySnapshot) -> bool {
    match condition {
        Condition::Empty => true,
        Condition::And(children) => children.iter().all(|c| evaluate(c, snapshot)),
        Condition::Or(children) => children.iter().any(|c| evaluate(c, snapshot)),
        Condition::Is(cmp) => compare(cmp, snapshot).is_some_and(MatchOutcome::is_match),
        // Missing field or value: fail open
        Condition::IsNot(cmp) => compare(cmp, snapshot).map_or(true, |o| !o.is_match()),
        Condition::Unrecognized(extra) => {
            log::warn!(
                "Unrecognized condition keys {:?}, treating as satisfied",
                extra.keys().collect::<Vec<_>>()
            );
            true
        }
    }
}

/// `None` when the field is unknown or has no value
fn compare(cmp: &Comparison, snapshot: &PropertySnapshot) -> Option<MatchOutcome> {
    let field = snapshot.field(&cmp.field_id)?;
    let stored = snapshot.present_value(&cmp.field_id)?;

    let outcome = comparator_for(field.field_type)(stored, &cmp.value);
    match outcome {
        MatchOutcome::TypeMismatch => log::warn!(
            "Condition value for {} field '{}' has the wrong shape: {:?}",
            field.field_type,
            field.name,
            cmp.value
        ),
        MatchOutcome::Unsupported => log::debug!(
            "Conditions on {} field '{}' are not supported",
            field.field_type,
            field.name
        ),
        MatchOutcome::Match | MatchOutcome::NoMatch => {}
    }
    Some(outcome)
}
