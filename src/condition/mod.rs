// SPDX-License-Identifier: MIT

//! Condition evaluation for checklist items
//!
//! This module provides the condition tree and its evaluation against a
//! property snapshot. Conditions look like:
//! - `{"is": {"field_id": "priority", "value": ["high"]}}`
//! - `{"isNot": {"field_id": "code", "value": "abc"}}`
//! - `{"and": [...]}`, `{"or": [...]}`, `{}`

mod ast;
mod comparator;
mod evaluator;

pub use ast::{Comparison, Condition};
pub use comparator::{comparator_for, Comparator, MatchOutcome};
pub use evaluator::evaluate;
