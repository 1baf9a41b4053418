// SPDX-License-Identifier: MIT

//! Property fields and values
//!
//! This module provides:
//! - `PropertyField` / `PropertyValue` - typed definitions and stored values
//! - `PropertySnapshot` - an immutable view of one target's properties
//! - `PropertyUpdate` - an atomic set of value changes, with coalescing

mod schema;
mod store;
mod update;

pub use schema::{
    FieldAttrs, FieldOption, FieldType, FieldValue, PropertyField, PropertyValue, TargetType,
};
pub use store::{PropertySnapshot, PropertyTarget, UNSET_LABEL};
pub use update::{FieldChange, PropertyUpdate};
