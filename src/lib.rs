// SPDX-License-Identifier: MIT

//! Property-driven task conditions for running checklists
//!
//! Decides which checklist items are visible from a run's property values,
//! keeps checked items on screen (flagged stale) when their condition stops
//! holding, and describes newly revealed tasks for channel notifications.

pub mod condition;
pub mod error;
pub mod playbook;
pub mod property;
pub mod visibility;

pub use error::{EngineError, Result};
