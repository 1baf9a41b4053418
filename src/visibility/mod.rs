// SPDX-License-Identifier: MIT

//! Task visibility for running checklists
//!
//! This module provides:
//! - `compute_visibility` - condition results per item, in authoring order
//! - `TaskState` - the per-item state machine (hidden, visible, stale)
//! - `reduce` / `diff` - snapshot-to-snapshot transitions per checklist
//! - `compose_all` - "N new tasks" notifications
//! - `RunView` / `watch_run` - per-run owners tying it together

mod computer;
mod diff;
mod notify;
mod state;
mod view;
mod watch;

pub use computer::{compute_visibility, condition_met, visible_indices};
pub use diff::{diff, reduce, ChecklistDiff, ChecklistVisibility, Reduction, RunVisibility, TaskView};
pub use notify::{compose, compose_all, ChangeSummary, Notification};
pub use state::{TaskState, Transition, CONDITION_ERROR_MARKER};
pub use view::RunView;
pub use watch::{watch_run, NotificationPoster};
