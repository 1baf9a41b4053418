// SPDX-License-Identifier: MIT

//! Per-task visibility state machine

use serde::Serialize;

/// Test hook rendered on tasks whose condition no longer holds
pub const CONDITION_ERROR_MARKER: &str = "condition-indicator-error";

/// Display state of one checklist item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskState {
    /// Condition false, no recorded interaction
    Hidden,
    /// Condition true, not checked or skipped
    VisibleUntouched,
    /// Condition true, checked or skipped
    VisibleInteracted,
    /// Condition false after interaction; still displayed with a warning
    Stale,
}

/// Observable effect of moving between two states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Transition {
    Unchanged,
    /// Hidden item became visible
    Shown,
    /// Visible or stale item disappeared
    Hidden,
    /// Interacted item lost its condition
    BecameStale,
    /// Stale item's condition holds again
    Restored,
}

impl TaskState {
    /// State derived from the condition result and recorded progress alone
    pub fn initial(condition_met: bool, interacted: bool) -> Self {
        match (condition_met, interacted) {
            (true, false) => TaskState::VisibleUntouched,
            (true, true) => TaskState::VisibleInteracted,
            (false, false) => TaskState::Hidden,
            (false, true) => TaskState::Stale,
        }
    }

    /// Move to the state implied by a new condition result.
    ///
    /// Recorded progress is an input, never an output: an interacted item
    /// whose condition fails goes to `Stale` instead of `Hidden`.
    pub fn transition(self, condition_met: bool, interacted: bool) -> (TaskState, Transition) {
        let next = TaskState::initial(condition_met, interacted);
        (next, Transition::between(self, next))
    }

    /// Whether the item is rendered at all
    pub fn is_displayed(self) -> bool {
        self != TaskState::Hidden
    }

    /// Warning marker for stale items
    pub fn indicator(self) -> Option<&'static str> {
        match self {
            TaskState::Stale => Some(CONDITION_ERROR_MARKER),
            _ => None,
        }
    }
}

impl Transition {
    /// Classify the move from `old` to `new`
    pub fn between(old: TaskState, new: TaskState) -> Transition {
        use TaskState::*;
        match (old, new) {
            (Hidden, VisibleUntouched | VisibleInteracted) => Transition::Shown,
            (VisibleUntouched | VisibleInteracted | Stale, Hidden) => Transition::Hidden,
            (Hidden | VisibleUntouched | VisibleInteracted, Stale) => Transition::BecameStale,
            (Stale, VisibleUntouched | VisibleInteracted) => Transition::Restored,
            _ => Transition::Unchanged,
        }
    }
}

impl std::fmt::Display for TaskState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TaskState::Hidden => write!(f, "hidden"),
            TaskState::VisibleUntouched => write!(f, "visible"),
            TaskState::VisibleInteracted => write!(f, "done"),
            TaskState::Stale => write!(f, "stale"),
        }
    }
}
