// SPDX-License-Identifier: MIT

//! Snapshot-to-snapshot reduction and visibility diffs
//!
//! `reduce` is the single entry point for both the initial render of a run
//! and every later property change, so the counting of added tasks is the
//! same on both paths.

use serde::Serialize;
use std::collections::HashMap;

use super::computer::condition_met;
use super::state::{TaskState, Transition};
use crate::playbook::{ChecklistItem, Run};
use crate::property::PropertySnapshot;

/// Render data for one item
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskView {
    pub item_id: String,
    pub title: String,
    pub condition_met: bool,
    pub state: TaskState,
}

impl TaskView {
    pub fn visible(&self) -> bool {
        self.state.is_displayed()
    }

    pub fn indicator(&self) -> Option<&'static str> {
        self.state.indicator()
    }
}

/// Render data for one checklist, items in authoring order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChecklistVisibility {
    pub title: String,
    pub tasks: Vec<TaskView>,
}

impl ChecklistVisibility {
    /// Indices of displayed items (stale items included)
    pub fn visible_indices(&self) -> Vec<usize> {
        self.tasks
            .iter()
            .enumerate()
            .filter_map(|(i, t)| t.visible().then_some(i))
            .collect()
    }
}

/// Render data for a whole run
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct RunVisibility {
    pub checklists: Vec<ChecklistVisibility>,
}

/// Per-checklist transition counts between two visibilities
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Default)]
pub struct ChecklistDiff {
    pub checklist_index: usize,
    pub title: String,
    pub added: usize,
    pub stale: usize,
    pub restored: usize,
    pub hidden: usize,
}

impl ChecklistDiff {
    fn record(&mut self, transition: Transition) {
        match transition {
            Transition::Shown => self.added += 1,
            Transition::BecameStale => self.stale += 1,
            Transition::Restored => self.restored += 1,
            Transition::Hidden => self.hidden += 1,
            Transition::Unchanged => {}
        }
    }

    fn is_empty(&self) -> bool {
        self.added == 0 && self.stale == 0 && self.restored == 0 && self.hidden == 0
    }
}

/// Output of `reduce`
#[derive(Debug, Clone, PartialEq)]
pub struct Reduction {
    pub visibility: RunVisibility,
    /// Empty on initial load
    pub diffs: Vec<ChecklistDiff>,
}

/// Items are matched across snapshots by id, or by position when the id is blank
fn item_key(item_id: &str, index: usize) -> String {
    if item_id.is_empty() {
        format!("#{}", index)
    } else {
        item_id.to_string()
    }
}

fn previous_states(previous: &ChecklistVisibility) -> HashMap<String, TaskState> {
    previous
        .tasks
        .iter()
        .enumerate()
        .map(|(i, t)| (item_key(&t.item_id, i), t.state))
        .collect()
}

fn task_view(
    item: &ChecklistItem,
    met: bool,
    previous: Option<TaskState>,
) -> (TaskView, Transition) {
    let interacted = item.is_interacted();
    let (state, transition) = match previous {
        Some(old) => old.transition(met, interacted),
        None => (TaskState::initial(met, interacted), Transition::Unchanged),
    };
    let view = TaskView {
        item_id: item.id.clone(),
        title: item.title.clone(),
        condition_met: met,
        state,
    };
    (view, transition)
}

/// Compute the run's visibility for `snapshot`, and the diffs against
/// `previous` when there is one.
pub fn reduce(previous: Option<&RunVisibility>, run: &Run, snapshot: &PropertySnapshot) -> Reduction {
    let mut checklists = Vec::with_capacity(run.checklists.len());
    let mut diffs = Vec::new();

    for (index, checklist) in run.checklists.iter().enumerate() {
        let before = previous
            .and_then(|p| p.checklists.get(index))
            .map(previous_states);
        let mut diff = ChecklistDiff {
            checklist_index: index,
            title: checklist.title.clone(),
            ..Default::default()
        };

        let tasks = checklist
            .items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                let met = condition_met(item, &run.conditions, snapshot);
                let old = before
                    .as_ref()
                    .and_then(|b| b.get(&item_key(&item.id, i)).copied());
                let (view, transition) = task_view(item, met, old);
                diff.record(transition);
                view
            })
            .collect();

        if previous.is_some() && !diff.is_empty() {
            log::debug!(
                "Checklist '{}': {} added, {} stale, {} restored, {} hidden",
                diff.title,
                diff.added,
                diff.stale,
                diff.restored,
                diff.hidden
            );
            diffs.push(diff);
        }
        checklists.push(ChecklistVisibility {
            title: checklist.title.clone(),
            tasks,
        });
    }

    Reduction {
        visibility: RunVisibility { checklists },
        diffs,
    }
}

/// Transition counts from `old` to `new` for every checklist that changed.
/// Items or checklists present on only one side are not counted.
pub fn diff(old: &RunVisibility, new: &RunVisibility) -> Vec<ChecklistDiff> {
    new.checklists
        .iter()
        .enumerate()
        .filter_map(|(index, checklist)| {
            let before = previous_states(old.checklists.get(index)?);
            let mut diff = ChecklistDiff {
                checklist_index: index,
                title: checklist.title.clone(),
                ..Default::default()
            };
            for (i, task) in checklist.tasks.iter().enumerate() {
                if let Some(old_state) = before.get(&item_key(&task.item_id, i)) {
                    diff.record(Transition::between(*old_state, task.state));
                }
            }
            (!diff.is_empty()).then_some(diff)
        })
        .collect()
}
