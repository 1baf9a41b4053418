// SPDX-License-Identifier: MIT

//! Per-run visibility owner
//!
//! A `RunView` keeps two visibilities: the one most recently computed
//! (what should be rendered now) and the one last shown to users. Rendering
//! is last-write-wins, while notifications are always computed against the
//! displayed baseline so that snapshots superseded before display are
//! neither skipped nor reported twice.

use super::diff::{diff, reduce, RunVisibility};
use super::notify::{compose_all, ChangeSummary, Notification};
use crate::condition::Condition;
use crate::error::Result;
use crate::playbook::{ItemStatus, Run};
use crate::property::{PropertySnapshot, PropertyUpdate};

pub struct RunView {
    run: Run,
    snapshot: PropertySnapshot,
    rendered: RunVisibility,
    displayed: RunVisibility,
    /// Changes applied since the last display
    pending: Option<ChangeSummary>,
}

impl RunView {
    /// Initial render. No transitions are attributed to loading.
    pub fn load(run: Run) -> Self {
        let snapshot = run.snapshot();
        let rendered = reduce(None, &run, &snapshot).visibility;
        Self {
            displayed: rendered.clone(),
            run,
            snapshot,
            rendered,
            pending: None,
        }
    }

    pub fn run(&self) -> &Run {
        &self.run
    }

    pub fn snapshot(&self) -> &PropertySnapshot {
        &self.snapshot
    }

    /// What should be rendered now
    pub fn rendered(&self) -> &RunVisibility {
        &self.rendered
    }

    /// What users last saw
    pub fn displayed(&self) -> &RunVisibility {
        &self.displayed
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Apply one atomic property change. Callers coalesce updates that
    /// arrive together before calling this.
    pub fn apply_update(&mut self, update: &PropertyUpdate) -> &RunVisibility {
        let next = self.snapshot.apply(update);
        let summary = ChangeSummary::from_update(update, &next);

        self.run.values = next.values();
        self.snapshot = next;
        self.rendered = reduce(Some(&self.rendered), &self.run, &self.snapshot).visibility;

        match self.pending.as_mut() {
            Some(pending) => pending.merge(summary),
            None => self.pending = Some(summary),
        }
        &self.rendered
    }

    /// The rendered visibility has been shown. Returns one notification per
    /// checklist that gained tasks since the previous display.
    pub fn mark_displayed(&mut self) -> Vec<Notification> {
        let diffs = diff(&self.displayed, &self.rendered);
        let notifications = match self.pending.take() {
            Some(summary) => compose_all(&diffs, &summary),
            None => Vec::new(),
        };
        self.displayed = self.rendered.clone();
        notifications
    }

    /// Apply and display in one step
    pub fn apply_and_display(&mut self, update: &PropertyUpdate) -> Vec<Notification> {
        self.apply_update(update);
        self.mark_displayed()
    }

    /// Record a user check, skip or reopen. Never produces notifications.
    pub fn set_item_status(
        &mut self,
        checklist: usize,
        item: usize,
        status: ItemStatus,
    ) -> Result<()> {
        self.run.set_item_status(checklist, item, status)?;
        self.rerender_local();
        Ok(())
    }

    /// Replace one of this run's conditions. The playbook's copy is untouched.
    pub fn set_condition(&mut self, condition_id: impl Into<String>, condition: Condition) {
        self.run.conditions.insert(condition_id.into(), condition);
        self.rerender_local();
    }

    /// Re-render after an edit that is not a property change. With no
    /// property change waiting, the baseline moves too so the edit is never
    /// reported as added tasks.
    fn rerender_local(&mut self) {
        self.rendered = reduce(Some(&self.rendered), &self.run, &self.snapshot).visibility;
        if self.pending.is_none() {
            self.displayed = self.rendered.clone();
        }
    }
}
