// SPDX-License-Identifier: MIT

//! Async adapter feeding real-time property changes into a `RunView`

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::mpsc;

use super::notify::Notification;
use super::view::RunView;
use crate::error::Result;
use crate::property::PropertyUpdate;

/// Delivers notifications to the run's channel
#[async_trait]
pub trait NotificationPoster: Send + Sync {
    async fn post(&self, run_id: &str, notification: &Notification) -> Result<()>;
}

/// Drain updates until the sender side closes, then hand the view back.
///
/// Every update already queued when one is received is coalesced into the
/// same transition, so a multi-field edit is diffed once against the
/// displayed baseline. Posting failures are logged and do not stop the loop.
pub async fn watch_run(
    mut view: RunView,
    mut updates: mpsc::Receiver<PropertyUpdate>,
    poster: Arc<dyn NotificationPoster>,
) -> RunView {
    while let Some(first) = updates.recv().await {
        let mut batch = vec![first];
        while let Ok(next) = updates.try_recv() {
            batch.push(next);
        }
        log::debug!(
            "Applying {} coalesced update(s) to run {}",
            batch.len(),
            view.run().id
        );

        let update = PropertyUpdate::coalesce(batch);
        let notifications = view.apply_and_display(&update);

        for notification in &notifications {
            if let Err(e) = poster.post(&view.run().id, notification).await {
                log::error!("Failed to post notification: {}", e);
            }
        }
    }

    log::info!("Update stream for run {} closed", view.run().id);
    view
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::condition::Condition;
    use crate::error::EngineError;
    use crate::playbook::{Checklist, ChecklistItem, ItemStatus, Run};
    use crate::property::{FieldAttrs, FieldType, PropertyField};
    use std::collections::BTreeMap;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingPoster {
        posted: Mutex<Vec<String>>,
        fail: bool,
    }

    #[async_trait]
    impl NotificationPoster for RecordingPoster {
        async fn post(&self, _run_id: &str, notification: &Notification) -> Result<()> {
            if self.fail {
                return Err(EngineError::Poster {
                    checklist: notification.checklist_title.clone(),
                    message: "unavailable".to_string(),
                });
            }
            self.posted.lock().unwrap().push(notification.message());
            Ok(())
        }
    }

    fn view() -> RunView {
        let items = ["a", "b"]
            .iter()
            .map(|id| ChecklistItem {
                id: id.to_string(),
                title: id.to_string(),
                state: ItemStatus::Open,
                condition_id: Some("both".to_string()),
            })
            .collect();
        RunView::load(Run {
            id: "run1".to_string(),
            name: "Outage".to_string(),
            playbook_id: String::new(),
            checklists: vec![Checklist {
                id: "c1".to_string(),
                title: "Stage 1".to_string(),
                items,
            }],
            conditions: BTreeMap::from([(
                "both".to_string(),
                Condition::And(vec![Condition::is("x", "1"), Condition::is("y", "2")]),
            )]),
            fields: ["x", "y"]
                .iter()
                .map(|id| PropertyField {
                    id: id.to_string(),
                    group_id: String::new(),
                    name: id.to_uppercase(),
                    field_type: FieldType::Text,
                    attrs: FieldAttrs::default(),
                })
                .collect(),
            values: vec![],
        })
    }

    #[tokio::test]
    async fn test_queued_updates_are_coalesced() {
        let (tx, rx) = mpsc::channel(8);
        tx.send(PropertyUpdate::single("alice", "x", Some("1".into())))
            .await
            .unwrap();
        tx.send(PropertyUpdate::single("alice", "y", Some("2".into())))
            .await
            .unwrap();
        drop(tx);

        let poster = Arc::new(RecordingPoster::default());
        let view = watch_run(view(), rx, poster.clone()).await;

        assert_eq!(
            *poster.posted.lock().unwrap(),
            vec![
                "alice updated X, Y to 1, 2, resulting in the addition of 2 new tasks to Stage 1 checklist"
                    .to_string()
            ]
        );
        assert!(!view.has_pending());
    }

    #[tokio::test]
    async fn test_poster_failure_does_not_stop_loop() {
        let (tx, rx) = mpsc::channel(8);
        tx.send(PropertyUpdate {
            actor: "alice".to_string(),
            changes: vec![
                crate::property::FieldChange {
                    field_id: "x".to_string(),
                    value: Some("1".into()),
                },
                crate::property::FieldChange {
                    field_id: "y".to_string(),
                    value: Some("2".into()),
                },
            ],
        })
        .await
        .unwrap();
        drop(tx);

        let poster = Arc::new(RecordingPoster {
            fail: true,
            ..Default::default()
        });
        let view = watch_run(view(), rx, poster).await;

        assert_eq!(view.displayed().checklists[0].visible_indices(), vec![0, 1]);
    }
}
