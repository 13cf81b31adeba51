use std::path::Path;
use serde::{Serialize, Deserialize};
use tokio::sync::{mpsc, oneshot};

use crate::catalog::{store::CatalogStore, CustomSubjects};
use crate::error::PersistenceError;
use crate::history::{HistoryRecord, HistoryStore};
use crate::metrics::Metrics;
use crate::plan::{Plan, PlanStore, ProgressUpdate};

/// A write the caller hands to the persistence collaborator after a local change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SyncMessage {
    Progress { user: String, plan_id: String, update: ProgressUpdate },
    Catalog { user: String, subjects: CustomSubjects },
    History { user: String, record: HistoryRecord },
    PlanSnapshot { user: String, plan_id: String, plan: Plan },
}

impl SyncMessage {
    fn label(&self) -> &'static str {
        match self {
            SyncMessage::Progress { .. } => "progress",
            SyncMessage::Catalog { .. } => "catalog",
            SyncMessage::History { .. } => "history",
            SyncMessage::PlanSnapshot { .. } => "plan_snapshot",
        }
    }
}

/// Advisory notice that a sync message could not be stored.
#[derive(Debug, Clone, PartialEq)]
pub struct SyncFailure {
    pub message: SyncMessage,
    pub error: PersistenceError,
}

/// Every on-disk store, rooted at one data directory.
#[derive(Clone, Debug)]
pub struct Stores {
    pub catalog: CatalogStore,
    pub history: HistoryStore,
    pub plans: PlanStore,
}

impl Stores {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        let root = root.as_ref();
        Stores {
            catalog: CatalogStore::new(root),
            history: HistoryStore::new(root),
            plans: PlanStore::new(root),
        }
    }

    pub async fn apply(&self, message: &SyncMessage) -> Result<(), PersistenceError> {
        match message {
            SyncMessage::Progress { user, plan_id, update } => {
                self.plans.record_progress(user, plan_id, update).await
            }
            SyncMessage::Catalog { user, subjects } => self.catalog.save(user, subjects).await,
            SyncMessage::History { user, record } => self.history.append(user, record).await,
            SyncMessage::PlanSnapshot { user, plan_id, plan } => {
                self.plans.save_plan(user, plan_id, plan).await
            }
        }
    }
}

/// Failures kept for the caller before newer ones are dropped.
/// The failure metric still counts every one of them.
pub const FAILURE_BACKLOG: usize = 64;

enum Envelope {
    Message(SyncMessage),
    Flush(oneshot::Sender<()>),
}

/// Sending side of the persistence worker. Cheap to clone.
#[derive(Clone, Debug)]
pub struct SyncHandle {
    tx: mpsc::UnboundedSender<Envelope>,
}

impl std::fmt::Debug for Envelope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Envelope::Message(m) => write!(f, "Message({})", m.label()),
            Envelope::Flush(_) => f.write_str("Flush"),
        }
    }
}

impl SyncHandle {
    /// Queue a message without waiting for it to be written.
    pub fn send(&self, message: SyncMessage) -> Result<(), PersistenceError> {
        self.tx.send(Envelope::Message(message)).map_err(|e| {
            let label = match &e.0 {
                Envelope::Message(m) => m.label(),
                Envelope::Flush(_) => "flush",
            };
            PersistenceError::new("Persistence worker has stopped", "sync")
                .with_context(format!("message: {}", label))
        })
    }

    /// Resolve once every message sent before this call has been processed.
    pub async fn flush(&self) -> Result<(), PersistenceError> {
        let (done_tx, done_rx) = oneshot::channel();
        self.tx
            .send(Envelope::Flush(done_tx))
            .map_err(|_| PersistenceError::new("Persistence worker has stopped", "sync"))?;
        done_rx
            .await
            .map_err(|_| PersistenceError::new("Persistence worker dropped flush", "sync"))
    }
}

/// Receiving side for advisory failures reported by the worker.
/// Holds at most `FAILURE_BACKLOG` undrained failures.
#[derive(Debug)]
pub struct FailureFeed {
    rx: mpsc::Receiver<SyncFailure>,
}

impl FailureFeed {
    /// Take every failure reported so far without waiting.
    pub fn drain(&mut self) -> Vec<SyncFailure> {
        let mut failures = Vec::new();
        while let Ok(failure) = self.rx.try_recv() {
            failures.push(failure);
        }
        failures
    }
}

/// Start the persistence worker on the current tokio runtime.
/// Messages are applied in order, one at a time, without retries.
pub fn spawn_worker(stores: Stores, metrics: Metrics) -> (SyncHandle, FailureFeed) {
    let (tx, mut rx) = mpsc::unbounded_channel::<Envelope>();
    let (failure_tx, failure_rx) = mpsc::channel::<SyncFailure>(FAILURE_BACKLOG);

    tokio::spawn(async move {
        while let Some(envelope) = rx.recv().await {
            match envelope {
                Envelope::Message(message) => {
                    match stores.apply(&message).await {
                        Ok(()) => {
                            tracing::debug!(kind = message.label(), "Sync message stored");
                        }
                        Err(error) => {
                            metrics.record_persistence_failure();
                            tracing::warn!(
                                kind = message.label(),
                                error = %error,
                                "Failed to persist sync message"
                            );
                            if let Err(mpsc::error::TrySendError::Full(dropped)) =
                                failure_tx.try_send(SyncFailure { message, error })
                            {
                                tracing::debug!(
                                    kind = dropped.message.label(),
                                    "Failure backlog full, dropping report"
                                );
                            }
                        }
                    }
                }
                Envelope::Flush(done) => {
                    let _ = done.send(());
                }
            }
        }
        tracing::debug!("Persistence worker stopped");
    });

    (SyncHandle { tx }, FailureFeed { rx: failure_rx })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn progress(day: u32) -> SyncMessage {
        SyncMessage::Progress {
            user: "alice".into(),
            plan_id: "plan_1".into(),
            update: ProgressUpdate { day_number: day, topic_name: "A".into(), completed: true },
        }
    }

    #[tokio::test]
    async fn test_worker_applies_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let stores = Stores::new(dir.path());
        let (handle, mut failures) = spawn_worker(stores.clone(), Metrics::new());

        handle.send(progress(1)).unwrap();
        handle.send(progress(2)).unwrap();
        handle.flush().await.unwrap();

        let entries = stores.plans.load_progress("alice", "plan_1").await.unwrap();
        assert_eq!(entries.len(), 2);
        assert!(failures.drain().is_empty());
    }

    #[tokio::test]
    async fn test_worker_reports_failures() {
        let dir = tempfile::tempdir().unwrap();
        // A file where the data directory should be makes every write fail.
        let blocked = dir.path().join("blocked");
        std::fs::write(&blocked, "not a directory").unwrap();

        let metrics = Metrics::new();
        let (handle, mut failures) = spawn_worker(Stores::new(&blocked), metrics.clone());

        handle.send(progress(1)).unwrap();
        handle.flush().await.unwrap();

        let reported = failures.drain();
        assert_eq!(reported.len(), 1);
        assert_eq!(reported[0].message, progress(1));
        assert_eq!(metrics.snapshot().persistence_failures, 1);
    }

    #[tokio::test]
    async fn test_undrained_failures_are_capped() {
        let dir = tempfile::tempdir().unwrap();
        let blocked = dir.path().join("blocked");
        std::fs::write(&blocked, "not a directory").unwrap();

        let metrics = Metrics::new();
        let (handle, mut failures) = spawn_worker(Stores::new(&blocked), metrics.clone());

        let total = FAILURE_BACKLOG as u32 + 10;
        for day in 1..=total {
            handle.send(progress(day)).unwrap();
        }
        handle.flush().await.unwrap();

        let reported = failures.drain();
        assert_eq!(reported.len(), FAILURE_BACKLOG);
        assert_eq!(reported[0].message, progress(1));
        assert_eq!(metrics.snapshot().persistence_failures, total as u64);

        // Draining frees room for new reports.
        handle.send(progress(1)).unwrap();
        handle.flush().await.unwrap();
        assert_eq!(failures.drain().len(), 1);
    }
}
