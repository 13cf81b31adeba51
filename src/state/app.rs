use std::sync::Arc;
use parking_lot::{Mutex, RwLock};
use serde::{Serialize, Deserialize};

use crate::catalog::TopicCatalog;
use crate::config::PlannerConfig;
use crate::error::PlannerError;
use crate::metrics::Metrics;
use crate::plan::Plan;
use crate::sync::{spawn_worker, FailureFeed, Stores, SyncFailure, SyncHandle, SyncMessage};

/// The plan currently on screen, with the id its sync messages are keyed by.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivePlan {
    pub id: String,
    pub plan: Plan,
}

/// Session-wide state for one authenticated user.
/// Stores are passed explicitly; the plan has a single writer behind its lock.
#[derive(Clone)]
pub struct AppState {
    pub user: String,
    pub config: Arc<PlannerConfig>,
    pub stores: Stores,
    pub catalog: Arc<RwLock<TopicCatalog>>,
    pub active_plan: Arc<RwLock<Option<ActivePlan>>>,
    pub metrics: Metrics,
    sync: SyncHandle,
    failures: Arc<Mutex<FailureFeed>>,
}

impl AppState {
    /// Load the user's custom subjects once and start the persistence worker.
    /// A failed catalog load is reported and the session starts with built-ins only.
    pub async fn start(user: &str, config: PlannerConfig) -> Self {
        let stores = Stores::new(&config.data_dir);
        let metrics = Metrics::new();

        let catalog = match stores.catalog.load(user).await {
            Ok(custom) => TopicCatalog::with_custom(custom),
            Err(e) => {
                tracing::warn!(user = %user, error = %e, "Failed to load custom subjects");
                TopicCatalog::new()
            }
        };

        let (sync, failures) = spawn_worker(stores.clone(), metrics.clone());
        tracing::info!(user = %user, data_dir = ?config.data_dir, "Session started");

        AppState {
            user: user.to_string(),
            config: Arc::new(config),
            stores,
            catalog: Arc::new(RwLock::new(catalog)),
            active_plan: Arc::new(RwLock::new(None)),
            metrics,
            sync,
            failures: Arc::new(Mutex::new(failures)),
        }
    }

    /// Hand a message to the worker. Failure here is advisory only.
    pub fn dispatch(&self, message: SyncMessage) -> Result<(), PlannerError> {
        self.sync.send(message).map_err(|e| {
            self.metrics.record_persistence_failure();
            tracing::warn!(error = %e, "Failed to dispatch sync message");
            PlannerError::from(e)
        })
    }

    /// Wait until every dispatched message has been written or reported.
    pub async fn flush(&self) -> Result<(), PlannerError> {
        Ok(self.sync.flush().await?)
    }

    /// Persistence failures reported since the last call.
    pub fn take_sync_failures(&self) -> Vec<SyncFailure> {
        self.failures.lock().drain()
    }

    pub fn active_plan(&self) -> Option<ActivePlan> {
        self.active_plan.read().clone()
    }
}
