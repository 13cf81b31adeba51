use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Engine counters. All metrics are atomic for sharing with the sync worker.
#[derive(Clone, Default, Debug)]
pub struct Metrics {
    pub plans_generated: Arc<AtomicU64>,
    pub toggles: Arc<AtomicU64>,
    pub rebalances: Arc<AtomicU64>,
    pub subjects_defined: Arc<AtomicU64>,
    /// Sync messages the persistence worker failed to apply
    pub persistence_failures: Arc<AtomicU64>,
}

#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub plans_generated: u64,
    pub toggles: u64,
    pub rebalances: u64,
    pub subjects_defined: u64,
    pub persistence_failures: u64,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_plan_generated(&self) {
        self.plans_generated.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_toggle(&self) {
        self.toggles.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_rebalance(&self) {
        self.rebalances.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_subject_defined(&self) {
        self.subjects_defined.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_persistence_failure(&self) {
        self.persistence_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            plans_generated: self.plans_generated.load(Ordering::Relaxed),
            toggles: self.toggles.load(Ordering::Relaxed),
            rebalances: self.rebalances.load(Ordering::Relaxed),
            subjects_defined: self.subjects_defined.load(Ordering::Relaxed),
            persistence_failures: self.persistence_failures.load(Ordering::Relaxed),
        }
    }
}
