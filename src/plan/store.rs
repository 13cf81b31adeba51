use std::path::{Path, PathBuf};
use chrono::{DateTime, Utc};
use serde::{Serialize, Deserialize};
use super::{Plan, ProgressUpdate};
use crate::error::PersistenceError;
use crate::config::paths::user_dir;
use crate::storage::{read_json, write_json};

/// Latest known completion of one (day, topic) pair.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProgressEntry {
    #[serde(flatten)]
    pub update: ProgressUpdate,
    pub updated_at: DateTime<Utc>,
}

/// Plan snapshots and their synced progress, one file each per plan id.
#[derive(Clone, Debug)]
pub struct PlanStore {
    root: PathBuf,
}

impl PlanStore {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        PlanStore { root: root.as_ref().to_path_buf() }
    }

    fn plan_path(&self, user: &str, plan_id: &str) -> PathBuf {
        user_dir(&self.root, user).join("plans").join(format!("{}.json", plan_id))
    }

    fn progress_path(&self, user: &str, plan_id: &str) -> PathBuf {
        user_dir(&self.root, user).join("progress").join(format!("{}.json", plan_id))
    }

    pub async fn save_plan(&self, user: &str, plan_id: &str, plan: &Plan) -> Result<(), PersistenceError> {
        write_json(&self.plan_path(user, plan_id), plan).await
    }

    pub async fn load_plan(&self, user: &str, plan_id: &str) -> Result<Option<Plan>, PersistenceError> {
        read_json(&self.plan_path(user, plan_id)).await
    }

    pub async fn load_progress(&self, user: &str, plan_id: &str) -> Result<Vec<ProgressEntry>, PersistenceError> {
        Ok(read_json(&self.progress_path(user, plan_id)).await?.unwrap_or_default())
    }

    /// Upsert the completion flag for the update's (day, topic).
    pub async fn record_progress(
        &self,
        user: &str,
        plan_id: &str,
        update: &ProgressUpdate,
    ) -> Result<(), PersistenceError> {
        let mut entries = self.load_progress(user, plan_id).await?;
        let now = Utc::now();

        match entries.iter_mut().find(|e| {
            e.update.day_number == update.day_number && e.update.topic_name == update.topic_name
        }) {
            Some(existing) => {
                existing.update.completed = update.completed;
                existing.updated_at = now;
            }
            None => entries.push(ProgressEntry { update: update.clone(), updated_at: now }),
        }

        write_json(&self.progress_path(user, plan_id), &entries).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Level, TopicCatalog};
    use crate::plan::allocate;

    fn update(day: u32, topic: &str, completed: bool) -> ProgressUpdate {
        ProgressUpdate { day_number: day, topic_name: topic.into(), completed }
    }

    #[tokio::test]
    async fn test_plan_snapshot_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store = PlanStore::new(dir.path());
        let catalog = TopicCatalog::new();
        let plan = allocate("AI", Level::Advanced, catalog.lookup("AI", Level::Advanced).unwrap(), 3, 2.0)
            .unwrap();

        store.save_plan("alice", "plan_1", &plan).await.unwrap();
        assert_eq!(store.load_plan("alice", "plan_1").await.unwrap(), Some(plan));
        assert_eq!(store.load_plan("alice", "plan_2").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_progress_upserts_latest_flag() {
        let dir = tempfile::tempdir().unwrap();
        let store = PlanStore::new(dir.path());

        store.record_progress("alice", "plan_1", &update(1, "Graphs", true)).await.unwrap();
        store.record_progress("alice", "plan_1", &update(2, "Graphs", true)).await.unwrap();
        store.record_progress("alice", "plan_1", &update(1, "Graphs", false)).await.unwrap();

        let entries = store.load_progress("alice", "plan_1").await.unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].update, update(1, "Graphs", false));
        assert_eq!(entries[1].update, update(2, "Graphs", true));
    }

    #[tokio::test]
    async fn test_progress_wire_shape() {
        let dir = tempfile::tempdir().unwrap();
        let store = PlanStore::new(dir.path());
        store.record_progress("alice", "plan_1", &update(3, "Graphs", true)).await.unwrap();

        let raw = std::fs::read_to_string(user_dir(dir.path(), "alice").join("progress/plan_1.json")).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value[0]["dayNumber"], 3);
        assert_eq!(value[0]["topicName"], "Graphs");
        assert_eq!(value[0]["completed"], true);
    }
}
