use std::path::{Path, PathBuf};
use super::HistoryRecord;
use crate::error::PersistenceError;
use crate::config::paths::user_dir;
use crate::storage::{read_json, write_json};

#[derive(Clone, Debug)]
pub struct HistoryStore {
    root: PathBuf,
}

impl HistoryStore {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        HistoryStore { root: root.as_ref().to_path_buf() }
    }

    fn dir(&self, user: &str) -> PathBuf {
        user_dir(&self.root, user).join("history")
    }

    fn record_path(&self, user: &str, id: &str) -> PathBuf {
        self.dir(user).join(format!("{}.json", id))
    }

    /// Append one record. Records are immutable once written.
    pub async fn append(&self, user: &str, record: &HistoryRecord) -> Result<(), PersistenceError> {
        write_json(&self.record_path(user, &record.id), record).await
    }

    /// All records, most recent first. Unreadable files are skipped.
    pub async fn load(&self, user: &str) -> Result<Vec<HistoryRecord>, PersistenceError> {
        let mut records = Vec::new();
        let dir = self.dir(user);

        let mut entries = match tokio::fs::read_dir(&dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(records);
            }
            Err(e) => {
                return Err(PersistenceError::new(
                    format!("Failed to read history directory: {}", e),
                    "io"
                ).with_context(format!("path: {:?}", dir)));
            }
        };

        while let Ok(Some(entry)) = entries.next_entry().await {
            let path = entry.path();
            if path.extension().and_then(|s| s.to_str()) != Some("json") {
                continue;
            }

            match read_json::<HistoryRecord>(&path).await {
                Ok(Some(record)) => records.push(record),
                Ok(None) => {}
                Err(e) => {
                    tracing::warn!(
                        path = ?path,
                        error = %e,
                        "Failed to read history record"
                    );
                }
            }
        }

        records.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| b.id.cmp(&a.id)));
        Ok(records)
    }

    /// Re-derived completion written back by the UI; the engine never calls this.
    pub async fn refresh_completion(
        &self,
        user: &str,
        id: &str,
        completion_percentage: u32,
    ) -> Result<HistoryRecord, PersistenceError> {
        let path = self.record_path(user, id);
        let mut record = read_json::<HistoryRecord>(&path)
            .await?
            .ok_or_else(|| PersistenceError::new(
                format!("History record {} not found", id),
                "history"
            ).with_context(format!("path: {:?}", path)))?;

        record.completion_percentage = completion_percentage.min(100);
        write_json(&path, &record).await?;
        Ok(record)
    }
}
