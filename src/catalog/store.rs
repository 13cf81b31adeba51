use std::path::{Path, PathBuf};
use super::CustomSubjects;
use crate::error::PersistenceError;
use crate::config::paths::user_dir;
use crate::storage::{read_json, write_json};

const CUSTOM_SUBJECTS_FILE: &str = "custom_subjects.json";

/// Per-user custom subject registry on disk.
#[derive(Clone, Debug)]
pub struct CatalogStore {
    root: PathBuf,
}

impl CatalogStore {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        CatalogStore { root: root.as_ref().to_path_buf() }
    }

    fn path(&self, user: &str) -> PathBuf {
        user_dir(&self.root, user).join(CUSTOM_SUBJECTS_FILE)
    }

    /// Load the user's custom subjects; an absent file means none yet.
    pub async fn load(&self, user: &str) -> Result<CustomSubjects, PersistenceError> {
        let subjects = read_json::<CustomSubjects>(&self.path(user))
            .await?
            .unwrap_or_default();
        tracing::debug!(user = %user, count = subjects.len(), "Loaded custom subjects");
        Ok(subjects)
    }

    pub async fn save(&self, user: &str, subjects: &CustomSubjects) -> Result<(), PersistenceError> {
        write_json(&self.path(user), subjects).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Level, TopicCatalog};

    #[tokio::test]
    async fn test_save_and_load_per_user() {
        let dir = tempfile::tempdir().unwrap();
        let store = CatalogStore::new(dir.path());

        let mut catalog = TopicCatalog::new();
        catalog.define("Rust", [(Level::Beginner, "Ownership\nBorrowing")]).unwrap();
        store.save("alice", &catalog.custom_subjects()).await.unwrap();

        let loaded = store.load("alice").await.unwrap();
        assert_eq!(loaded["Rust"].beginner, vec!["Ownership", "Borrowing"]);
        assert!(loaded["Rust"].advanced.is_empty());

        assert!(store.load("bob").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_similar_identities_do_not_share_subjects() {
        let dir = tempfile::tempdir().unwrap();
        let store = CatalogStore::new(dir.path());

        let mut catalog = TopicCatalog::new();
        catalog.define("Secret", [(Level::Beginner, "Hidden")]).unwrap();
        store.save("alice@example.com", &catalog.custom_subjects()).await.unwrap();

        assert!(store.load("alice_example.com").await.unwrap().is_empty());
        assert!(store.load("alice@example.com").await.unwrap().contains_key("Secret"));
    }

    #[tokio::test]
    async fn test_stored_shape_uses_level_names() {
        let dir = tempfile::tempdir().unwrap();
        let store = CatalogStore::new(dir.path());
        let mut catalog = TopicCatalog::new();
        catalog.define("Rust", [(Level::Advanced, "Unsafe")]).unwrap();
        store.save("alice", &catalog.custom_subjects()).await.unwrap();

        let raw = std::fs::read_to_string(
            user_dir(dir.path(), "alice").join("custom_subjects.json"),
        )
        .unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["Rust"]["Advanced"][0], "Unsafe");
        assert!(value["Rust"]["Beginner"].as_array().unwrap().is_empty());
    }
}
