use std::path::Path;
use serde::{de::DeserializeOwned, Serialize};
use crate::error::PersistenceError;

/// Serialize `value` as pretty JSON, creating parent directories.
pub async fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), PersistenceError> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| PersistenceError::new(
                format!("Failed to create directory: {}", e),
                "io"
            ).with_context(format!("path: {:?}", parent)))?;
    }

    let json = serde_json::to_string_pretty(value)
        .map_err(|e| PersistenceError::new(
            format!("Failed to serialize: {}", e),
            "json_serialize"
        ).with_context(format!("path: {:?}", path)))?;

    tokio::fs::write(path, json)
        .await
        .map_err(|e| PersistenceError::new(
            format!("Failed to write file: {}", e),
            "io"
        ).with_context(format!("path: {:?}", path)))?;

    Ok(())
}

/// Read JSON from `path`; a missing file is `Ok(None)`.
pub async fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, PersistenceError> {
    match tokio::fs::read_to_string(path).await {
        Ok(content) => {
            serde_json::from_str(&content)
                .map_err(|e| PersistenceError::new(
                    format!("Failed to parse file: {}", e),
                    "json_parse"
                ).with_context(format!("path: {:?}", path)))
                .map(Some)
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Ok(None)
        }
        Err(e) => {
            Err(PersistenceError::new(
                format!("Failed to read file: {}", e),
                "io"
            ).with_context(format!("path: {:?}", path)))
        }
    }
}
