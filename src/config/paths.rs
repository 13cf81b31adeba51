use std::path::{Path, PathBuf};
use sha2::{Digest, Sha256};

pub const APP_ID: &str = "com.studyplan.engine";

/// Environment override for the data directory (used by tests and packaging).
pub const DATA_DIR_ENV: &str = "STUDYPLAN_DATA_DIR";

/// Platform-specific application data directory.
pub fn app_data_dir() -> PathBuf {
    if let Some(dir) = std::env::var_os(DATA_DIR_ENV) {
        return PathBuf::from(dir);
    }

    #[cfg(target_os = "macos")]
    {
        if let Some(home) = std::env::var_os("HOME") {
            let mut dir = PathBuf::from(home);
            dir.push("Library/Application Support");
            dir.push(APP_ID);
            return dir;
        }
    }

    #[cfg(target_os = "windows")]
    {
        if let Some(appdata) = std::env::var_os("APPDATA") {
            let mut dir = PathBuf::from(appdata);
            dir.push(APP_ID);
            return dir;
        }
    }

    #[cfg(target_os = "linux")]
    {
        if let Some(home) = std::env::var_os("HOME") {
            let mut dir = PathBuf::from(home);
            dir.push(".local/share");
            dir.push(APP_ID);
            return dir;
        }
    }

    // Fallback
    PathBuf::from(".")
}

/// Turn a user identity into a single safe path component.
pub fn sanitize_component(raw: &str) -> String {
    let cleaned: String = raw
        .trim()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.' { c } else { '_' })
        .collect();
    let cleaned = cleaned.trim_matches('.').to_string();
    if cleaned.is_empty() {
        "anonymous".to_string()
    } else {
        cleaned
    }
}

/// Directory name for a user identity: a readable prefix plus a hash of the
/// exact identity, so identities that sanitize alike stay apart.
pub fn user_key(user: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(user.as_bytes());
    let digest = format!("{:x}", hasher.finalize());
    format!("{}-{}", sanitize_component(user), &digest[..16])
}

/// Per-user directory under the data root.
pub fn user_dir(root: &Path, user: &str) -> PathBuf {
    root.join("users").join(user_key(user))
}
