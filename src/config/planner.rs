use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use lazy_static::lazy_static;

use super::paths::app_data_dir;
use crate::error::PersistenceError;

pub const CONFIG_FILE: &str = "planner.toml";

/// Hours added to each incomplete topic by a smart adjust, per tier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RebalancePolicy {
    pub behind_increment: f64,
    pub on_track_increment: f64,
}

impl Default for RebalancePolicy {
    fn default() -> Self {
        RebalancePolicy {
            behind_increment: 1.0,
            on_track_increment: 0.5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    pub data_dir: PathBuf,
    pub default_days: u32,
    pub default_hours_per_day: f64,
    pub log_level: String,
    pub log_json: bool,
    pub rebalance: RebalancePolicy,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        PlannerConfig {
            data_dir: app_data_dir(),
            default_days: 1,
            default_hours_per_day: 2.0,
            log_level: "info".to_string(),
            log_json: true,
            rebalance: RebalancePolicy::default(),
        }
    }
}

fn read_config(path: &Path) -> anyhow::Result<PlannerConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    let config = toml::from_str::<PlannerConfig>(&content)
        .with_context(|| format!("parsing {}", path.display()))?;
    Ok(config)
}

impl PlannerConfig {
    /// Parse a config file. A missing file yields defaults; a broken one is an error.
    pub fn load_from(path: &Path) -> Result<Self, PersistenceError> {
        if !path.exists() {
            return Ok(PlannerConfig::default());
        }
        read_config(path)
            .map_err(|e| PersistenceError::from(e).with_context(format!("path: {:?}", path)))
    }

    pub fn config_path() -> PathBuf {
        app_data_dir().join(CONFIG_FILE)
    }
}

/// Config plus the error that forced defaults, if any. Nothing is logged here:
/// the config decides how logging is set up, so the caller reports the error
/// once the subscriber exists.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: PlannerConfig,
    pub error: Option<PersistenceError>,
}

fn load_planner_config_internal(path: &Path) -> LoadedConfig {
    match PlannerConfig::load_from(path) {
        Ok(config) => LoadedConfig { config, error: None },
        Err(e) => LoadedConfig {
            config: PlannerConfig::default(),
            error: Some(e),
        },
    }
}

lazy_static! {
    static ref PLANNER_CONFIG: LoadedConfig =
        load_planner_config_internal(&PlannerConfig::config_path());
}

/// Get the cached planner configuration (loaded once per process)
pub fn get_planner_config() -> &'static PlannerConfig {
    &PLANNER_CONFIG.config
}

/// Why the cached config fell back to defaults, if it did.
pub fn planner_config_error() -> Option<&'static PersistenceError> {
    PLANNER_CONFIG.error.as_ref()
}
