pub mod store;

use chrono::{DateTime, Utc};
use serde::{Serialize, Deserialize};
use sha2::{Digest, Sha256};
use crate::adaptive::classify_plan;
use crate::catalog::Level;
use crate::plan::Plan;

pub use store::HistoryStore;

/// One entry per successful allocation. The engine never rewrites it.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HistoryRecord {
    pub id: String,
    pub subject: String,
    pub level: Level,
    pub total_days: u32,
    pub hours_per_day: f64,
    pub created_at: DateTime<Utc>,
    pub completion_percentage: u32,
}

impl HistoryRecord {
    pub fn from_plan(id: String, plan: &Plan, created_at: DateTime<Utc>) -> Self {
        HistoryRecord {
            id,
            subject: plan.subject.clone(),
            level: plan.level,
            total_days: plan.total_days,
            hours_per_day: plan.hours_per_day,
            created_at,
            completion_percentage: classify_plan(plan).percentage,
        }
    }
}

/// Stable identifier for a plan generated at `created_at`.
pub fn plan_id(plan: &Plan, user: &str, created_at: DateTime<Utc>) -> String {
    let mut hasher = Sha256::new();
    hasher.update(user.as_bytes());
    hasher.update(plan.subject.as_bytes());
    hasher.update(plan.level.as_str().as_bytes());
    hasher.update(plan.total_days.to_le_bytes());
    hasher.update(plan.hours_per_day.to_le_bytes());
    hasher.update(created_at.timestamp_nanos_opt().unwrap_or_default().to_le_bytes());
    let digest = format!("{:x}", hasher.finalize());
    format!("plan_{}", &digest[..16])
}
