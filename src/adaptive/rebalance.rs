use serde::{Serialize, Deserialize};
use super::status::{classify, Status, Tier};
use crate::config::RebalancePolicy;
use crate::plan::{round1, PlanDay};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct RebalanceOutcome {
    pub day_number: u32,
    pub status: Status,
    /// Incomplete assignments that received extra time.
    pub adjusted: usize,
    pub added_hours: f64,
    pub total_hours: f64,
    /// Day total minus the hours originally budgeted for it.
    pub over_baseline: f64,
}

/// Add time to the day's incomplete topics using the default increments.
pub fn rebalance(day: &mut PlanDay, baseline_hours: f64) -> RebalanceOutcome {
    rebalance_with(day, baseline_hours, &RebalancePolicy::default())
}

/// Behind adds `behind_increment`, OnTrack adds `on_track_increment`,
/// Ahead changes nothing. Completed topics are never touched.
/// Each call compounds on the previous one while the tier holds.
pub fn rebalance_with(day: &mut PlanDay, baseline_hours: f64, policy: &RebalancePolicy) -> RebalanceOutcome {
    let status = classify(&day.assignments);
    let increment = match status.tier {
        Tier::Behind => policy.behind_increment,
        Tier::OnTrack => policy.on_track_increment,
        Tier::Ahead => 0.0,
    };

    let mut adjusted = 0;
    let mut added = 0.0;
    if increment > 0.0 {
        for assignment in day.assignments.iter_mut().filter(|a| !a.completed) {
            let before = assignment.hours;
            assignment.hours = round1(before + increment);
            added += assignment.hours - before;
            adjusted += 1;
        }
    }

    let added_hours = round1(added);
    let total_hours = day.total_hours();

    tracing::info!(
        day = day.day_number,
        tier = %status.tier,
        percentage = status.percentage,
        adjusted,
        added_hours,
        "Rebalanced day"
    );

    RebalanceOutcome {
        day_number: day.day_number,
        status,
        adjusted,
        added_hours,
        total_hours,
        over_baseline: round1(total_hours - baseline_hours),
    }
}
