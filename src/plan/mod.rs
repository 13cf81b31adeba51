pub mod allocator;
pub mod progress;
pub mod store;

use serde::{Serialize, Deserialize};
use crate::catalog::Level;

pub use allocator::allocate;
pub use progress::{toggle, ProgressUpdate};
pub use store::PlanStore;

/// Round to one decimal place, half away from zero.
/// Shared by the allocator and the rebalancer so displayed totals reconcile.
pub fn round1(hours: f64) -> f64 {
    (hours * 10.0).round() / 10.0
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TopicAssignment {
    pub name: String,
    pub hours: f64,
    pub completed: bool,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PlanDay {
    pub day_number: u32,
    pub assignments: Vec<TopicAssignment>,
}

impl PlanDay {
    /// Sum of allocated hours for the day.
    pub fn total_hours(&self) -> f64 {
        round1(self.assignments.iter().map(|a| a.hours).sum())
    }

    pub fn completed_count(&self) -> usize {
        self.assignments.iter().filter(|a| a.completed).count()
    }

    /// First assignment with this name; names are not guaranteed unique.
    pub fn assignment_mut(&mut self, topic: &str) -> Option<&mut TopicAssignment> {
        self.assignments.iter_mut().find(|a| a.name == topic)
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Plan {
    pub subject: String,
    pub level: Level,
    pub total_days: u32,
    pub hours_per_day: f64,
    pub days: Vec<PlanDay>,
}

impl Plan {
    pub fn day(&self, day_number: u32) -> Option<&PlanDay> {
        self.days.iter().find(|d| d.day_number == day_number)
    }

    pub fn day_mut(&mut self, day_number: u32) -> Option<&mut PlanDay> {
        self.days.iter_mut().find(|d| d.day_number == day_number)
    }

    /// Every assignment in day order.
    pub fn assignments(&self) -> impl Iterator<Item = &TopicAssignment> {
        self.days.iter().flat_map(|d| d.assignments.iter())
    }

    pub fn topic_names(&self) -> Vec<&str> {
        self.assignments().map(|a| a.name.as_str()).collect()
    }

    pub fn total_hours(&self) -> f64 {
        round1(self.days.iter().map(PlanDay::total_hours).sum())
    }
}
