use serde::{Serialize, Deserialize};
use super::Plan;
use crate::error::PlannerError;

/// Completion change emitted to the progress store after a toggle.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ProgressUpdate {
    pub day_number: u32,
    pub topic_name: String,
    pub completed: bool,
}

/// Flip completion of the first topic named `topic` on `day_number`.
///
/// The plan is mutated in place and stays authoritative even if the
/// returned update later fails to reach storage.
pub fn toggle(plan: &mut Plan, day_number: u32, topic: &str) -> Result<ProgressUpdate, PlannerError> {
    let day = plan
        .day_mut(day_number)
        .ok_or(PlannerError::DayNotFound(day_number))?;

    let assignment = day
        .assignment_mut(topic)
        .ok_or_else(|| PlannerError::TopicNotFound {
            day: day_number,
            topic: topic.to_string(),
        })?;

    assignment.completed = !assignment.completed;

    tracing::debug!(
        day = day_number,
        topic = %topic,
        completed = assignment.completed,
        "Toggled topic"
    );

    Ok(ProgressUpdate {
        day_number,
        topic_name: assignment.name.clone(),
        completed: assignment.completed,
    })
}
