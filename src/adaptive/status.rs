use std::fmt;
use serde::{Serialize, Deserialize};
use crate::plan::{Plan, TopicAssignment};

pub const ON_TRACK_THRESHOLD: u32 = 50;
pub const AHEAD_THRESHOLD: u32 = 80;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Tier {
    Behind,
    OnTrack,
    Ahead,
}

impl Tier {
    pub fn from_percentage(percentage: u32) -> Self {
        if percentage < ON_TRACK_THRESHOLD {
            Tier::Behind
        } else if percentage < AHEAD_THRESHOLD {
            Tier::OnTrack
        } else {
            Tier::Ahead
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Tier::Behind => "Behind",
            Tier::OnTrack => "On Track",
            Tier::Ahead => "Ahead",
        })
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct Status {
    pub percentage: u32,
    pub tier: Tier,
}

/// Integer completion percentage, rounded half up; 0 for an empty set.
pub fn completion_percentage(completed: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    (100.0 * completed as f64 / total as f64).round() as u32
}

/// Project completion flags onto a tier. Never stored, always recomputed.
pub fn classify<'a, I>(assignments: I) -> Status
where
    I: IntoIterator<Item = &'a TopicAssignment>,
{
    let (completed, total) = assignments
        .into_iter()
        .fold((0usize, 0usize), |(done, all), a| (done + a.completed as usize, all + 1));
    let percentage = completion_percentage(completed, total);
    Status {
        percentage,
        tier: Tier::from_percentage(percentage),
    }
}

/// Aggregate status over every day of the plan.
pub fn classify_plan(plan: &Plan) -> Status {
    classify(plan.assignments())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assignments(completed: usize, total: usize) -> Vec<TopicAssignment> {
        (0..total)
            .map(|i| TopicAssignment {
                name: format!("t{}", i),
                hours: 1.0,
                completed: i < completed,
            })
            .collect()
    }

    #[test]
    fn test_tier_boundaries() {
        assert_eq!(Tier::from_percentage(49), Tier::Behind);
        assert_eq!(Tier::from_percentage(50), Tier::OnTrack);
        assert_eq!(Tier::from_percentage(79), Tier::OnTrack);
        assert_eq!(Tier::from_percentage(80), Tier::Ahead);
        assert_eq!(Tier::from_percentage(100), Tier::Ahead);
    }

    #[test]
    fn test_classify_empty() {
        let status = classify(&Vec::<TopicAssignment>::new());
        assert_eq!(status, Status { percentage: 0, tier: Tier::Behind });
    }

    #[test]
    fn test_classify_counts() {
        assert_eq!(classify(&assignments(1, 3)), Status { percentage: 33, tier: Tier::Behind });
        assert_eq!(classify(&assignments(1, 2)), Status { percentage: 50, tier: Tier::OnTrack });
        assert_eq!(classify(&assignments(2, 3)), Status { percentage: 67, tier: Tier::OnTrack });
        assert_eq!(classify(&assignments(4, 5)), Status { percentage: 80, tier: Tier::Ahead });
        assert_eq!(classify(&assignments(3, 3)), Status { percentage: 100, tier: Tier::Ahead });
    }

    #[test]
    fn test_percentage_rounding() {
        // 49/100 and 79/100 land exactly on the boundary neighbours.
        assert_eq!(classify(&assignments(49, 100)).tier, Tier::Behind);
        assert_eq!(classify(&assignments(79, 100)).tier, Tier::OnTrack);
        assert_eq!(completion_percentage(1, 8), 13);
    }

    #[test]
    fn test_display() {
        assert_eq!(Tier::OnTrack.to_string(), "On Track");
    }
}
