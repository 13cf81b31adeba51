use serde::{Serialize, Deserialize};
use crate::adaptive::status::{classify, completion_percentage, Tier};
use crate::plan::Plan;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct DayOverview {
    pub day: u32,
    pub completed: usize,
    pub total: usize,
    pub percentage: u32,
    pub tier: Tier,
    pub planned_hours: f64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PlanOverview {
    pub days: Vec<DayOverview>, // one bar per day
    pub completed: usize,
    pub remaining: usize,
    pub percentage: u32,
    pub tier: Tier,
    pub planned_hours: f64,
}

pub fn compute_overview(plan: &Plan) -> PlanOverview {
    let days: Vec<DayOverview> = plan
        .days
        .iter()
        .map(|day| {
            let status = classify(&day.assignments);
            DayOverview {
                day: day.day_number,
                completed: day.completed_count(),
                total: day.assignments.len(),
                percentage: status.percentage,
                tier: status.tier,
                planned_hours: day.total_hours(),
            }
        })
        .collect();

    let completed: usize = days.iter().map(|d| d.completed).sum();
    let total: usize = days.iter().map(|d| d.total).sum();
    let percentage = completion_percentage(completed, total);

    PlanOverview {
        completed,
        remaining: total - completed,
        percentage,
        tier: Tier::from_percentage(percentage),
        planned_hours: plan.total_hours(),
        days,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adaptive::classify_plan;
    use crate::catalog::{Level, TopicCatalog};
    use crate::plan::{allocate, toggle};

    #[test]
    fn test_overview_matches_flattened_status() {
        let catalog = TopicCatalog::new();
        let topics = catalog.lookup("Python", Level::Intermediate).unwrap();
        let mut plan = allocate("Python", Level::Intermediate, topics, 2, 3.0).unwrap();
        toggle(&mut plan, 1, "OOP Concepts").unwrap();
        toggle(&mut plan, 1, "File Handling").unwrap();

        let overview = compute_overview(&plan);
        assert_eq!(overview.days.len(), 2);
        assert_eq!(overview.days[0].percentage, 100);
        assert_eq!(overview.days[0].tier, Tier::Ahead);
        assert_eq!(overview.days[1].percentage, 0);
        assert_eq!(overview.completed, 2);
        assert_eq!(overview.remaining, 1);
        assert_eq!(overview.percentage, classify_plan(&plan).percentage);
        assert_eq!(overview.tier, Tier::OnTrack);
        assert_eq!(overview.planned_hours, 4.5);
    }
}
