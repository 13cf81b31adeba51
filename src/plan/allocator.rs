use super::{round1, Plan, PlanDay, TopicAssignment};
use crate::catalog::{Level, Topic};
use crate::error::PlannerError;

/// Smallest hour value an assignment can carry after rounding.
pub const MIN_TOPIC_HOURS: f64 = 0.1;

/// Partition `topics` into consecutive days of `ceil(n / total_days)` topics each.
///
/// Every assignment gets `hours_per_day / topics_per_day` rounded to one
/// decimal, including those on a short final day. Days past the last topic
/// are not created, so the plan may hold fewer than `total_days` days.
/// The result is all-or-nothing and fully determined by the inputs.
pub fn allocate(
    subject: &str,
    level: Level,
    topics: &[Topic],
    total_days: u32,
    hours_per_day: f64,
) -> Result<Plan, PlannerError> {
    if total_days < 1 {
        return Err(PlannerError::InvalidConstraint(format!(
            "total days must be at least 1, got {}",
            total_days
        )));
    }
    if !hours_per_day.is_finite() || hours_per_day <= 0.0 {
        return Err(PlannerError::InvalidConstraint(format!(
            "hours per day must be positive, got {}",
            hours_per_day
        )));
    }
    if topics.is_empty() {
        return Err(PlannerError::EmptyLevel {
            subject: subject.to_string(),
            level,
        });
    }

    let topics_per_day = topics.len().div_ceil(total_days as usize);
    let hours = round1(hours_per_day / topics_per_day as f64).max(MIN_TOPIC_HOURS);
    if !hours.is_finite() {
        return Err(PlannerError::InvalidConstraint(format!(
            "hours per day {} is too large to allocate",
            hours_per_day
        )));
    }

    let days: Vec<PlanDay> = topics
        .chunks(topics_per_day)
        .enumerate()
        .map(|(index, chunk)| PlanDay {
            day_number: index as u32 + 1,
            assignments: chunk
                .iter()
                .map(|topic| TopicAssignment {
                    name: topic.name.clone(),
                    hours,
                    completed: false,
                })
                .collect(),
        })
        .collect();

    tracing::debug!(
        subject = %subject,
        level = %level,
        topics = topics.len(),
        topics_per_day,
        days = days.len(),
        hours_per_topic = hours,
        "Allocated plan"
    );

    Ok(Plan {
        subject: subject.to_string(),
        level,
        total_days,
        hours_per_day,
        days,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn topics(n: usize) -> Vec<Topic> {
        (1..=n).map(|i| Topic::new(format!("t{}", i))).collect()
    }

    fn day_sizes(plan: &Plan) -> Vec<usize> {
        plan.days.iter().map(|d| d.assignments.len()).collect()
    }

    #[test]
    fn test_even_split() {
        let plan = allocate("DSA", Level::Beginner, &topics(6), 3, 3.0).unwrap();
        assert_eq!(day_sizes(&plan), vec![2, 2, 2]);
        assert!(plan.assignments().all(|a| a.hours == 1.5 && !a.completed));
        assert_eq!(
            plan.days.iter().map(|d| d.day_number).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
    }

    #[test]
    fn test_short_final_day_keeps_rate() {
        let plan = allocate("DSA", Level::Beginner, &topics(5), 3, 2.0).unwrap();
        assert_eq!(day_sizes(&plan), vec![2, 2, 1]);
        assert_eq!(plan.days[2].assignments[0].hours, 1.0);
    }

    #[test]
    fn test_trailing_days_not_created() {
        let plan = allocate("DSA", Level::Beginner, &topics(3), 10, 2.0).unwrap();
        assert_eq!(day_sizes(&plan), vec![1, 1, 1]);
        assert_eq!(plan.total_days, 10);

        // ceil(7/4) = 2 per day -> 4 days; ceil(7/5) = 2 -> still 4 days.
        let plan = allocate("DSA", Level::Beginner, &topics(7), 5, 2.0).unwrap();
        assert_eq!(day_sizes(&plan), vec![2, 2, 2, 1]);
    }

    #[test]
    fn test_flatten_preserves_order() {
        let input = topics(11);
        let plan = allocate("DSA", Level::Advanced, &input, 4, 5.0).unwrap();
        let expected: Vec<&str> = input.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(plan.topic_names(), expected);
    }

    #[test]
    fn test_deterministic() {
        let input = topics(9);
        let a = allocate("ML", Level::Intermediate, &input, 4, 2.5).unwrap();
        let b = allocate("ML", Level::Intermediate, &input, 4, 2.5).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_invalid_constraints() {
        let input = topics(3);
        assert!(matches!(
            allocate("DSA", Level::Beginner, &input, 0, 2.0),
            Err(PlannerError::InvalidConstraint(_))
        ));
        assert!(matches!(
            allocate("DSA", Level::Beginner, &input, 2, 0.0),
            Err(PlannerError::InvalidConstraint(_))
        ));
        assert!(matches!(
            allocate("DSA", Level::Beginner, &input, 2, f64::NAN),
            Err(PlannerError::InvalidConstraint(_))
        ));
    }

    #[test]
    fn test_huge_budget_rejected() {
        let err = allocate("DSA", Level::Beginner, &topics(1), 1, 1e308).unwrap_err();
        assert!(matches!(err, PlannerError::InvalidConstraint(_)));

        let plan = allocate("DSA", Level::Beginner, &topics(2), 1, 1e6).unwrap();
        assert!(plan.assignments().all(|a| a.hours == 500000.0));
    }

    #[test]
    fn test_empty_topics() {
        let err = allocate("DSA", Level::Beginner, &[], 2, 2.0).unwrap_err();
        assert_eq!(
            err,
            PlannerError::EmptyLevel { subject: "DSA".into(), level: Level::Beginner }
        );
    }

    #[test]
    fn test_tiny_budget_keeps_positive_hours() {
        let plan = allocate("DSA", Level::Beginner, &topics(4), 1, 0.1).unwrap();
        assert!(plan.assignments().all(|a| a.hours > 0.0));
    }
}
