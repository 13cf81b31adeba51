#[cfg(test)]
mod tests {
    use crate::catalog::Level;
    use crate::error::{PersistenceError, PlannerError};

    #[test]
    fn test_persistence_error_creation() {
        let error = PersistenceError::new("Test error", "test_stage");
        assert_eq!(error.message, "Test error");
        assert_eq!(error.stage, "test_stage");
    }

    #[test]
    fn test_persistence_error_with_context() {
        let error = PersistenceError::new("Test error", "test_stage")
            .with_context("Additional context");
        assert!(error.context.is_some());
        assert_eq!(error.context.unwrap(), "Additional context");
    }

    #[test]
    fn test_persistence_error_display() {
        let error = PersistenceError::new("Test error", "test_stage")
            .with_context("context")
            .with_source("source");
        let display = format!("{}", error);
        assert!(display.contains("[test_stage] Test error"));
        assert!(display.contains("(context: context)"));
        assert!(display.contains("(source: source)"));
    }

    #[test]
    fn test_io_error_converts_to_advisory() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let error: PlannerError = io.into();
        assert!(error.is_advisory());
        assert!(error.to_string().contains("[io]"));
    }

    #[test]
    fn test_input_errors_are_not_advisory() {
        assert!(!PlannerError::MissingSubjectName.is_advisory());
        assert!(!PlannerError::DayNotFound(4).is_advisory());
        assert_eq!(
            PlannerError::EmptyLevel { subject: "ML".into(), level: Level::Advanced }.to_string(),
            "subject 'ML' has no topics at Advanced level"
        );
    }

    #[test]
    fn test_error_serializes_with_kind_tag() {
        let value = serde_json::to_value(PlannerError::TopicNotFound {
            day: 2,
            topic: "Graphs".into(),
        })
        .unwrap();
        assert_eq!(value["kind"], "TopicNotFound");
        assert_eq!(value["detail"]["day"], 2);

        let value = serde_json::to_value(PlannerError::MissingSubjectName).unwrap();
        assert_eq!(value["kind"], "MissingSubjectName");
    }
}
