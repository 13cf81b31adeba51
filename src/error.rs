use serde::{Serialize, Deserialize};
use std::fmt;
use thiserror::Error;

use crate::catalog::Level;

/// Unified error type for the planner engine.
/// Every failure is returned to the caller as a value; none aborts the process.
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
#[serde(tag = "kind", content = "detail")]
pub enum PlannerError {
    #[error("unknown subject: {0}")]
    UnknownSubject(String),

    #[error("subject '{subject}' has no topics at {level} level")]
    EmptyLevel { subject: String, level: Level },

    #[error("subject '{0}' was defined without any topics")]
    NoTopicsProvided(String),

    #[error("subject name is required")]
    MissingSubjectName,

    #[error("invalid constraint: {0}")]
    InvalidConstraint(String),

    #[error("day {0} not found in plan")]
    DayNotFound(u32),

    #[error("topic '{topic}' not found on day {day}")]
    TopicNotFound { day: u32, topic: String },

    #[error("no plan has been generated yet")]
    NoActivePlan,

    #[error("{0}")]
    Persistence(#[from] PersistenceError),
}

impl PlannerError {
    /// Only persistence failures are advisory; everything else is an input error.
    pub fn is_advisory(&self) -> bool {
        matches!(self, PlannerError::Persistence(_))
    }
}

/// Failure at the storage boundary. Reported, never used to roll back local state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistenceError {
    pub message: String,
    pub stage: String,
    pub context: Option<String>,
    pub source: Option<String>,
}

impl PersistenceError {
    /// Create a new error with stage and message
    pub fn new<S: Into<String>>(message: S, stage: &'static str) -> Self {
        PersistenceError {
            message: message.into(),
            stage: stage.to_string(),
            context: None,
            source: None,
        }
    }

    /// Add additional context information
    pub fn with_context<S: Into<String>>(mut self, context: S) -> Self {
        self.context = Some(context.into());
        self
    }

    /// Add source error information
    pub fn with_source<S: Into<String>>(mut self, source: S) -> Self {
        self.source = Some(source.into());
        self
    }
}

impl fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.stage, self.message)?;
        if let Some(ref context) = self.context {
            write!(f, " (context: {})", context)?;
        }
        if let Some(ref source) = self.source {
            write!(f, " (source: {})", source)?;
        }
        Ok(())
    }
}

impl std::error::Error for PersistenceError {}

impl From<anyhow::Error> for PersistenceError {
    fn from(err: anyhow::Error) -> Self {
        PersistenceError::new(
            format!("{:#}", err),
            "unknown"
        ).with_source("anyhow")
    }
}

impl From<std::io::Error> for PersistenceError {
    fn from(err: std::io::Error) -> Self {
        PersistenceError::new(
            format!("I/O error: {}", err),
            "io"
        ).with_source("std::io")
    }
}

impl From<serde_json::Error> for PersistenceError {
    fn from(err: serde_json::Error) -> Self {
        PersistenceError::new(
            format!("JSON error: {}", err),
            "json_parse"
        ).with_source("serde_json")
    }
}

impl From<toml::de::Error> for PersistenceError {
    fn from(err: toml::de::Error) -> Self {
        PersistenceError::new(
            format!("TOML error: {}", err),
            "toml_parse"
        ).with_source("toml")
    }
}

impl From<std::io::Error> for PlannerError {
    fn from(err: std::io::Error) -> Self {
        PlannerError::Persistence(err.into())
    }
}

impl From<serde_json::Error> for PlannerError {
    fn from(err: serde_json::Error) -> Self {
        PlannerError::Persistence(err.into())
    }
}
