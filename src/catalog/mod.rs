pub mod builtin;
pub mod store;

use std::collections::BTreeMap;
use std::fmt;
use serde::{Serialize, Deserialize};
use crate::error::PlannerError;

/// Difficulty tier selecting which topic list of a subject is allocated.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    Beginner,
    Intermediate,
    Advanced,
}

impl Level {
    pub const ALL: [Level; 3] = [Level::Beginner, Level::Intermediate, Level::Advanced];

    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Beginner => "Beginner",
            Level::Intermediate => "Intermediate",
            Level::Advanced => "Advanced",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Topic {
    pub name: String,
}

impl Topic {
    pub fn new<S: Into<String>>(name: S) -> Self {
        Topic { name: name.into() }
    }
}

impl From<&str> for Topic {
    fn from(name: &str) -> Self {
        Topic::new(name)
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct CatalogEntry {
    pub subject: String,
    pub levels: BTreeMap<Level, Vec<Topic>>,
}

impl CatalogEntry {
    pub fn topics(&self, level: Level) -> &[Topic] {
        self.levels.get(&level).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Stored shape of one user-defined subject: raw topic names per level.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct LevelTopics {
    #[serde(rename = "Beginner", default)]
    pub beginner: Vec<String>,
    #[serde(rename = "Intermediate", default)]
    pub intermediate: Vec<String>,
    #[serde(rename = "Advanced", default)]
    pub advanced: Vec<String>,
}

/// Subject name → topics, the unit exchanged with the custom catalog store.
pub type CustomSubjects = BTreeMap<String, LevelTopics>;

impl From<&CatalogEntry> for LevelTopics {
    fn from(entry: &CatalogEntry) -> Self {
        let names = |level: Level| -> Vec<String> {
            entry.topics(level).iter().map(|t| t.name.clone()).collect()
        };
        LevelTopics {
            beginner: names(Level::Beginner),
            intermediate: names(Level::Intermediate),
            advanced: names(Level::Advanced),
        }
    }
}

impl LevelTopics {
    fn into_entry(self, subject: &str) -> CatalogEntry {
        let mut levels = BTreeMap::new();
        for (level, names) in [
            (Level::Beginner, self.beginner),
            (Level::Intermediate, self.intermediate),
            (Level::Advanced, self.advanced),
        ] {
            levels.insert(level, names.into_iter().map(Topic::new).collect());
        }
        CatalogEntry { subject: subject.to_string(), levels }
    }
}

/// Split raw user text into topics: one per line, trimmed, blanks dropped.
pub fn parse_topic_lines(raw: &str) -> Vec<Topic> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(Topic::new)
        .collect()
}

/// Built-in subjects plus the user's own registry.
/// User entries shadow built-ins with the same name.
#[derive(Clone, Debug)]
pub struct TopicCatalog {
    builtin: BTreeMap<String, CatalogEntry>,
    custom: BTreeMap<String, CatalogEntry>,
}

impl TopicCatalog {
    pub fn new() -> Self {
        TopicCatalog {
            builtin: builtin::builtin_entries(),
            custom: BTreeMap::new(),
        }
    }

    /// Catalog seeded with a previously persisted custom registry.
    pub fn with_custom(custom: CustomSubjects) -> Self {
        let mut catalog = Self::new();
        catalog.load_custom(custom);
        catalog
    }

    /// Replace the user registry with persisted entries (session start).
    pub fn load_custom(&mut self, custom: CustomSubjects) {
        self.custom = custom
            .into_iter()
            .map(|(subject, topics)| {
                let entry = topics.into_entry(&subject);
                (subject, entry)
            })
            .collect();
        tracing::debug!(count = self.custom.len(), "Loaded custom subjects");
    }

    pub fn lookup(&self, subject: &str, level: Level) -> Result<&[Topic], PlannerError> {
        let subject = subject.trim();
        let entry = self
            .custom
            .get(subject)
            .or_else(|| self.builtin.get(subject))
            .ok_or_else(|| PlannerError::UnknownSubject(subject.to_string()))?;

        let topics = entry.topics(level);
        if topics.is_empty() {
            return Err(PlannerError::EmptyLevel {
                subject: subject.to_string(),
                level,
            });
        }
        Ok(topics)
    }

    /// Parse and register a user subject, replacing any earlier definition.
    pub fn define<I, S>(&mut self, subject: &str, level_texts: I) -> Result<&CatalogEntry, PlannerError>
    where
        I: IntoIterator<Item = (Level, S)>,
        S: AsRef<str>,
    {
        let subject = subject.trim();
        if subject.is_empty() {
            return Err(PlannerError::MissingSubjectName);
        }

        let mut levels: BTreeMap<Level, Vec<Topic>> =
            Level::ALL.iter().map(|level| (*level, Vec::new())).collect();
        for (level, raw) in level_texts {
            levels.insert(level, parse_topic_lines(raw.as_ref()));
        }

        if levels.values().all(Vec::is_empty) {
            return Err(PlannerError::NoTopicsProvided(subject.to_string()));
        }

        tracing::info!(
            subject = %subject,
            beginner = levels[&Level::Beginner].len(),
            intermediate = levels[&Level::Intermediate].len(),
            advanced = levels[&Level::Advanced].len(),
            "Defined custom subject"
        );

        let entry = CatalogEntry { subject: subject.to_string(), levels };
        self.custom.insert(subject.to_string(), entry);
        Ok(&self.custom[subject])
    }

    /// All subject names visible to lookup, sorted and deduplicated.
    pub fn subjects(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .builtin
            .keys()
            .chain(self.custom.keys())
            .cloned()
            .collect();
        names.sort();
        names.dedup();
        names
    }

    pub fn is_custom(&self, subject: &str) -> bool {
        self.custom.contains_key(subject)
    }

    /// Snapshot of the user registry in its stored shape.
    pub fn custom_subjects(&self) -> CustomSubjects {
        self.custom
            .iter()
            .map(|(subject, entry)| (subject.clone(), LevelTopics::from(entry)))
            .collect()
    }
}

impl Default for TopicCatalog {
    fn default() -> Self {
        Self::new()
    }
}
