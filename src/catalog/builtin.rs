use std::collections::BTreeMap;
use super::{CatalogEntry, Level, Topic};

const SYLLABUS: &[(&str, [&[&str]; 3])] = &[
    ("DSA", [
        &["Arrays Basics", "Time Complexity", "Simple Problems"],
        &["Sliding Window", "Binary Search", "Recursion"],
        &["Dynamic Programming", "Graphs", "Optimization Techniques"],
    ]),
    ("ML", [
        &["What is ML?", "Supervised Learning", "Linear Regression"],
        &["Feature Engineering", "Classification Models", "Model Evaluation"],
        &["Ensemble Methods", "Hyperparameter Tuning", "Model Deployment Basics"],
    ]),
    ("Python", [
        &["Syntax & Variables", "Loops & Conditions", "Functions"],
        &["OOP Concepts", "File Handling", "Modules & Packages"],
        &["Decorators", "Generators", "Performance Optimization"],
    ]),
    ("AI", [
        &["AI Overview", "Search Algorithms", "Knowledge Representation"],
        &["Neural Networks", "Backpropagation", "Activation Functions"],
        &["Deep Architectures", "Transformers Intro", "Ethics in AI"],
    ]),
];

/// The immutable subjects shipped with the planner.
pub fn builtin_entries() -> BTreeMap<String, CatalogEntry> {
    SYLLABUS
        .iter()
        .map(|(subject, per_level)| {
            let levels = Level::ALL
                .iter()
                .zip(per_level.iter())
                .map(|(level, names)| (*level, names.iter().map(|n| Topic::new(*n)).collect()))
                .collect();
            (subject.to_string(), CatalogEntry { subject: subject.to_string(), levels })
        })
        .collect()
}
