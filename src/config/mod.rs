pub mod paths;
pub mod planner;

pub use planner::{get_planner_config, planner_config_error, PlannerConfig, RebalancePolicy};
