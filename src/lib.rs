pub mod adaptive;
pub mod analytics;
pub mod catalog;
pub mod config;
pub mod error;
pub mod history;
pub mod logging;
pub mod metrics;
pub mod plan;
pub mod routes;
pub mod state;
mod storage;
pub mod sync;

#[cfg(test)]
#[path = "../tests/error_handling_test.rs"]
mod error_handling_test;

pub use adaptive::{classify, rebalance, Status, Tier};
pub use catalog::{Level, Topic, TopicCatalog};
pub use config::PlannerConfig;
pub use error::{PersistenceError, PlannerError};
pub use plan::{allocate, toggle, Plan, PlanDay, TopicAssignment};
pub use state::app::AppState;

/// Start a planning session for `user`: logging, config, custom subjects, sync worker.
/// Must be called from within a tokio runtime.
pub async fn start_session(user: &str) -> AppState {
    let config = config::get_planner_config().clone();
    logging::init_logging(&config);
    if let Some(e) = config::planner_config_error() {
        tracing::warn!(error = %e, "Failed to parse planner.toml, using defaults");
    }
    tracing::info!(user = %user, "Study planner starting");
    AppState::start(user, config).await
}
