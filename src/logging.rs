use crate::config::PlannerConfig;

/// Initialize structured logging with tracing.
/// `RUST_LOG` wins over the configured level. Safe to call more than once.
pub fn init_logging(config: &PlannerConfig) {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let result = if config.log_json {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_file(true)
                    .with_line_number(true)
                    .json()
            )
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(true))
            .try_init()
    };

    match result {
        Ok(()) => tracing::info!(json = config.log_json, "Structured logging initialized"),
        Err(e) => tracing::debug!(error = %e, "Logging already initialized"),
    }
}
