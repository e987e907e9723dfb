//! Logging setup for services embedding the review workflow
//!
//! Development gets pretty, verbose output; production gets flattened JSON events.
//! `RUST_LOG` overrides the default level of either.

use tracing_subscriber::{
    EnvFilter, Layer,
    layer::SubscriberExt,
    util::{SubscriberInitExt, TryInitError},
};

use crate::config::{Environment, ReviewConfig};

/// Install the global subscriber for `config.environment`.
///
/// Fails if a global subscriber is already installed, leaving that one in place.
pub fn init_tracing(config: &ReviewConfig) -> Result<(), TryInitError> {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let env_filter = env_filter(config.environment, rust_log.as_deref());

    let registry = tracing_subscriber::registry();
    let result = if config.environment.is_development() {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_line_number(true)
                    .with_file(true)
                    .pretty()
                    .with_filter(env_filter),
            )
            .try_init()
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_current_span(true)
                    .flatten_event(true)
                    .with_target(true)
                    .with_filter(env_filter),
            )
            .try_init()
    };
    result?;

    tracing::info!(
        environment = ?config.environment,
        due_batch_limit = config.due_batch_limit,
        "Tracing initialized"
    );
    Ok(())
}

const fn default_directives(environment: Environment) -> &'static str {
    match environment {
        Environment::Development => "debug",
        Environment::Production => "info",
    }
}

/// Filter from `RUST_LOG` if it parses, else the environment's default level.
fn env_filter(environment: Environment, rust_log: Option<&str>) -> EnvFilter {
    rust_log
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(default_directives(environment)))
}
