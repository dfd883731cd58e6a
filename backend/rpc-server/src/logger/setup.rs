//! Console logger setup.

use tracing_subscriber::EnvFilter;

use super::config::Log;

/// Install the global tracing subscriber from the log config.
///
/// Safe to call more than once; later calls are no-ops (useful in
/// tests, where several cases may race to initialize).
pub fn setup(config: &Log) {
    if !config.console.enabled {
        return;
    }

    let filter = match &config.console.filtering_directive {
        Some(directive) => EnvFilter::new(directive),
        None => EnvFilter::new(config.console.level.into_level().to_string()),
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init();
}
