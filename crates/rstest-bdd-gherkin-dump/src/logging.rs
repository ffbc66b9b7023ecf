//! Structured logging on stderr.
//!
//! Dumps go to stdout, so diagnostics never share a stream with them. The
//! parser library reports through the `log` facade; installing the subscriber
//! with `try_init` bridges those records into the same output.

use tracing_subscriber::EnvFilter;

use crate::config::DumpConfig;

fn filter_from_config(config: &DumpConfig) -> EnvFilter {
    EnvFilter::new(config.log_level.as_filter_str())
}

/// Initialise the logging subsystem based on configuration.
///
/// Log level precedence (highest to lowest):
///
/// 1. CLI `--log-level`
/// 2. `RSTEST_BDD_GHERKIN_LOG_LEVEL`
/// 3. `warn`
///
/// A subscriber that is already installed wins; later calls do nothing.
pub fn init_logging(config: &DumpConfig) {
    let filter = filter_from_config(config);
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .try_init();
}
