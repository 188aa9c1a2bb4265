//! Log subscriber for the binary

use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter, e.g. `MOODLOG_LOG=debug`
pub const LOG_ENV: &str = "MOODLOG_LOG";

/// Install a stderr `fmt` subscriber. Library code only emits events.
pub fn init() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("off"));

    // A subscriber may already be installed by an embedding process.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
