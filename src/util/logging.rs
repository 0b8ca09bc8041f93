// LogWeave - util/logging.rs
//
// Diagnostics for the pipeline itself (not the messages it carries).
// Hosts with their own subscriber see these events there; others call `init`.
//
// Event levels:
//   - trace: per message; "Message suppressed" (strategy, filter index),
//            "Message delivered", "Message forwarded" (children, accepted)
//   - debug: registration changes (add/remove/clear of mutators, filters,
//            child strategies), "Building logger"
//   - warn:  options that fell back to defaults, a logger offered itself
//
// Filter priority: RUST_LOG > host debug flag > [diagnostics] level > "info".

use tracing_subscriber::EnvFilter;

/// Initialise a stderr `tracing` subscriber for LogWeave diagnostics.
///
/// Returns false if a global subscriber was already installed (the existing
/// one is kept).
pub fn init(debug_flag: bool, config_level: Option<&str>) -> bool {
    let filter = build_filter(debug_flag, config_level);

    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(true)
        .compact()
        .try_init()
        .is_ok();

    if installed {
        tracing::debug!(
            crate_name = super::constants::APP_NAME,
            version = super::constants::APP_VERSION,
            debug_flag,
            ?config_level,
            "Diagnostics subscriber installed"
        );
    }
    installed
}

fn build_filter(debug_flag: bool, config_level: Option<&str>) -> EnvFilter {
    if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if debug_flag {
        EnvFilter::new("debug")
    } else if let Some(level) = config_level {
        EnvFilter::new(level)
    } else {
        EnvFilter::new(super::constants::DEFAULT_LOG_LEVEL)
    }
}
