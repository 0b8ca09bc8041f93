// LogWeave - util/constants.rs
//
// Single source of truth for named constants and defaults.

// =============================================================================
// Crate metadata
// =============================================================================

/// Display name used in diagnostics.
pub const APP_NAME: &str = "LogWeave";

/// Current crate version.
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// Diagnostics
// =============================================================================

/// Default tracing filter when neither RUST_LOG nor options set one.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Level names accepted in `[diagnostics] level`.
pub const VALID_LOG_LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

// =============================================================================
// Fan-out
// =============================================================================

/// Option value selecting the full child pipeline on fan-out.
pub const FAN_OUT_PIPELINE: &str = "pipeline";

/// Option value selecting bare child delivery on fan-out.
pub const FAN_OUT_DELIVER_ONLY: &str = "deliver_only";

/// Human-readable list of accepted fan-out values (for error messages).
pub const FAN_OUT_EXPECTED: &str = "pipeline, deliver_only";

// =============================================================================
// Stock plug-ins
// =============================================================================

/// chrono format string used by `TimestampMutator::new`.
pub const DEFAULT_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";

/// Context key under which `TimestampMutator` records the stamp it applied.
pub const DEFAULT_TIMESTAMP_KEY: &str = "timestamp";

/// Maximum length of a `RegexFilter` pattern.
/// Guards against pathological patterns from untrusted options.
pub const MAX_REGEX_PATTERN_LEN: usize = 1_024;

/// Strategy name used when none is given.
pub const DEFAULT_STRATEGY_NAME: &str = "strategy";

/// Name given to loggers built without an explicit one.
pub const DEFAULT_LOGGER_NAME: &str = "logger";
