// LogWeave - util/error.rs
//
// Typed error hierarchy with context-preserving error chains.
// Registration outcomes (duplicate add, absent remove) are NOT errors:
// they are reported through boolean returns by the registries.

use std::fmt;

/// Top-level error type for all LogWeave operations.
#[derive(Debug)]
pub enum LogError {
    /// A capability primitive was invoked without a concrete override.
    /// Signals a programming defect; never retried by the pipeline.
    NotImplemented {
        capability: &'static str,
        strategy: String,
    },

    /// A concrete delivery sink failed.
    Sink(SinkError),

    /// A stock filter was given a pattern that cannot be compiled.
    InvalidPattern {
        pattern: String,
        source: regex::Error,
    },

    /// A stock filter pattern exceeds the maximum allowed length.
    PatternTooLong { length: usize, max_length: usize },

    /// Logger options could not be parsed or validated.
    Config(ConfigError),
}

impl fmt::Display for LogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotImplemented {
                capability,
                strategy,
            } => write!(
                f,
                "Strategy '{strategy}' does not implement '{capability}'"
            ),
            Self::Sink(e) => write!(f, "Sink error: {e}"),
            Self::InvalidPattern { pattern, source } => {
                write!(f, "Invalid filter pattern '{pattern}': {source}")
            }
            Self::PatternTooLong { length, max_length } => write!(
                f,
                "Filter pattern is {length} chars, exceeds maximum of {max_length}"
            ),
            Self::Config(e) => write!(f, "Configuration error: {e}"),
        }
    }
}

impl std::error::Error for LogError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Sink(e) => Some(e),
            Self::InvalidPattern { source, .. } => Some(source),
            Self::Config(e) => Some(e),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Sink errors
// ---------------------------------------------------------------------------

/// Failure raised by a concrete delivery sink.
///
/// The pipeline never inspects or recovers from these; they are carried out
/// of `log` unchanged so the sink's owner can decide what to do.
#[derive(Debug)]
pub struct SinkError {
    /// Name of the strategy whose delivery failed.
    pub sink: String,
    pub source: Box<dyn std::error::Error + Send + Sync + 'static>,
}

impl SinkError {
    pub fn new(
        sink: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync + 'static>>,
    ) -> Self {
        Self {
            sink: sink.into(),
            source: source.into(),
        }
    }
}

impl fmt::Display for SinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "delivery through '{}' failed: {}", self.sink, self.source)
    }
}

impl std::error::Error for SinkError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(self.source.as_ref())
    }
}

impl From<SinkError> for LogError {
    fn from(e: SinkError) -> Self {
        Self::Sink(e)
    }
}

// ---------------------------------------------------------------------------
// Config errors
// ---------------------------------------------------------------------------

/// Errors related to logger options.
#[derive(Debug)]
pub enum ConfigError {
    /// TOML parsing failed.
    TomlParse { source: toml::de::Error },

    /// A value is not one of the accepted names.
    UnknownValue {
        field: &'static str,
        value: String,
        expected: &'static str,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TomlParse { source } => write!(f, "Options parse error: {source}"),
            Self::UnknownValue {
                field,
                value,
                expected,
            } => write!(
                f,
                "Option '{field}' = '{value}' is not recognised. Expected: {expected}"
            ),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::TomlParse { source } => Some(source),
            _ => None,
        }
    }
}

impl From<ConfigError> for LogError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

/// Convenience type alias for LogWeave results.
pub type Result<T> = std::result::Result<T, LogError>;
