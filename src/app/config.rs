// LogWeave - app/config.rs
//
// Logger options: parsing and validation of a TOML description supplied by
// the host. Reading the file (if any) is the host's job; this module only
// turns text into validated options and builds the logger from them.
//
// Example:
//
//   name = "app"
//   fan_out = "pipeline"        # or "deliver_only"
//
//   [diagnostics]
//   level = "debug"             # error | warn | info | debug | trace

use crate::core::logger::{FanOut, Logger};
use crate::util::constants;
use crate::util::error::{ConfigError, Result};

/// Raw deserialisable shape of the options.
///
/// Unknown keys are silently ignored for forward compatibility.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct RawOptions {
    /// Logger name used in diagnostics.
    pub name: Option<String>,
    /// "pipeline" or "deliver_only".
    pub fan_out: Option<String>,
    /// `[diagnostics]` section.
    pub diagnostics: DiagnosticsSection,
}

/// `[diagnostics]` options section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct DiagnosticsSection {
    /// Level for LogWeave's own tracing output.
    pub level: Option<String>,
}

/// Validated logger options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggerOptions {
    pub name: String,
    pub fan_out: FanOut,
    /// `None` keeps the default priority chain of `util::logging::init`.
    pub diagnostics_level: Option<String>,
}

impl Default for LoggerOptions {
    fn default() -> Self {
        Self {
            name: constants::DEFAULT_LOGGER_NAME.to_string(),
            fan_out: FanOut::default(),
            diagnostics_level: None,
        }
    }
}

impl LoggerOptions {
    /// Parse and validate options from TOML text.
    ///
    /// Unparseable TOML is a `LogError::Config` wrapping
    /// `ConfigError::TomlParse`. Individual invalid values are not errors: they
    /// fall back to their defaults and are reported in the returned warning
    /// list so the host can surface them.
    pub fn from_toml_str(content: &str) -> Result<(Self, Vec<String>)> {
        let raw: RawOptions =
            toml::from_str(content).map_err(|e| ConfigError::TomlParse { source: e })?;
        Ok(Self::from_raw(raw))
    }

    /// Validate already deserialised options.
    pub fn from_raw(raw: RawOptions) -> (Self, Vec<String>) {
        let mut options = Self::default();
        let mut warnings: Vec<String> = Vec::new();

        // -- name --
        if let Some(name) = raw.name {
            let trimmed = name.trim();
            if trimmed.is_empty() {
                warnings.push(format!(
                    "name is empty. Using default (\"{}\").",
                    constants::DEFAULT_LOGGER_NAME
                ));
            } else {
                options.name = trimmed.to_string();
            }
        }

        // -- fan_out --
        if let Some(ref value) = raw.fan_out {
            match value.parse::<FanOut>() {
                Ok(fan_out) => options.fan_out = fan_out,
                Err(e) => warnings.push(format!("{e}. Using default ({}).", FanOut::default())),
            }
        }

        // -- diagnostics: level --
        if let Some(ref level) = raw.diagnostics.level {
            let lower = level.to_lowercase();
            if constants::VALID_LOG_LEVELS.contains(&lower.as_str()) {
                options.diagnostics_level = Some(lower);
            } else {
                warnings.push(format!(
                    "[diagnostics] level = \"{level}\" is not recognised. \
                     Valid values: {}. Using default ({}).",
                    constants::VALID_LOG_LEVELS.join(", "),
                    constants::DEFAULT_LOG_LEVEL,
                ));
            }
        }

        if !warnings.is_empty() {
            tracing::warn!(
                count = warnings.len(),
                "Logger options validation produced warnings"
            );
        }

        (options, warnings)
    }

    /// An empty logger configured from these options.
    pub fn build_logger(&self) -> Logger {
        tracing::debug!(name = %self.name, fan_out = %self.fan_out, "Building logger");
        Logger::named(self.name.clone()).with_fan_out(self.fan_out)
    }

    /// Install LogWeave's diagnostics subscriber using these options.
    /// See [`crate::util::logging::init`].
    pub fn init_diagnostics(&self, debug_flag: bool) -> bool {
        crate::util::logging::init(debug_flag, self.diagnostics_level.as_deref())
    }
}
