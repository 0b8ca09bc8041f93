// LogWeave - plugins/filters.rs
//
// Stock filters. Each one answers "drop this message?"; combine several on a
// strategy to drop a message when any of them says yes.

use crate::core::context::Context;
use crate::core::filter::Filter;
use crate::util::constants;
use crate::util::error::{LogError, Result};
use regex::Regex;

/// Filter backed by a closure.
pub struct FnFilter<F> {
    f: F,
}

impl<F> FnFilter<F>
where
    F: Fn(&str, &Context) -> bool + Send + Sync,
{
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F> Filter for FnFilter<F>
where
    F: Fn(&str, &Context) -> bool + Send + Sync,
{
    fn should_suppress(&self, text: &str, context: &Context) -> bool {
        (self.f)(text, context)
    }
}

/// Suppresses messages equal to one exact text.
#[derive(Debug, Clone)]
pub struct ExactMatchFilter {
    text: String,
}

impl ExactMatchFilter {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl Filter for ExactMatchFilter {
    fn should_suppress(&self, text: &str, _context: &Context) -> bool {
        text == self.text
    }
}

/// Suppresses messages matching a regular expression.
///
/// With [`RegexFilter::keep_matching`] the sense is inverted: only matching
/// messages pass.
#[derive(Debug, Clone)]
pub struct RegexFilter {
    regex: Regex,
    invert: bool,
}

impl RegexFilter {
    /// Drop messages that match `pattern`.
    pub fn new(pattern: &str) -> Result<Self> {
        Ok(Self {
            regex: compile(pattern)?,
            invert: false,
        })
    }

    /// Drop messages that do NOT match `pattern`.
    pub fn keep_matching(pattern: &str) -> Result<Self> {
        Ok(Self {
            regex: compile(pattern)?,
            invert: true,
        })
    }

    pub fn pattern(&self) -> &str {
        self.regex.as_str()
    }
}

fn compile(pattern: &str) -> Result<Regex> {
    if pattern.len() > constants::MAX_REGEX_PATTERN_LEN {
        return Err(LogError::PatternTooLong {
            length: pattern.len(),
            max_length: constants::MAX_REGEX_PATTERN_LEN,
        });
    }
    Regex::new(pattern).map_err(|e| LogError::InvalidPattern {
        pattern: pattern.to_string(),
        source: e,
    })
}

impl Filter for RegexFilter {
    fn should_suppress(&self, text: &str, _context: &Context) -> bool {
        self.regex.is_match(text) != self.invert
    }
}

/// Suppresses messages whose context sets `key` to `true`.
///
/// Lets a caller (or an earlier mutator) mark a message as "do not write"
/// for a particular strategy, e.g. `{"no_console": true}`. A missing key or
/// any non-boolean value lets the message through.
#[derive(Debug, Clone)]
pub struct ContextFlagFilter {
    key: String,
}

impl ContextFlagFilter {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }
}

impl Filter for ContextFlagFilter {
    fn should_suppress(&self, _text: &str, context: &Context) -> bool {
        context
            .get(&self.key)
            .and_then(|v| v.as_bool())
            .unwrap_or(false)
    }
}

/// Suppresses empty or whitespace-only messages.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyMessageFilter;

impl EmptyMessageFilter {
    pub fn new() -> Self {
        Self
    }
}

impl Filter for EmptyMessageFilter {
    fn should_suppress(&self, text: &str, _context: &Context) -> bool {
        text.trim().is_empty()
    }
}
