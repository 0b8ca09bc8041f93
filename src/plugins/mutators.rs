// LogWeave - plugins/mutators.rs
//
// Stock mutators. Thin and interchangeable; hosts are expected to write
// their own for anything domain-specific.

use crate::core::context::{render_value, Context};
use crate::core::mutator::Mutator;
use crate::util::constants;
use chrono::{DateTime, Utc};
use serde_json::Value;
use std::fmt::Write;

/// Mutator backed by a closure.
pub struct FnMutator<F> {
    f: F,
}

impl<F> FnMutator<F>
where
    F: Fn(&str, &mut Context) -> String + Send + Sync,
{
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F> Mutator for FnMutator<F>
where
    F: Fn(&str, &mut Context) -> String + Send + Sync,
{
    fn mutate(&self, text: &str, context: &mut Context) -> String {
        (self.f)(text, context)
    }
}

/// Prepends a fixed tag, e.g. `"[db] "`.
#[derive(Debug, Clone)]
pub struct PrefixMutator {
    prefix: String,
}

impl PrefixMutator {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }
}

impl Mutator for PrefixMutator {
    fn mutate(&self, text: &str, _context: &mut Context) -> String {
        format!("{}{text}", self.prefix)
    }
}

type Clock = Box<dyn Fn() -> DateTime<Utc> + Send + Sync>;

/// Prepends the current UTC time.
///
/// The stamp is also written into the context (under
/// [`DEFAULT_TIMESTAMP_KEY`](constants::DEFAULT_TIMESTAMP_KEY) unless
/// configured otherwise) so filters and delivery see the exact value used.
pub struct TimestampMutator {
    format: String,
    context_key: Option<String>,
    clock: Clock,
}

impl TimestampMutator {
    pub fn new() -> Self {
        Self {
            format: constants::DEFAULT_TIMESTAMP_FORMAT.to_string(),
            context_key: Some(constants::DEFAULT_TIMESTAMP_KEY.to_string()),
            clock: Box::new(Utc::now),
        }
    }

    /// Use a chrono `strftime` format instead of the default.
    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = format.into();
        self
    }

    /// Record the stamp under `key`, or not at all with `None`.
    pub fn with_context_key(mut self, key: Option<String>) -> Self {
        self.context_key = key;
        self
    }

    /// Replace the time source (tests, replay).
    pub fn with_clock<C>(mut self, clock: C) -> Self
    where
        C: Fn() -> DateTime<Utc> + Send + Sync + 'static,
    {
        self.clock = Box::new(clock);
        self
    }
}

impl Default for TimestampMutator {
    fn default() -> Self {
        Self::new()
    }
}

impl Mutator for TimestampMutator {
    fn mutate(&self, text: &str, context: &mut Context) -> String {
        let now = (self.clock)();
        let mut stamp = String::new();
        if write!(stamp, "{}", now.format(&self.format)).is_err() {
            // Malformed strftime string: fall back rather than panic.
            stamp = now.to_rfc3339();
        }
        if let Some(ref key) = self.context_key {
            context.insert(key.clone(), Value::String(stamp.clone()));
        }
        format!("{stamp} {text}")
    }
}

/// Expands `{key}` placeholders with values from the context.
///
/// Placeholders whose key is missing from the context are left as they are,
/// as is an unterminated `{`. Use `{{` to produce a literal `{`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContextMutator;

impl ContextMutator {
    pub fn new() -> Self {
        Self
    }
}

impl Mutator for ContextMutator {
    fn mutate(&self, text: &str, context: &mut Context) -> String {
        expand_placeholders(text, context)
    }
}

fn expand_placeholders(text: &str, context: &Context) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];

        if let Some(stripped) = after.strip_prefix('{') {
            out.push('{');
            rest = stripped;
            continue;
        }

        match after.find('}') {
            Some(close) => {
                let key = &after[..close];
                match context.get(key) {
                    Some(value) => out.push_str(&render_value(value)),
                    None => {
                        out.push('{');
                        out.push_str(key);
                        out.push('}');
                    }
                }
                rest = &after[close + 1..];
            }
            None => {
                out.push_str(&rest[open..]);
                rest = "";
            }
        }
    }
    out.push_str(rest);
    out
}
