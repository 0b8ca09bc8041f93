// LogWeave - core/logger.rs
//
// Logger: a strategy whose delivery fans out to child strategies.
//
// The logger's own mutators/filters run once, before forwarding; each child
// then runs its own pipeline on the logger's output. Pre-processing shared by
// every target goes on the logger, target-specific shaping on the children.

use crate::core::context::Context;
use crate::core::registry::{self, Registry};
use crate::core::strategy::{Stages, Strategy};
use crate::util::constants;
use crate::util::error::{ConfigError, Result};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// What a logger invokes on each child when it fans a message out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FanOut {
    /// Run the child's full `log`: its mutators and filters apply on top of
    /// the logger's.
    #[default]
    Pipeline,

    /// Call the child's `deliver` directly, bypassing its mutators and
    /// filters. Every child then receives exactly the logger's output.
    DeliverOnly,
}

impl FanOut {
    pub fn as_str(&self) -> &'static str {
        match self {
            FanOut::Pipeline => constants::FAN_OUT_PIPELINE,
            FanOut::DeliverOnly => constants::FAN_OUT_DELIVER_ONLY,
        }
    }
}

impl fmt::Display for FanOut {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FanOut {
    type Err = ConfigError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            constants::FAN_OUT_PIPELINE => Ok(FanOut::Pipeline),
            constants::FAN_OUT_DELIVER_ONLY => Ok(FanOut::DeliverOnly),
            _ => Err(ConfigError::UnknownValue {
                field: "fan_out",
                value: s.to_string(),
                expected: constants::FAN_OUT_EXPECTED,
            }),
        }
    }
}

/// Nucleates several strategies so they can be used from one place.
///
/// A `Logger` is itself a [`Strategy`], so it can be nested under another
/// logger. A logger without children accepts every unsuppressed message and
/// writes it nowhere: `log` returning `true` only means no filter of the
/// logger suppressed it.
#[derive(Debug)]
pub struct Logger {
    name: String,
    stages: Stages,
    strategies: Registry<dyn Strategy>,
    fan_out: FanOut,
}

impl Logger {
    /// An empty logger with the default name and fan-out.
    pub fn new() -> Self {
        Self::named(constants::DEFAULT_LOGGER_NAME)
    }

    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            stages: Stages::new(),
            strategies: Registry::new(),
            fan_out: FanOut::default(),
        }
    }

    /// A logger holding the given strategies, in order.
    ///
    /// `None` and an empty collection both give an empty logger. A strategy
    /// listed twice is kept once, at its first position.
    pub fn with_strategies<I>(strategies: I) -> Self
    where
        I: IntoIterator<Item = Arc<dyn Strategy>>,
    {
        let logger = Self::new();
        for strategy in strategies {
            logger.add_strategy(strategy);
        }
        logger
    }

    /// Select what is invoked on each child.
    pub fn with_fan_out(mut self, fan_out: FanOut) -> Self {
        self.fan_out = fan_out;
        self
    }

    pub fn fan_out(&self) -> FanOut {
        self.fan_out
    }

    /// Add a child strategy. Returns false if it is already a child (by
    /// identity) or if it is this logger itself.
    pub fn add_strategy(&self, strategy: Arc<dyn Strategy>) -> bool {
        if registry::identity(&strategy) == self as *const Self as usize {
            tracing::warn!(logger = %self.name, "Refusing to add a logger to itself");
            return false;
        }
        let added = self.strategies.add(strategy);
        tracing::debug!(
            logger = %self.name,
            added,
            children = self.strategies.len(),
            "add_strategy"
        );
        added
    }

    /// Child strategies in the order they will receive messages.
    pub fn strategies(&self) -> Vec<Arc<dyn Strategy>> {
        self.strategies.snapshot()
    }

    /// Log `text` and report how many children accepted it.
    ///
    /// Returns 0 when one of the logger's own filters suppressed the message
    /// (and also when every child suppressed it, or there are no children).
    pub fn broadcast(&self, text: &str, context: Option<&Context>) -> Result<usize> {
        match self.stages.prepare(&self.name, text, context) {
            Some((message, local)) => self.forward(&message, &local),
            None => Ok(0),
        }
    }

    /// Hand an already prepared message to every child, in insertion order.
    ///
    /// A child's suppression does not stop its siblings. A child's error
    /// does: it is returned immediately and later children are skipped.
    fn forward(&self, text: &str, context: &Context) -> Result<usize> {
        let children = self.strategies.snapshot();
        let mut accepted = 0;
        for child in &children {
            let delivered = match self.fan_out {
                FanOut::Pipeline => child.log(text, Some(context))?,
                FanOut::DeliverOnly => {
                    child.deliver(text, context)?;
                    true
                }
            };
            if delivered {
                accepted += 1;
            }
        }
        tracing::trace!(
            logger = %self.name,
            children = children.len(),
            accepted,
            fan_out = %self.fan_out,
            "Message forwarded"
        );
        Ok(accepted)
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl Strategy for Logger {
    fn stages(&self) -> &Stages {
        &self.stages
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn deliver(&self, text: &str, context: &Context) -> Result<()> {
        self.forward(text, context).map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::filter::Filter;
    use crate::core::mutator::Mutator;
    use crate::core::strategy::BareStrategy;
    use crate::util::error::LogError;
    use parking_lot::Mutex;

    #[derive(Default)]
    struct Recorder {
        stages: Stages,
        delivered: Mutex<Vec<String>>,
    }

    impl Recorder {
        fn texts(&self) -> Vec<String> {
            self.delivered.lock().clone()
        }
    }

    impl Strategy for Recorder {
        fn stages(&self) -> &Stages {
            &self.stages
        }

        fn deliver(&self, text: &str, _context: &Context) -> Result<()> {
            self.delivered.lock().push(text.to_string());
            Ok(())
        }
    }

    struct Prefix(&'static str);

    impl Mutator for Prefix {
        fn mutate(&self, text: &str, _context: &mut Context) -> String {
            format!("{}{text}", self.0)
        }
    }

    struct Always;

    impl Filter for Always {
        fn should_suppress(&self, _text: &str, _context: &Context) -> bool {
            true
        }
    }

    fn recorder_with_prefix(prefix: &'static str) -> Arc<Recorder> {
        let r = Arc::new(Recorder::default());
        r.add_mutator(Arc::new(Prefix(prefix)));
        r
    }

    #[test]
    fn test_logger_init_strategies() {
        assert!(Logger::new().strategies().is_empty());
        assert!(Logger::with_strategies(None).strategies().is_empty());
        assert!(Logger::with_strategies(Vec::new()).strategies().is_empty());

        let s1: Arc<dyn Strategy> = Arc::new(BareStrategy::new());
        let s2: Arc<dyn Strategy> = Arc::new(BareStrategy::new());
        let logger = Logger::with_strategies(vec![s1.clone(), s2.clone()]);
        let children = logger.strategies();
        assert_eq!(children.len(), 2);
        assert!(Arc::ptr_eq(&children[0], &s1));
        assert!(Arc::ptr_eq(&children[1], &s2));
    }

    #[test]
    fn test_with_strategies_drops_duplicates() {
        let s1: Arc<dyn Strategy> = Arc::new(BareStrategy::new());
        let logger = Logger::with_strategies(vec![s1.clone(), s1.clone()]);
        assert_eq!(logger.strategies().len(), 1);
    }

    #[test]
    fn test_logger_add_strategy() {
        let logger = Logger::new();
        let s1: Arc<dyn Strategy> = Arc::new(BareStrategy::new());
        assert!(logger.add_strategy(s1.clone()));
        assert!(!logger.add_strategy(s1.clone()));
        assert_eq!(logger.strategies().len(), 1);

        let s2: Arc<dyn Strategy> = Arc::new(BareStrategy::new());
        assert!(logger.add_strategy(s2.clone()));
        let children = logger.strategies();
        assert_eq!(children.len(), 2);
        assert!(Arc::ptr_eq(&children[1], &s2));
    }

    #[test]
    fn test_logger_refuses_itself() {
        let logger = Arc::new(Logger::new());
        let as_strategy: Arc<dyn Strategy> = logger.clone();
        assert!(!logger.add_strategy(as_strategy));
        assert!(logger.strategies().is_empty());
    }

    #[test]
    fn test_fan_out_applies_child_mutators() {
        let a = recorder_with_prefix("A:");
        let b = recorder_with_prefix("B:");
        let logger = Logger::new();
        logger.add_strategy(a.clone());
        logger.add_strategy(b.clone());

        assert!(logger.log("hello", None).unwrap());
        assert_eq!(a.texts(), vec!["A:hello"]);
        assert_eq!(b.texts(), vec!["B:hello"]);
    }

    #[test]
    fn test_logger_mutators_run_before_children() {
        let a = recorder_with_prefix("A:");
        let logger = Logger::new();
        logger.add_mutator(Arc::new(Prefix("[app] ")));
        logger.add_strategy(a.clone());

        logger.log("hello", None).unwrap();
        assert_eq!(a.texts(), vec!["A:[app] hello"]);
    }

    #[test]
    fn test_child_suppression_does_not_stop_siblings() {
        let a = Arc::new(Recorder::default());
        a.add_filter(Arc::new(Always));
        let b = Arc::new(Recorder::default());
        let logger = Logger::with_strategies(vec![
            a.clone() as Arc<dyn Strategy>,
            b.clone() as Arc<dyn Strategy>,
        ]);

        assert!(logger.log("msg", None).unwrap());
        assert!(a.texts().is_empty());
        assert_eq!(b.texts(), vec!["msg"]);
        assert_eq!(logger.broadcast("msg", None).unwrap(), 1);
    }

    #[test]
    fn test_logger_filter_suppresses_all_children() {
        let a = Arc::new(Recorder::default());
        let logger = Logger::new();
        logger.add_strategy(a.clone());
        logger.add_filter(Arc::new(Always));

        assert!(!logger.log("msg", None).unwrap());
        assert_eq!(logger.broadcast("msg", None).unwrap(), 0);
        assert!(a.texts().is_empty());
    }

    #[test]
    fn test_logger_without_children_reports_delivered() {
        let logger = Logger::new();
        assert!(logger.log("into the void", None).unwrap());
        assert_eq!(logger.broadcast("into the void", None).unwrap(), 0);
    }

    #[test]
    fn test_deliver_only_bypasses_child_pipeline() {
        let a = recorder_with_prefix("A:");
        a.add_filter(Arc::new(Always));
        let logger = Logger::new().with_fan_out(FanOut::DeliverOnly);
        logger.add_strategy(a.clone());

        assert!(logger.log("raw", None).unwrap());
        assert_eq!(a.texts(), vec!["raw"]);
    }

    #[test]
    fn test_child_error_propagates() {
        let logger = Logger::new();
        let bare: Arc<dyn Strategy> = Arc::new(BareStrategy::new());
        let after = Arc::new(Recorder::default());
        logger.add_strategy(bare);
        logger.add_strategy(after.clone());

        assert!(matches!(
            logger.log("x", None),
            Err(LogError::NotImplemented { .. })
        ));
        assert!(after.texts().is_empty());
    }

    #[test]
    fn test_nested_loggers() {
        let leaf = recorder_with_prefix("leaf:");
        let inner = Arc::new(Logger::named("inner"));
        inner.add_mutator(Arc::new(Prefix("inner:")));
        inner.add_strategy(leaf.clone());

        let outer = Logger::named("outer");
        outer.add_mutator(Arc::new(Prefix("outer:")));
        outer.add_strategy(inner);

        outer.log("m", None).unwrap();
        assert_eq!(leaf.texts(), vec!["leaf:inner:outer:m"]);
    }

    #[test]
    fn test_fan_out_parse() {
        assert_eq!("pipeline".parse::<FanOut>().unwrap(), FanOut::Pipeline);
        assert_eq!("Deliver_Only".parse::<FanOut>().unwrap(), FanOut::DeliverOnly);
        assert!("sideways".parse::<FanOut>().is_err());
        assert_eq!(FanOut::DeliverOnly.to_string(), "deliver_only");
    }
}
