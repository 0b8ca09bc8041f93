// LogWeave - core/strategy.rs
//
// The per-message pipeline: copy context -> mutate -> filter -> deliver.
//
// `Stages` holds the mutator and filter lists; `Strategy` is the trait every
// delivery target implements. Implementors provide `stages()` and override
// `deliver`; `log` and the registration methods are provided.

use crate::core::context::Context;
use crate::core::filter::{self, Filter};
use crate::core::mutator::{self, Mutator};
use crate::core::registry::Registry;
use crate::util::constants;
use crate::util::error::{LogError, Result};
use std::sync::Arc;

/// Ordered mutator and filter lists of one strategy.
///
/// Members are held by shared reference; the same mutator or filter may be
/// registered on any number of strategies.
#[derive(Debug, Default)]
pub struct Stages {
    mutators: Registry<dyn Mutator>,
    filters: Registry<dyn Filter>,
}

impl Stages {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run the pre-delivery part of the pipeline.
    ///
    /// Copies `context`, folds `text` through the mutators, then consults
    /// the filters. Returns the mutated text and the local context when the
    /// message should be delivered, or `None` when a filter suppressed it.
    ///
    /// Both lists are snapshotted before any mutator runs: registration
    /// changes made meanwhile (by another thread, or by a mutator or filter
    /// of this very call) apply from the next call on. No lock is held while
    /// mutators and filters run.
    pub fn prepare(
        &self,
        strategy: &str,
        text: &str,
        context: Option<&Context>,
    ) -> Option<(String, Context)> {
        let mutators = self.mutators.snapshot();
        let filters = self.filters.snapshot();
        let mut local = context.cloned().unwrap_or_default();

        let mutated = mutator::apply_all(&mutators, text, &mut local);

        if let Some(position) = filter::first_suppressing(&filters, &mutated, &local) {
            tracing::trace!(strategy, filter = position, "Message suppressed");
            return None;
        }
        Some((mutated, local))
    }

    pub fn add_mutator(&self, mutator: Arc<dyn Mutator>) -> bool {
        self.mutators.add(mutator)
    }

    pub fn remove_mutator(&self, mutator: &Arc<dyn Mutator>) -> bool {
        self.mutators.remove(mutator)
    }

    pub fn mutators(&self) -> Vec<Arc<dyn Mutator>> {
        self.mutators.snapshot()
    }

    pub fn clear_mutators(&self) {
        self.mutators.clear();
    }

    pub fn add_filter(&self, filter: Arc<dyn Filter>) -> bool {
        self.filters.add(filter)
    }

    pub fn remove_filter(&self, filter: &Arc<dyn Filter>) -> bool {
        self.filters.remove(filter)
    }

    pub fn filters(&self) -> Vec<Arc<dyn Filter>> {
        self.filters.snapshot()
    }

    pub fn clear_filters(&self) {
        self.filters.clear();
    }
}

/// One complete mutate -> filter -> deliver logging pipeline.
///
/// Strategies can be used on their own or grouped under a
/// [`Logger`](crate::core::logger::Logger).
pub trait Strategy: Send + Sync {
    /// The strategy's mutator and filter lists.
    fn stages(&self) -> &Stages;

    /// Name used in diagnostics and errors.
    fn name(&self) -> &str {
        constants::DEFAULT_STRATEGY_NAME
    }

    /// Write an already mutated, unsuppressed message somewhere.
    ///
    /// Called exactly once per `log` call that was not suppressed. Strategies
    /// that do not override it report `LogError::NotImplemented`.
    fn deliver(&self, _text: &str, _context: &Context) -> Result<()> {
        Err(LogError::NotImplemented {
            capability: "deliver",
            strategy: self.name().to_string(),
        })
    }

    /// Log `text`, applying this strategy's mutators and filters.
    ///
    /// Returns `Ok(true)` if the message reached `deliver`, `Ok(false)` if a
    /// filter suppressed it. Errors raised by `deliver` are returned as-is.
    fn log(&self, text: &str, context: Option<&Context>) -> Result<bool> {
        let Some((message, local)) = self.stages().prepare(self.name(), text, context) else {
            return Ok(false);
        };
        self.deliver(&message, &local)?;
        tracing::trace!(strategy = self.name(), "Message delivered");
        Ok(true)
    }

    /// Append a mutator. Returns false if it is already registered.
    fn add_mutator(&self, mutator: Arc<dyn Mutator>) -> bool {
        let added = self.stages().add_mutator(mutator);
        tracing::debug!(strategy = self.name(), added, "add_mutator");
        added
    }

    /// Returns whether the mutator was registered (and is now gone).
    fn remove_mutator(&self, mutator: &Arc<dyn Mutator>) -> bool {
        let removed = self.stages().remove_mutator(mutator);
        tracing::debug!(strategy = self.name(), removed, "remove_mutator");
        removed
    }

    fn mutators(&self) -> Vec<Arc<dyn Mutator>> {
        self.stages().mutators()
    }

    fn clear_mutators(&self) {
        self.stages().clear_mutators();
        tracing::debug!(strategy = self.name(), "clear_mutators");
    }

    /// Append a filter. Returns false if it is already registered.
    fn add_filter(&self, filter: Arc<dyn Filter>) -> bool {
        let added = self.stages().add_filter(filter);
        tracing::debug!(strategy = self.name(), added, "add_filter");
        added
    }

    fn remove_filter(&self, filter: &Arc<dyn Filter>) -> bool {
        let removed = self.stages().remove_filter(filter);
        tracing::debug!(strategy = self.name(), removed, "remove_filter");
        removed
    }

    fn filters(&self) -> Vec<Arc<dyn Filter>> {
        self.stages().filters()
    }

    fn clear_filters(&self) {
        self.stages().clear_filters();
        tracing::debug!(strategy = self.name(), "clear_filters");
    }
}

/// A strategy that only carries mutators and filters.
///
/// It has no delivery target, so any message that survives its filters ends
/// in `LogError::NotImplemented`. Useful as a placeholder while wiring a
/// pipeline, and as the reference for what the trait provides by default.
#[derive(Debug, Default)]
pub struct BareStrategy {
    stages: Stages,
}

impl BareStrategy {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Strategy for BareStrategy {
    fn stages(&self) -> &Stages {
        &self.stages
    }
}
