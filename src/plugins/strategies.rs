// LogWeave - plugins/strategies.rs
//
// Closure-backed strategy: the host decides where delivered text goes
// (a channel, a buffer, an existing writer) without writing a new type.

use crate::core::context::Context;
use crate::core::strategy::{Stages, Strategy};
use crate::util::error::Result;

/// Strategy whose delivery runs a closure.
pub struct FnStrategy<F> {
    name: String,
    stages: Stages,
    deliver: F,
}

impl<F> FnStrategy<F>
where
    F: Fn(&str, &Context) -> Result<()> + Send + Sync,
{
    pub fn new(name: impl Into<String>, deliver: F) -> Self {
        Self {
            name: name.into(),
            stages: Stages::new(),
            deliver,
        }
    }
}

impl<F> Strategy for FnStrategy<F>
where
    F: Fn(&str, &Context) -> Result<()> + Send + Sync,
{
    fn stages(&self) -> &Stages {
        &self.stages
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn deliver(&self, text: &str, context: &Context) -> Result<()> {
        (self.deliver)(text, context)
    }
}
