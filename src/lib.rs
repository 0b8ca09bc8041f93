// LogWeave - lib.rs
//
// Library entry point. A pluggable logging pipeline: mutators rewrite a
// message, filters may suppress it, a strategy delivers it, and a logger fans
// one call out to several strategies.
//
// Layers (dependencies point downwards only):
//   app      options parsing, logger assembly
//   plugins  stock mutators/filters, closure-backed strategy
//   core     capability traits, strategy pipeline, logger
//   util     errors, constants, diagnostics setup

pub mod app;
pub mod core;
pub mod plugins;
pub mod util;

pub use crate::app::config::LoggerOptions;
pub use crate::core::context::Context;
pub use crate::core::filter::Filter;
pub use crate::core::logger::{FanOut, Logger};
pub use crate::core::mutator::Mutator;
pub use crate::core::strategy::{BareStrategy, Stages, Strategy};
pub use crate::util::error::{LogError, Result, SinkError};
