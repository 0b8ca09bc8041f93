// LogWeave - core/mod.rs
//
// Core pipeline layer: capability traits, the strategy pipeline, the logger.
// Must NOT depend on: plugins or app.

pub mod context;
pub mod filter;
pub mod logger;
pub mod mutator;
pub mod registry;
pub mod strategy;
