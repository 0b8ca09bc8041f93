// LogWeave - util/mod.rs
//
// Utility modules: error types, named constants, diagnostics setup.
// No dependencies on core, plugins, or app layers.

pub mod constants;
pub mod error;
pub mod logging;
