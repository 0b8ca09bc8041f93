// LogWeave - plugins/mod.rs
//
// Stock mutators, filters, and a closure-backed strategy.
// Depends on core and util only. No delivery backends live here.

pub mod filters;
pub mod mutators;
pub mod strategies;
