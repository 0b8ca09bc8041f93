// LogWeave - app/mod.rs
//
// Host-facing assembly: options parsing and logger construction.
// Depends on core and util.

pub mod config;
