//! Test utilities for the arche crates.
//!
//! - [`data_gen`]: random field values and partitions, driven by the
//!   thread-local `fastrand` generator so tests can seed it.
//! - [`fixtures`]: temporary JSON files for command-line tests.

pub mod data_gen;
pub mod fixtures;
