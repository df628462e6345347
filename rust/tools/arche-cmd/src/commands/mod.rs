//! Command implementations for arche-cmd

pub mod columns;
pub mod describe;
