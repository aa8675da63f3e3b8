//! Formatted terminal output for the reaction tables.

pub mod format;

pub use format::*;
