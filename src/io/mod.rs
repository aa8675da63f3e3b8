//! Input/output helpers.
//!
//! - sampled-curve exports (CSV/JSON) (`export`)

pub mod export;

pub use export::*;
