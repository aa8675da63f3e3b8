//! Mathematical utilities: Chebyshev series evaluation and log-spaced grids.

pub mod chebyshev;
pub mod grid;

pub use chebyshev::*;
pub use grid::*;
