//! Evaluable cross-section fits.
//!
//! [`curve`] defines the shared contract (validity domain, provenance
//! description, energy grid, lazy evaluation cache); [`chebyshev`] and
//! [`tabata`] supply the two published fit families behind it.

pub mod chebyshev;
pub mod curve;
pub mod tabata;

pub use chebyshev::BarnettChebFit;
pub use curve::{CrossSectionFit, EnergyGrid, FitCore, GridSpec, DEFAULT_GRID_POINTS};
pub use tabata::{TabataFit, TabataForm};
