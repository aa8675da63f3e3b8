//! The evaluable-curve contract shared by all cross-section fits.
//!
//! Every fit owns:
//! - a validity domain `(low, high)` in eV (inclusive, immutable)
//! - a provenance description (reference, notes, accuracy)
//! - the current evaluation grid and a lazily-computed result cache
//!
//! Concrete fits supply one required capability, `fit_function`: a pure map
//! from energies (eV) to cross sections (m²). Everything else — grid
//! management, domain filtering, caching — is provided here.
//!
//! Thread safety: a fit's grid/cache pair is private mutable state, so
//! `evaluate`/`set_grid` take `&mut self`. Sharing one instance across
//! threads requires an external lock; separate instances are independent.

use crate::error::FitError;
use crate::math::log_space;

/// Number of grid points used when no grid is specified.
pub const DEFAULT_GRID_POINTS: usize = 5000;

/// How the caller asked for the evaluation grid to be built.
#[derive(Debug, Clone, PartialEq)]
pub enum GridSpec {
    /// `n` log-spaced energies spanning the domain, endpoints inclusive.
    Count(usize),
    /// A single energy (eV).
    Scalar(f64),
    /// An explicit sequence of energies (eV), filtered to the domain.
    Points(Vec<f64>),
}

impl std::fmt::Display for GridSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GridSpec::Count(n) => write!(f, "{n} log-spaced points"),
            GridSpec::Scalar(e) => write!(f, "{e} eV"),
            GridSpec::Points(v) => write!(f, "{} explicit energies", v.len()),
        }
    }
}

/// The grid actually in effect after domain filtering.
///
/// `NoValidEnergies` is the single sentinel for "the requested grid has no
/// energy inside the domain" — used uniformly whether the request was a
/// scalar or a sequence. Evaluation of this grid yields `None`, never NaN.
#[derive(Debug, Clone, PartialEq)]
pub enum EnergyGrid {
    Points(Vec<f64>),
    NoValidEnergies,
}

impl EnergyGrid {
    /// The grid energies, or `None` for the no-valid-energy sentinel.
    pub fn energies(&self) -> Option<&[f64]> {
        match self {
            EnergyGrid::Points(p) => Some(p),
            EnergyGrid::NoValidEnergies => None,
        }
    }
}

/// Shared state holder for every concrete fit.
#[derive(Debug, Clone)]
pub struct FitCore {
    domain: (f64, f64),
    description: String,
    grid: EnergyGrid,
    /// The unfiltered grid request, retained for diagnostics.
    grid_input: GridSpec,
    cache: Option<Vec<f64>>,
}

impl FitCore {
    /// Build a core with the default log-spaced grid.
    pub fn new(domain: (f64, f64), description: impl Into<String>) -> Result<Self, FitError> {
        Self::with_grid(domain, description, GridSpec::Count(DEFAULT_GRID_POINTS))
    }

    /// Build a core with an explicit initial grid request.
    pub fn with_grid(
        domain: (f64, f64),
        description: impl Into<String>,
        grid: GridSpec,
    ) -> Result<Self, FitError> {
        let (low, high) = domain;
        if !(low.is_finite() && high.is_finite() && low > 0.0 && low <= high) {
            return Err(FitError::InvalidDomain { low, high });
        }
        let description = description.into();
        if description.trim().is_empty() {
            return Err(FitError::InvalidDescription);
        }

        let mut core = Self {
            domain,
            description,
            grid: EnergyGrid::NoValidEnergies,
            grid_input: GridSpec::Count(DEFAULT_GRID_POINTS),
            cache: None,
        };
        core.set_grid(grid)?;
        Ok(core)
    }

    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn grid(&self) -> &EnergyGrid {
        &self.grid
    }

    /// The grid request as originally supplied, before filtering.
    pub fn grid_input(&self) -> &GridSpec {
        &self.grid_input
    }

    pub fn cached(&self) -> Option<&[f64]> {
        self.cache.as_deref()
    }

    pub(crate) fn store(&mut self, sigma: Vec<f64>) {
        self.cache = Some(sigma);
    }

    /// Replace the evaluation grid.
    ///
    /// The result cache is cleared first, unconditionally, so a failed
    /// assignment never leaves a stale cached result behind.
    pub fn set_grid(&mut self, spec: GridSpec) -> Result<(), FitError> {
        self.cache = None;
        let (low, high) = self.domain;

        let grid = match &spec {
            GridSpec::Count(n) => {
                if low == high {
                    // Degenerate single-energy domain: every count collapses
                    // to that one energy.
                    EnergyGrid::Points(vec![low])
                } else {
                    EnergyGrid::Points(log_space(low, high, *n)?)
                }
            }
            GridSpec::Scalar(e) => {
                if !e.is_finite() {
                    return Err(FitError::InvalidGrid(format!("non-finite energy {e}.")));
                }
                if low <= *e && *e <= high {
                    EnergyGrid::Points(vec![*e])
                } else {
                    EnergyGrid::NoValidEnergies
                }
            }
            GridSpec::Points(values) => {
                if let Some(bad) = values.iter().find(|v| !v.is_finite()) {
                    return Err(FitError::InvalidGrid(format!("non-finite energy {bad}.")));
                }
                let kept: Vec<f64> = values
                    .iter()
                    .copied()
                    .filter(|&e| low <= e && e <= high)
                    .collect();
                if kept.is_empty() {
                    EnergyGrid::NoValidEnergies
                } else {
                    EnergyGrid::Points(kept)
                }
            }
        };

        self.grid = grid;
        self.grid_input = spec;
        Ok(())
    }
}

/// Contract implemented by every concrete cross-section fit.
///
/// `fit_function` is the one required capability: a pure function from an
/// energy array (eV) to a cross-section array (m²), defined over the whole
/// real line even where physically meaningless. Grid filtering keeps normal
/// use inside the domain.
pub trait CrossSectionFit {
    fn core(&self) -> &FitCore;
    fn core_mut(&mut self) -> &mut FitCore;

    /// Evaluate the fit formula at the given energies (eV), returning m².
    fn fit_function(&self, energies: &[f64]) -> Vec<f64>;

    /// Validity domain `(low, high)` in eV, boundaries inclusive.
    fn domain(&self) -> (f64, f64) {
        self.core().domain()
    }

    /// Provenance text: process, reference, notes, accuracy.
    fn description(&self) -> &str {
        self.core().description()
    }

    /// The grid currently in effect (after domain filtering).
    fn grid(&self) -> &EnergyGrid {
        self.core().grid()
    }

    /// The grid request as originally supplied, before filtering.
    fn grid_input(&self) -> &GridSpec {
        self.core().grid_input()
    }

    /// Replace the evaluation grid; always clears the cached result first.
    fn set_grid(&mut self, spec: GridSpec) -> Result<(), FitError> {
        self.core_mut().set_grid(spec)
    }

    /// Evaluate the cross section on the current grid.
    ///
    /// The computation is lazy: the fit formula runs only when the cache is
    /// empty, so consecutive calls without a grid change compute once.
    /// Returns `None` when the grid is the no-valid-energy sentinel.
    fn evaluate(&mut self) -> Option<&[f64]> {
        if self.core().cached().is_none() {
            let energies = match self.core().grid() {
                EnergyGrid::Points(p) => p.clone(),
                EnergyGrid::NoValidEnergies => return None,
            };
            let sigma = self.fit_function(&energies);
            self.core_mut().store(sigma);
        }
        self.core().cached()
    }

    /// Replace the grid, then evaluate.
    fn evaluate_at(&mut self, spec: GridSpec) -> Result<Option<&[f64]>, FitError> {
        self.core_mut().set_grid(spec)?;
        Ok(self.evaluate())
    }
}
