//! Chebyshev polynomial fits from the Barnett compilation.
//!
//! Reference: ATOMIC DATA FOR FUSION VOLUME 1, COLLISIONS OF H, H2, He and Li
//! ATOMS and IONS with ATOMS and MOLECULES, C. F. Barnett (Appendix 1).
//!
//! Barnett represents cross sections as `σ(e) = exp(T(ln e))` where `T` is a
//! Chebyshev series and `e` is energy per unit projectile mass (eV/amu), with
//! σ in cm². Two published conventions are normalized away here:
//!
//! - the tabulated leading coefficient is *double* the true Chebyshev T0
//!   coefficient, so it is halved on construction;
//! - the domain is converted from eV/amu to eV via the projectile mass, and
//!   the result from cm² to m².

use crate::error::FitError;
use crate::fit::curve::{CrossSectionFit, FitCore, GridSpec};
use crate::math::ChebyshevSeries;

/// A cross-section fit of the form `exp(T(ln E)) / 1e4`.
#[derive(Debug, Clone)]
pub struct BarnettChebFit {
    core: FitCore,
    series: ChebyshevSeries,
    barnett_coefficients: Vec<f64>,
    projectile_mass: f64,
}

impl BarnettChebFit {
    /// Build a fit from a published coefficient row.
    ///
    /// `domain` is in eV/amu as tabulated; `projectile_mass` (amu) converts it
    /// to the absolute-energy domain reported by [`CrossSectionFit::domain`].
    pub fn new(
        domain: (f64, f64),
        description: impl Into<String>,
        projectile_mass: f64,
        barnett_coefficients: &[f64],
    ) -> Result<Self, FitError> {
        Self::with_grid(
            domain,
            description,
            projectile_mass,
            barnett_coefficients,
            GridSpec::Count(crate::fit::curve::DEFAULT_GRID_POINTS),
        )
    }

    /// As [`BarnettChebFit::new`] but with an explicit initial grid.
    pub fn with_grid(
        domain: (f64, f64),
        description: impl Into<String>,
        projectile_mass: f64,
        barnett_coefficients: &[f64],
        grid: GridSpec,
    ) -> Result<Self, FitError> {
        if !(projectile_mass.is_finite() && projectile_mass > 0.0) {
            return Err(FitError::InvalidMass(projectile_mass));
        }
        if barnett_coefficients.is_empty() {
            return Err(FitError::InvalidCoefficients(
                "Barnett coefficient sequence is empty.".to_string(),
            ));
        }
        if let Some(bad) = barnett_coefficients.iter().find(|c| !c.is_finite()) {
            return Err(FitError::InvalidCoefficients(format!(
                "non-finite Barnett coefficient {bad}."
            )));
        }

        // eV/amu -> eV.
        let internal_domain = (domain.0 * projectile_mass, domain.1 * projectile_mass);
        let core = FitCore::with_grid(internal_domain, description, grid)?;

        // Barnett's leading coefficient is double the true T0 coefficient.
        let mut chebyshev = barnett_coefficients.to_vec();
        chebyshev[0] /= 2.0;
        let window = (internal_domain.0.ln(), internal_domain.1.ln());
        let series = ChebyshevSeries::new(chebyshev, window);

        Ok(Self {
            core,
            series,
            barnett_coefficients: barnett_coefficients.to_vec(),
            projectile_mass,
        })
    }

    /// Coefficients exactly as published by Barnett.
    pub fn barnett_coefficients(&self) -> &[f64] {
        &self.barnett_coefficients
    }

    /// True Chebyshev coefficients (leading coefficient halved).
    pub fn chebyshev_coefficients(&self) -> &[f64] {
        self.series.coefficients()
    }

    /// The series window in `ln(eV)`.
    pub fn chebyshev_domain(&self) -> (f64, f64) {
        self.series.window()
    }

    pub fn projectile_mass(&self) -> f64 {
        self.projectile_mass
    }
}

impl CrossSectionFit for BarnettChebFit {
    fn core(&self) -> &FitCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut FitCore {
        &mut self.core
    }

    fn fit_function(&self, energies: &[f64]) -> Vec<f64> {
        // cm² -> m².
        energies
            .iter()
            .map(|&e| (self.series.eval(e.ln())).exp() / 1e4)
            .collect()
    }
}

impl std::fmt::Display for BarnettChebFit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.core.description())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// H2+ + H2 -> total fast H+ at low energies (Barnett).
    fn low_energy_fit() -> BarnettChebFit {
        BarnettChebFit::new(
            (1.6, 5.0),
            "Total H+ production from H2+ + H2 at low energies.",
            2.0,
            &[
                -74.4493, 0.351878, -0.249279, 0.0781924, -0.0295527, 0.00853617, -0.00490330,
            ],
        )
        .unwrap()
    }

    #[test]
    fn domain_is_converted_by_projectile_mass() {
        let fit = low_energy_fit();
        assert_eq!(fit.domain(), (3.2, 10.0));
        assert_eq!(fit.projectile_mass(), 2.0);
    }

    #[test]
    fn leading_coefficient_is_halved() {
        let fit = low_energy_fit();
        let barnett = fit.barnett_coefficients();
        let cheb = fit.chebyshev_coefficients();
        assert_eq!(barnett.len(), cheb.len());
        assert_eq!(cheb[0], barnett[0] / 2.0);
        for (b, c) in barnett.iter().zip(cheb.iter()).skip(1) {
            assert_eq!(b, c);
        }
    }

    #[test]
    fn chebyshev_window_is_log_of_domain() {
        let fit = low_energy_fit();
        let (a, b) = fit.chebyshev_domain();
        assert!((a - 3.2_f64.ln()).abs() < 1e-15);
        assert!((b - 10.0_f64.ln()).abs() < 1e-15);
    }

    #[test]
    fn default_grid_produces_finite_positive_cross_sections() {
        let mut fit = low_energy_fit();
        let sigma = fit.evaluate().unwrap();
        assert_eq!(sigma.len(), crate::fit::curve::DEFAULT_GRID_POINTS);
        assert!(sigma.iter().all(|s| s.is_finite() && *s > 0.0));
        // Dissociation cross sections in this range sit well below 1e-18 m².
        assert!(sigma.iter().all(|s| *s < 1e-18));
    }

    #[test]
    fn non_scalar_mass_is_rejected() {
        for &mass in &[f64::NAN, f64::INFINITY, 0.0, -2.0] {
            let err = BarnettChebFit::new((1.6, 5.0), "d", mass, &[-74.0, 0.3]).unwrap_err();
            assert!(matches!(err, FitError::InvalidMass(_)));
        }
    }

    #[test]
    fn bad_coefficients_are_rejected() {
        let err = BarnettChebFit::new((1.6, 5.0), "d", 2.0, &[]).unwrap_err();
        assert!(matches!(err, FitError::InvalidCoefficients(_)));
        let err = BarnettChebFit::new((1.6, 5.0), "d", 2.0, &[-74.0, f64::NAN]).unwrap_err();
        assert!(matches!(err, FitError::InvalidCoefficients(_)));
    }

    #[test]
    fn cached_evaluation_matches_direct_formula() {
        let mut fit = low_energy_fit();
        let sigma = fit.evaluate().unwrap().to_vec();
        let grid = fit.grid().energies().unwrap().to_vec();
        let direct = fit.fit_function(&grid);
        assert_eq!(sigma, direct);
    }
}
