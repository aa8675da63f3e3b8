//! Semi-empirical cross-section fits from the Tabata compilation.
//!
//! Reference: The Collected Works of Tatsuo Tabata, Volume 17, Atomic and
//! Molecular Collision Cross Section (2), T. Tabata.
//!
//! Every fit is a closed-form expression in `x = E − E_threshold` composed
//! from a small inventory of primitive shapes (here in the source's cm²/keV
//! units; conversion to m² happens at the end):
//!
//! - power law         `f1(x) = σ0 a (x/E_R)^e`  with σ0 = 1e-16 cm²,
//!   E_R = 13.61 eV, also instantiated on the (a5,a6), (a7,a8) and (a5,a2)
//!   coefficient pairs
//! - single cutoff     `f2(x) = f1(x) / [1 + (χ/c)^(e+e')]` where χ is `x`
//!   in keV, with index-shifted variants on a5..a8 and a9..a12
//! - double cutoff     `f3(x) = f1(x) / [1 + (χ/c1)^(e+e') + (χ/c2)^(e+e'')]`
//!   with variants on a5..a10 and the shared-exponent one on (a5,a2,a6..a9)
//! - rational          `f4(x)` on a1..a8 (see [`TabataForm::Form14`])
//!
//! The fourteen named forms each combine a fixed subset of these primitives;
//! there is no general rule, each composition is tabulated individually in
//! the evaluation match on [`TabataForm`].
//!
//! Evaluation below the threshold energy (`x < 0`) is not forbidden: the
//! fractional powers then produce NaN. Grids are normally confined to the
//! validity domain, which starts at or above the threshold for every
//! published reaction.

use crate::error::FitError;
use crate::fit::curve::{CrossSectionFit, FitCore, GridSpec};

/// σ0, the Tabata amplitude unit (cm²).
const SIGMA0_CM2: f64 = 1e-16;

/// Rydberg energy (eV), the power-law energy unit.
const RYDBERG_EV: f64 = 13.61;

/// Cutoff arguments use energies in keV.
const EV_PER_KEV: f64 = 1e3;

/// The fourteen named fit expressions of the Tabata compilation.
///
/// Forms 1, 2, 6, 8, 10, 11, 13 and 14 are exercised by the shipped reaction
/// tables; the remaining six are carried for completeness and compose the
/// same primitive inventory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TabataForm {
    /// `f2(x)`
    Form1,
    /// `f2(x) + a5 f2(x/a6)`
    Form2,
    /// `f3(x) + a7 f3(x/a8)`
    Form3,
    /// `f2(x) + f1(x; a5,a6)`
    Form4,
    /// `f2(x) + a5 f2(x/a6) + f1(x; a7,a8)`
    Form5,
    /// `f3(x)`
    Form6,
    /// `f3(x) + f1(x; a7,a8)`
    Form7,
    /// `f2(x) + f3(x; a5,a2,a6..a9)` (second term reuses the a2 exponent)
    Form8,
    /// `f2(x) + f2(x; a5..a8) + a9 f2(x/a10; a5..a8)`
    Form9,
    /// `f2(x) + f2(x; a5..a8)`
    Form10,
    /// `f2(x) + f3(x; a5..a10)`
    Form11,
    /// `f3(x) + f3(x; a7..a12)`
    Form12,
    /// `f2(x) + f2(x; a5..a8) + f2(x; a9..a12)`
    Form13,
    /// `f4(x) = f1(x) [1 + (χ/a3)^(a4−a2)] / [1 + (χ/a5)^(a4+a6) + (χ/a7)^(a4+a8)]`
    Form14,
}

impl TabataForm {
    /// Number of coefficients `a1..aN` the form's expression indexes into.
    pub fn coefficient_len(self) -> usize {
        match self {
            TabataForm::Form1 => 4,
            TabataForm::Form2 => 6,
            TabataForm::Form3 => 8,
            TabataForm::Form4 => 6,
            TabataForm::Form5 => 8,
            TabataForm::Form6 => 6,
            TabataForm::Form7 => 8,
            TabataForm::Form8 => 9,
            TabataForm::Form9 => 10,
            TabataForm::Form10 => 8,
            TabataForm::Form11 => 10,
            TabataForm::Form12 => 12,
            TabataForm::Form13 => 12,
            TabataForm::Form14 => 8,
        }
    }

    /// The published expression number (1-based).
    pub fn index(self) -> usize {
        match self {
            TabataForm::Form1 => 1,
            TabataForm::Form2 => 2,
            TabataForm::Form3 => 3,
            TabataForm::Form4 => 4,
            TabataForm::Form5 => 5,
            TabataForm::Form6 => 6,
            TabataForm::Form7 => 7,
            TabataForm::Form8 => 8,
            TabataForm::Form9 => 9,
            TabataForm::Form10 => 10,
            TabataForm::Form11 => 11,
            TabataForm::Form12 => 12,
            TabataForm::Form13 => 13,
            TabataForm::Form14 => 14,
        }
    }
}

/// Power-law shape `σ0 a (x/E_R)^e` (cm²; `x` in eV).
fn power_law(x: f64, a: f64, e: f64) -> f64 {
    SIGMA0_CM2 * a * (x / RYDBERG_EV).powf(e)
}

/// Single-cutoff shape `f1 / [1 + (χ/c)^(e1+e2)]` with χ = x in keV.
fn single_cutoff(x: f64, a: f64, e1: f64, c: f64, e2: f64) -> f64 {
    let chi = x / EV_PER_KEV;
    power_law(x, a, e1) / (1.0 + (chi / c).powf(e1 + e2))
}

/// Double-cutoff shape `f1 / [1 + (χ/c1)^(e1+e2) + (χ/c2)^(e1+e3)]`.
fn double_cutoff(x: f64, a: f64, e1: f64, c1: f64, e2: f64, c2: f64, e3: f64) -> f64 {
    let chi = x / EV_PER_KEV;
    power_law(x, a, e1) / (1.0 + (chi / c1).powf(e1 + e2) + (chi / c2).powf(e1 + e3))
}

/// A semi-empirical fit: threshold energy plus coefficient tuple plus one of
/// the fourteen named expressions.
#[derive(Debug, Clone)]
pub struct TabataFit {
    core: FitCore,
    form: TabataForm,
    threshold_ev: f64,
    coefficients: Vec<f64>,
}

impl TabataFit {
    /// Build a fit from a published parameter row.
    ///
    /// `parameters[0]` is the threshold (activation) energy in eV; the
    /// remainder are the coefficients `a1..aN` in tabulated order. The row
    /// must supply at least `form.coefficient_len()` coefficients.
    pub fn new(
        domain: (f64, f64),
        description: impl Into<String>,
        form: TabataForm,
        parameters: &[f64],
    ) -> Result<Self, FitError> {
        Self::with_grid(
            domain,
            description,
            form,
            parameters,
            GridSpec::Count(crate::fit::curve::DEFAULT_GRID_POINTS),
        )
    }

    /// As [`TabataFit::new`] but with an explicit initial grid.
    pub fn with_grid(
        domain: (f64, f64),
        description: impl Into<String>,
        form: TabataForm,
        parameters: &[f64],
        grid: GridSpec,
    ) -> Result<Self, FitError> {
        if parameters.is_empty() {
            return Err(FitError::InvalidCoefficients(
                "Tabata parameter sequence is empty.".to_string(),
            ));
        }
        if let Some(bad) = parameters.iter().find(|p| !p.is_finite()) {
            return Err(FitError::InvalidCoefficients(format!(
                "non-finite Tabata parameter {bad}."
            )));
        }
        let needed = form.coefficient_len();
        if parameters.len() < needed + 1 {
            return Err(FitError::InvalidCoefficients(format!(
                "expression #{} needs a threshold plus {} coefficients, got {} values.",
                form.index(),
                needed,
                parameters.len()
            )));
        }

        let core = FitCore::with_grid(domain, description, grid)?;
        Ok(Self {
            core,
            form,
            threshold_ev: parameters[0],
            coefficients: parameters[1..].to_vec(),
        })
    }

    pub fn form(&self) -> TabataForm {
        self.form
    }

    /// Threshold (activation) energy in eV.
    pub fn threshold_energy(&self) -> f64 {
        self.threshold_ev
    }

    /// Coefficients `a1..aN` in tabulated order.
    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    /// Coefficient `a_i` (1-based, as in the published formulas).
    fn a(&self, i: usize) -> f64 {
        self.coefficients[i - 1]
    }

    /// `f2` on the leading coefficient block a1..a4.
    fn f2(&self, x: f64) -> f64 {
        single_cutoff(x, self.a(1), self.a(2), self.a(3), self.a(4))
    }

    /// `f3` on the leading coefficient block a1..a6.
    fn f3(&self, x: f64) -> f64 {
        double_cutoff(x, self.a(1), self.a(2), self.a(3), self.a(4), self.a(5), self.a(6))
    }

    /// `f4` on a1..a8.
    fn f4(&self, x: f64) -> f64 {
        let chi = x / EV_PER_KEV;
        let numer = power_law(x, self.a(1), self.a(2))
            * (1.0 + (chi / self.a(3)).powf(self.a(4) - self.a(2)));
        let denom = 1.0
            + (chi / self.a(5)).powf(self.a(4) + self.a(6))
            + (chi / self.a(7)).powf(self.a(4) + self.a(8));
        numer / denom
    }

    /// Evaluate the form's expression at one energy-above-threshold (cm²).
    fn sigma_cm2(&self, x: f64) -> f64 {
        match self.form {
            TabataForm::Form1 => self.f2(x),
            TabataForm::Form2 => self.f2(x) + self.a(5) * self.f2(x / self.a(6)),
            TabataForm::Form3 => self.f3(x) + self.a(7) * self.f3(x / self.a(8)),
            TabataForm::Form4 => self.f2(x) + power_law(x, self.a(5), self.a(6)),
            TabataForm::Form5 => {
                self.f2(x)
                    + self.a(5) * self.f2(x / self.a(6))
                    + power_law(x, self.a(7), self.a(8))
            }
            TabataForm::Form6 => self.f3(x),
            TabataForm::Form7 => self.f3(x) + power_law(x, self.a(7), self.a(8)),
            TabataForm::Form8 => {
                self.f2(x)
                    + double_cutoff(
                        x,
                        self.a(5),
                        self.a(2),
                        self.a(6),
                        self.a(7),
                        self.a(8),
                        self.a(9),
                    )
            }
            TabataForm::Form9 => {
                let shifted = single_cutoff(
                    x / self.a(10),
                    self.a(5),
                    self.a(6),
                    self.a(7),
                    self.a(8),
                );
                self.f2(x)
                    + single_cutoff(x, self.a(5), self.a(6), self.a(7), self.a(8))
                    + self.a(9) * shifted
            }
            TabataForm::Form10 => {
                self.f2(x) + single_cutoff(x, self.a(5), self.a(6), self.a(7), self.a(8))
            }
            TabataForm::Form11 => {
                self.f2(x)
                    + double_cutoff(
                        x,
                        self.a(5),
                        self.a(6),
                        self.a(7),
                        self.a(8),
                        self.a(9),
                        self.a(10),
                    )
            }
            TabataForm::Form12 => {
                self.f3(x)
                    + double_cutoff(
                        x,
                        self.a(7),
                        self.a(8),
                        self.a(9),
                        self.a(10),
                        self.a(11),
                        self.a(12),
                    )
            }
            TabataForm::Form13 => {
                self.f2(x)
                    + single_cutoff(x, self.a(5), self.a(6), self.a(7), self.a(8))
                    + single_cutoff(x, self.a(9), self.a(10), self.a(11), self.a(12))
            }
            TabataForm::Form14 => self.f4(x),
        }
    }
}

impl CrossSectionFit for TabataFit {
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
            .map(|&e| self.sigma_cm2(e - self.threshold_ev) / 1e4)
            .collect()
    }
}

impl std::fmt::Display for TabataFit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.core.description())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn form1_at_threshold_is_zero() {
        // x = 0 with a positive power-law exponent: 0^e = 0, so f2(0) = 0.
        let mut fit = TabataFit::new(
            (20.0, 1.12e5),
            "threshold edge case",
            TabataForm::Form1,
            &[20.0, 2.53e-4, 1.728, 2.164, 0.774, 1.639, 14.3],
        )
        .unwrap();
        let sigma = fit.evaluate_at(GridSpec::Scalar(20.0)).unwrap().unwrap();
        assert_eq!(sigma, &[0.0]);
    }

    #[test]
    fn form1_matches_hand_expanded_expression() {
        let fit = TabataFit::new(
            (0.1, 1.0e4),
            "H2 momentum transfer from H+ + H2",
            TabataForm::Form1,
            &[0.0, 5.74, -5.765e-1, 2.79e-2, 1.737],
        )
        .unwrap();

        let e = 100.0;
        let expected = {
            let f1 = 1e-16 * 5.74 * (e / 13.61_f64).powf(-0.5765);
            f1 / (1.0 + (e / 1e3 / 2.79e-2_f64).powf(-0.5765 + 1.737)) / 1e4
        };
        let got = fit.fit_function(&[e])[0];
        assert!((got - expected).abs() <= 1e-12 * expected.abs());
        assert!(got > 0.0);
    }

    #[test]
    fn form2_adds_scaled_copy_of_f2() {
        let params = [20.0, 2.53e-4, 1.728, 2.164, 0.774, 1.639, 14.3];
        let fit2 = TabataFit::new((5.62e1, 1.12e5), "total", TabataForm::Form2, &params).unwrap();
        let fit1 = TabataFit::new((5.62e1, 1.12e5), "base", TabataForm::Form1, &params).unwrap();

        let e = 1.0e4;
        let x = e - 20.0;
        let base = fit1.fit_function(&[e])[0];
        let scaled = fit1.fit_function(&[20.0 + x / 14.3])[0];
        let got = fit2.fit_function(&[e])[0];
        assert!((got - (base + 1.639 * scaled)).abs() <= 1e-12 * got.abs());
    }

    #[test]
    fn form6_is_finite_positive_over_its_domain() {
        let mut fit = TabataFit::new(
            (1.0e3, 3.0e5),
            "Total H+ production from H- + H2.",
            TabataForm::Form6,
            &[0.0, 1.75e-8, 3.88, 9.06e-1, -2.74e-1, 3.19, 1.19],
        )
        .unwrap();
        let sigma = fit.evaluate().unwrap();
        assert!(sigma.iter().all(|s| s.is_finite() && *s > 0.0));
    }

    #[test]
    fn form14_is_finite_positive_over_its_domain() {
        let mut fit = TabataFit::new(
            (1.0e-1, 1.0e4),
            "H2 momentum transfer from H3+ + H2.",
            TabataForm::Form14,
            &[
                0.0, 1.16, -8.12e-1, 4.29e-4, -1.38e-1, 1.28e-2, 1.33, 8.67e-2, 2.18,
            ],
        )
        .unwrap();
        let sigma = fit.evaluate().unwrap();
        assert!(sigma.iter().all(|s| s.is_finite() && *s > 0.0));
    }

    #[test]
    fn form8_composes_f2_and_shared_exponent_double_cutoff() {
        let params = [
            2.5, 2.12e2, 1.721, 6.7e-4, 3.239e-1, 4.34e-3, 1.296, 1.42e-1, 9.34, 2.997,
        ];
        let fit = TabataFit::new((3.16, 1.0e5), "total fast H", TabataForm::Form8, &params).unwrap();

        let e = 5.0e3;
        let x = e - 2.5;
        let chi = x / 1e3;
        let f2 = 1e-16 * 2.12e2 * (x / 13.61_f64).powf(1.721)
            / (1.0 + (chi / 6.7e-4_f64).powf(1.721 + 0.3239));
        let f3c = 1e-16 * 4.34e-3 * (x / 13.61_f64).powf(1.721)
            / (1.0 + (chi / 1.296_f64).powf(1.721 + 0.142) + (chi / 9.34_f64).powf(1.721 + 2.997));
        let got = fit.fit_function(&[e])[0];
        assert!((got - (f2 + f3c) / 1e4).abs() <= 1e-12 * got.abs());
    }

    #[test]
    fn coefficient_count_is_enforced_per_form() {
        let err = TabataFit::new(
            (1.0, 10.0),
            "d",
            TabataForm::Form13,
            &[0.0, 1.0, 2.0, 3.0, 4.0],
        )
        .unwrap_err();
        assert!(matches!(err, FitError::InvalidCoefficients(_)));

        // The same row is enough for expression #1.
        assert!(TabataFit::new(
            (1.0, 10.0),
            "d",
            TabataForm::Form1,
            &[0.0, 1.0, 2.0, 3.0, 4.0],
        )
        .is_ok());
    }

    #[test]
    fn parameters_split_into_threshold_and_coefficients() {
        let fit = TabataFit::new(
            (21.0, 9.11e4),
            "d",
            TabataForm::Form13,
            &[
                2.1e1, 9.73e-3, 2.38, 1.39e-2, -5.51e-1, 7.7e-2, 2.12, 1.97e-6, 2.051, 5.5,
                6.62e-1, 2.02e1, 3.62,
            ],
        )
        .unwrap();
        assert_eq!(fit.threshold_energy(), 21.0);
        assert_eq!(fit.coefficients().len(), 12);
        assert_eq!(fit.coefficients()[0], 9.73e-3);
    }

    #[test]
    fn non_finite_parameters_are_rejected() {
        let err = TabataFit::new(
            (1.0, 10.0),
            "d",
            TabataForm::Form1,
            &[0.0, f64::NAN, 2.0, 3.0, 4.0],
        )
        .unwrap_err();
        assert!(matches!(err, FitError::InvalidCoefficients(_)));
    }
}
