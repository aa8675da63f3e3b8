//! Chart rendering for sampled cross-section curves.
//!
//! Cross sections span many decades in both energy and σ, so every chart here
//! is log-log. Two surfaces are supported:
//! - SVG files (`svg`), for reports and publications
//! - the terminal, via the Ratatui widget in `crate::tui`
//!
//! `series` holds the shared sampling helper both surfaces draw from.

pub mod svg;

pub use svg::render_svg_chart;

use crate::error::FitError;
use crate::fit::CrossSectionFit;

/// One named line series in chart coordinates (energy eV, σ m²).
#[derive(Debug, Clone)]
pub struct CurveSeries {
    pub label: String,
    pub points: Vec<(f64, f64)>,
}

/// Sample a fit over its current grid into a drawable series.
///
/// Fails with [`FitError::InvalidGrid`] when the current grid holds no valid
/// energies (nothing to draw).
pub fn sampled_series(
    label: impl Into<String>,
    fit: &mut dyn CrossSectionFit,
) -> Result<CurveSeries, FitError> {
    let sigma = fit
        .evaluate()
        .ok_or_else(|| {
            FitError::InvalidGrid("the current grid holds no valid energies.".to_string())
        })?
        .to_vec();
    let energies = fit
        .grid()
        .energies()
        .map(<[f64]>::to_vec)
        .unwrap_or_default();

    Ok(CurveSeries {
        label: label.into(),
        points: energies.into_iter().zip(sigma).collect(),
    })
}

/// Log-log axis bounds covering every finite positive point, padded so a
/// single point still spans a drawable range.
pub(crate) fn log_log_bounds(series: &[CurveSeries]) -> Option<([f64; 2], [f64; 2])> {
    let mut x0 = f64::INFINITY;
    let mut x1 = f64::NEG_INFINITY;
    let mut y0 = f64::INFINITY;
    let mut y1 = f64::NEG_INFINITY;

    for s in series {
        for &(x, y) in &s.points {
            if !(x.is_finite() && y.is_finite() && x > 0.0 && y > 0.0) {
                continue;
            }
            x0 = x0.min(x);
            x1 = x1.max(x);
            y0 = y0.min(y);
            y1 = y1.max(y);
        }
    }

    if !(x0.is_finite() && y0.is_finite()) {
        return None;
    }
    // Degenerate spans collapse a log axis; pad by a factor of two each way.
    if x1 <= x0 {
        x0 /= 2.0;
        x1 *= 2.0;
    }
    if y1 <= y0 {
        y0 /= 2.0;
        y1 *= 2.0;
    }
    Some(([x0, x1], [y0, y1]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fit::{GridSpec, TabataFit, TabataForm};

    fn momentum_transfer_fit() -> TabataFit {
        TabataFit::new(
            (1.0e-1, 1.0e4),
            "H2 momentum transfer from H+ + H2.",
            TabataForm::Form1,
            &[0.0, 5.74, -5.765e-1, 2.79e-2, 1.737],
        )
        .unwrap()
    }

    #[test]
    fn sampled_series_pairs_grid_with_sigma() {
        let mut fit = momentum_transfer_fit();
        fit.set_grid(GridSpec::Count(16)).unwrap();
        let series = sampled_series("mt", &mut fit).unwrap();
        assert_eq!(series.points.len(), 16);
        assert!((series.points[0].0 - 0.1).abs() < 1e-12);
        assert!(series.points.iter().all(|(_, s)| *s > 0.0));
    }

    #[test]
    fn empty_grid_cannot_be_sampled() {
        let mut fit = momentum_transfer_fit();
        fit.set_grid(GridSpec::Points(vec![1.0e6])).unwrap();
        let err = sampled_series("mt", &mut fit).unwrap_err();
        assert!(matches!(err, FitError::InvalidGrid(_)));
    }

    #[test]
    fn degenerate_bounds_are_padded() {
        let series = [CurveSeries {
            label: "one point".to_string(),
            points: vec![(100.0, 1e-20)],
        }];
        let ([x0, x1], [y0, y1]) = log_log_bounds(&series).unwrap();
        assert!(x0 < 100.0 && x1 > 100.0);
        assert!(y0 < 1e-20 && y1 > 1e-20);
    }

    #[test]
    fn nonpositive_points_are_excluded_from_bounds() {
        let series = [CurveSeries {
            label: "mixed".to_string(),
            points: vec![(20.0, 0.0), (40.0, 1e-21), (80.0, 4e-21)],
        }];
        let ([x0, _], [y0, _]) = log_log_bounds(&series).unwrap();
        assert_eq!(x0, 40.0);
        assert_eq!(y0, 1e-21);
    }
}
