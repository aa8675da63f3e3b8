//! Log-spaced energy grids.
//!
//! Cross-section domains span several decades of energy, so evaluation grids
//! are laid out uniformly in `ln(E)` rather than in `E`.

use crate::error::FitError;

/// Generate `steps` log-spaced points between `min` and `max` (inclusive).
pub fn log_space(min: f64, max: f64, steps: usize) -> Result<Vec<f64>, FitError> {
    if !(min.is_finite() && max.is_finite() && min > 0.0 && max > min) {
        return Err(FitError::InvalidGrid(format!(
            "log-spaced range requires finite bounds with 0 < min < max, got min={min}, max={max}."
        )));
    }
    if steps < 2 {
        return Err(FitError::InvalidGrid(format!(
            "log-spaced grid requires at least 2 points, got {steps}."
        )));
    }

    let ln_min = min.ln();
    let ln_max = max.ln();
    let step = (ln_max - ln_min) / (steps as f64 - 1.0);

    let mut out = Vec::with_capacity(steps);
    for i in 0..steps {
        out.push((ln_min + step * i as f64).exp());
    }
    // Land exactly on the upper bound (the domain is inclusive).
    out[steps - 1] = max;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_space_includes_endpoints() {
        let v = log_space(1.6, 5.0e4, 100).unwrap();
        assert_eq!(v.len(), 100);
        assert!((v[0] - 1.6).abs() < 1e-12);
        assert_eq!(v[99], 5.0e4);
    }

    #[test]
    fn log_space_is_increasing() {
        let v = log_space(3.2, 10.0, 50).unwrap();
        for w in v.windows(2) {
            assert!(w[1] > w[0]);
        }
    }

    #[test]
    fn log_space_rejects_bad_ranges() {
        assert!(log_space(0.0, 10.0, 10).is_err());
        assert!(log_space(-1.0, 10.0, 10).is_err());
        assert!(log_space(10.0, 10.0, 10).is_err());
        assert!(log_space(1.0, 10.0, 1).is_err());
    }
}
