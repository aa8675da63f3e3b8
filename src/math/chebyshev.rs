//! Chebyshev series evaluation over an arbitrary window.
//!
//! A series `Σ c_k T_k` defined on the canonical interval `[-1, 1]` is mapped
//! onto a window `[a, b]` by the affine change of variable
//! `t = (2x - a - b) / (b - a)` and evaluated with the Clenshaw recurrence.
//!
//! Numerical notes:
//! - Clenshaw is backward-stable for the coefficient magnitudes seen in the
//!   Barnett tables (|c_k| ≲ 100).
//! - Inputs outside `[a, b]` are not clamped; `|t| > 1` grows like `T_k` does,
//!   which matches evaluating the literature fit outside its stated validity.

/// A Chebyshev series with its evaluation window.
#[derive(Debug, Clone, PartialEq)]
pub struct ChebyshevSeries {
    coefficients: Vec<f64>,
    window: (f64, f64),
}

impl ChebyshevSeries {
    /// Build a series from coefficients `c_0..c_n` and the window `[a, b]`.
    ///
    /// Callers are expected to validate the inputs; this type stores them
    /// as-is. An empty coefficient list evaluates to 0.
    pub fn new(coefficients: Vec<f64>, window: (f64, f64)) -> Self {
        Self {
            coefficients,
            window,
        }
    }

    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    pub fn window(&self) -> (f64, f64) {
        self.window
    }

    /// Evaluate the series at `x` (in window coordinates).
    pub fn eval(&self, x: f64) -> f64 {
        let c = &self.coefficients;
        match c.len() {
            0 => 0.0,
            1 => c[0],
            _ => {
                let (a, b) = self.window;
                let t = (2.0 * x - a - b) / (b - a);

                // Clenshaw recurrence, highest order first.
                let mut b1 = 0.0;
                let mut b2 = 0.0;
                for &ck in c[1..].iter().rev() {
                    let next = 2.0 * t * b1 - b2 + ck;
                    b2 = b1;
                    b1 = next;
                }
                c[0] + t * b1 - b2
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constant_series() {
        let s = ChebyshevSeries::new(vec![3.5], (0.0, 1.0));
        assert_eq!(s.eval(0.2), 3.5);
        assert_eq!(s.eval(0.9), 3.5);
    }

    #[test]
    fn linear_series_on_canonical_window() {
        // c0 + c1*T1(t) = 1 + 2t on [-1, 1].
        let s = ChebyshevSeries::new(vec![1.0, 2.0], (-1.0, 1.0));
        assert!((s.eval(-1.0) - (-1.0)).abs() < 1e-15);
        assert!((s.eval(0.0) - 1.0).abs() < 1e-15);
        assert!((s.eval(0.5) - 2.0).abs() < 1e-15);
    }

    #[test]
    fn quadratic_matches_t2_identity() {
        // T2(t) = 2t^2 - 1, so the series [0, 0, 1] equals that polynomial.
        let s = ChebyshevSeries::new(vec![0.0, 0.0, 1.0], (-1.0, 1.0));
        for &t in &[-1.0, -0.3, 0.0, 0.7, 1.0] {
            assert!((s.eval(t) - (2.0 * t * t - 1.0)).abs() < 1e-14);
        }
    }

    #[test]
    fn window_mapping_hits_canonical_endpoints() {
        // On [2, 6], x=2 maps to t=-1 and x=6 to t=+1, where T_k(±1) = (±1)^k.
        let s = ChebyshevSeries::new(vec![1.0, 1.0, 1.0, 1.0], (2.0, 6.0));
        assert!((s.eval(6.0) - 4.0).abs() < 1e-14);
        assert!((s.eval(2.0) - 0.0).abs() < 1e-14);
    }

    #[test]
    fn high_order_series_is_finite() {
        let coeffs: Vec<f64> = (0..9).map(|k| (-0.5_f64).powi(k)).collect();
        let s = ChebyshevSeries::new(coeffs, (1.0, 1e7_f64.ln()));
        for &x in &[1.0, 5.0, 10.0, 16.0] {
            assert!(s.eval(x).is_finite());
        }
    }
}
