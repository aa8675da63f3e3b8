//! Crate-wide error type.
//!
//! Every variant is a rejected input: errors are raised at the point where the
//! bad value is supplied (construction or grid assignment) and are never
//! retried or recovered internally. The caller fixes the input and retries.

/// Rejected-input errors for fit construction, grid assignment and plotting.
#[derive(Debug, Clone, PartialEq)]
pub enum FitError {
    /// Domain bounds are non-finite, non-positive, or out of order.
    InvalidDomain { low: f64, high: f64 },
    /// Description text is empty.
    InvalidDescription,
    /// Projectile mass is non-finite or non-positive.
    InvalidMass(f64),
    /// Coefficient sequence is empty, non-finite, or too short for the
    /// selected fit form.
    InvalidCoefficients(String),
    /// Grid value cannot form a valid energy grid.
    InvalidGrid(String),
    /// The supplied plotting surface cannot host a chart.
    InvalidPlotTarget(String),
    /// I/O failure while writing an export or chart file.
    Io(String),
}

impl FitError {
    /// Process exit code for the `xs` binary.
    ///
    /// 2 = bad input (construction/grid/CLI), 3 = unusable plot target,
    /// 4 = I/O or terminal failure.
    pub fn exit_code(&self) -> u8 {
        match self {
            FitError::InvalidDomain { .. }
            | FitError::InvalidDescription
            | FitError::InvalidMass(_)
            | FitError::InvalidCoefficients(_)
            | FitError::InvalidGrid(_) => 2,
            FitError::InvalidPlotTarget(_) => 3,
            FitError::Io(_) => 4,
        }
    }
}

impl std::fmt::Display for FitError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FitError::InvalidDomain { low, high } => write!(
                f,
                "Invalid domain ({low}, {high}): bounds must be finite, positive and ordered."
            ),
            FitError::InvalidDescription => {
                write!(f, "Invalid description: must be non-empty text.")
            }
            FitError::InvalidMass(m) => {
                write!(f, "Invalid projectile mass {m}: must be a finite positive scalar.")
            }
            FitError::InvalidCoefficients(msg) => write!(f, "Invalid coefficients: {msg}"),
            FitError::InvalidGrid(msg) => write!(f, "Invalid energy grid: {msg}"),
            FitError::InvalidPlotTarget(msg) => write!(f, "Invalid plot target: {msg}"),
            FitError::Io(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for FitError {}
