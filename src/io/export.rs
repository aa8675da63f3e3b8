//! Export sampled cross-section curves to CSV and JSON.
//!
//! CSV is the spreadsheet-friendly format: one `energy_ev,sigma_m2` row per
//! grid point. JSON is the portable representation: reaction label,
//! provenance text, validity domain and the sampled grid, with a schema
//! defined by [`CurveFile`].

use std::fs::File;
use std::io::Write;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::FitError;

/// Portable JSON representation of a sampled curve.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurveFile {
    pub tool: String,
    pub label: String,
    pub description: String,
    pub domain_ev: (f64, f64),
    pub energy_ev: Vec<f64>,
    pub sigma_m2: Vec<f64>,
}

impl CurveFile {
    pub fn new(
        label: impl Into<String>,
        description: impl Into<String>,
        domain_ev: (f64, f64),
        energy_ev: Vec<f64>,
        sigma_m2: Vec<f64>,
    ) -> Self {
        Self {
            tool: "xs".to_string(),
            label: label.into(),
            description: description.into(),
            domain_ev,
            energy_ev,
            sigma_m2,
        }
    }
}

/// Write a sampled curve to a CSV file.
pub fn write_curve_csv(path: &Path, energy_ev: &[f64], sigma_m2: &[f64]) -> Result<(), FitError> {
    let mut file = File::create(path).map_err(|e| {
        FitError::Io(format!("Failed to create export CSV '{}': {e}", path.display()))
    })?;

    writeln!(file, "energy_ev,sigma_m2")
        .map_err(|e| FitError::Io(format!("Failed to write export CSV header: {e}")))?;

    for (e_ev, s_m2) in energy_ev.iter().zip(sigma_m2) {
        writeln!(file, "{e_ev:.9e},{s_m2:.9e}")
            .map_err(|e| FitError::Io(format!("Failed to write export CSV row: {e}")))?;
    }

    Ok(())
}

/// Write a curve JSON file.
pub fn write_curve_json(path: &Path, curve: &CurveFile) -> Result<(), FitError> {
    let file = File::create(path).map_err(|e| {
        FitError::Io(format!("Failed to create curve JSON '{}': {e}", path.display()))
    })?;

    serde_json::to_writer_pretty(file, curve)
        .map_err(|e| FitError::Io(format!("Failed to write curve JSON: {e}")))?;

    Ok(())
}

/// Read a curve JSON file.
pub fn read_curve_json(path: &Path) -> Result<CurveFile, FitError> {
    let file = File::open(path).map_err(|e| {
        FitError::Io(format!("Failed to open curve JSON '{}': {e}", path.display()))
    })?;
    let curve: CurveFile = serde_json::from_reader(file)
        .map_err(|e| FitError::Io(format!("Invalid curve JSON: {e}")))?;
    Ok(curve)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn csv_has_header_and_one_row_per_point() {
        let dir = std::env::temp_dir().join("xs-curves-test-csv");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("curve.csv");

        write_curve_csv(&path, &[1.0e2, 1.0e3], &[1.5e-20, 2.5e-20]).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines[0], "energy_ev,sigma_m2");
        assert_eq!(lines.len(), 3);
        assert!(lines[1].starts_with("1.000000000e2,"));

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn curve_json_round_trips() {
        let dir = std::env::temp_dir().join("xs-curves-test-json");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("curve.json");

        let curve = CurveFile::new(
            "H+ + H2 -> total fast H",
            "Total H production from H+ + H2.",
            (3.16, 1.0e5),
            vec![10.0, 100.0],
            vec![1e-20, 2e-20],
        );
        write_curve_json(&path, &curve).unwrap();
        let back = read_curve_json(&path).unwrap();
        assert_eq!(back.tool, "xs");
        assert_eq!(back.label, curve.label);
        assert_eq!(back.energy_ev, curve.energy_ev);
        assert_eq!(back.sigma_m2, curve.sigma_m2);

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn missing_directory_is_an_io_error() {
        let path = Path::new("/nonexistent-xs-curves/curve.csv");
        let err = write_curve_csv(path, &[1.0], &[1.0]).unwrap_err();
        assert!(matches!(err, FitError::Io(_)));
        assert_eq!(err.exit_code(), 4);
    }
}
