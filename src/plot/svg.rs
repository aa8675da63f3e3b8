//! SVG chart rendering via Plotters.

use std::path::Path;

use plotters::prelude::*;

use crate::error::FitError;
use crate::plot::{log_log_bounds, CurveSeries};

/// High-contrast palette cycled across series.
const SERIES_COLORS: [RGBColor; 6] = [
    RGBColor(31, 119, 180),
    RGBColor(255, 127, 14),
    RGBColor(44, 160, 44),
    RGBColor(214, 39, 40),
    RGBColor(148, 103, 189),
    RGBColor(140, 86, 75),
];

/// Render one or more sampled curves into a log-log SVG chart.
///
/// The target must have a usable pixel area and the series must contain at
/// least one finite positive point; otherwise the surface is rejected with
/// [`FitError::InvalidPlotTarget`].
pub fn render_svg_chart(
    path: &Path,
    title: &str,
    series: &[CurveSeries],
    size: (u32, u32),
) -> Result<(), FitError> {
    let (width, height) = size;
    if width < 100 || height < 100 {
        return Err(FitError::InvalidPlotTarget(format!(
            "chart surface {width}x{height} is too small to host axes."
        )));
    }
    let ([x0, x1], [y0, y1]) = log_log_bounds(series).ok_or_else(|| {
        FitError::InvalidPlotTarget(
            "no finite positive points to draw on log-log axes.".to_string(),
        )
    })?;

    let root = SVGBackend::new(path, (width, height)).into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| FitError::Io(format!("Failed to prepare SVG chart: {e}")))?;

    let mut chart = ChartBuilder::on(&root)
        .margin(10)
        .caption(title, ("sans-serif", 20))
        .set_label_area_size(LabelAreaPosition::Left, 60)
        .set_label_area_size(LabelAreaPosition::Bottom, 40)
        .build_cartesian_2d((x0..x1).log_scale(), (y0..y1).log_scale())
        .map_err(|e| FitError::Io(format!("Failed to build SVG chart axes: {e}")))?;

    chart
        .configure_mesh()
        .x_desc("Energy (eV)")
        .y_desc("Cross section (m^2)")
        .x_label_formatter(&|v| format!("{v:.0e}"))
        .y_label_formatter(&|v| format!("{v:.0e}"))
        .draw()
        .map_err(|e| FitError::Io(format!("Failed to draw SVG chart mesh: {e}")))?;

    for (i, s) in series.iter().enumerate() {
        let color = SERIES_COLORS[i % SERIES_COLORS.len()];
        let drawable: Vec<(f64, f64)> = s
            .points
            .iter()
            .copied()
            .filter(|&(x, y)| x.is_finite() && y.is_finite() && x > 0.0 && y > 0.0)
            .collect();
        chart
            .draw_series(LineSeries::new(drawable, &color))
            .map_err(|e| FitError::Io(format!("Failed to draw series '{}': {e}", s.label)))?
            .label(s.label.clone())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));
    }

    chart
        .configure_series_labels()
        .border_style(&BLACK)
        .background_style(&WHITE.mix(0.8))
        .draw()
        .map_err(|e| FitError::Io(format!("Failed to draw SVG chart legend: {e}")))?;

    root.present()
        .map_err(|e| FitError::Io(format!("Failed to write SVG chart '{}': {e}", path.display())))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(label: &str) -> CurveSeries {
        CurveSeries {
            label: label.to_string(),
            points: (1..=10).map(|i| (i as f64 * 10.0, 1e-20 * i as f64)).collect(),
        }
    }

    #[test]
    fn tiny_surface_is_rejected_before_any_io() {
        let err = render_svg_chart(Path::new("unused.svg"), "t", &[line("a")], (10, 10))
            .unwrap_err();
        assert!(matches!(err, FitError::InvalidPlotTarget(_)));
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn all_nonpositive_series_is_rejected() {
        let series = [CurveSeries {
            label: "zeros".to_string(),
            points: vec![(10.0, 0.0), (20.0, 0.0)],
        }];
        let dir = std::env::temp_dir().join("xs-curves-test-svg-reject");
        std::fs::create_dir_all(&dir).unwrap();
        let err = render_svg_chart(&dir.join("z.svg"), "t", &series, (640, 480)).unwrap_err();
        assert!(matches!(err, FitError::InvalidPlotTarget(_)));
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn chart_file_is_written() {
        let dir = std::env::temp_dir().join("xs-curves-test-svg");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("chart.svg");

        render_svg_chart(&path, "cross sections", &[line("a"), line("b")], (640, 480)).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("<svg"));

        std::fs::remove_dir_all(&dir).ok();
    }
}
