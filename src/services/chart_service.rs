use plotters::prelude::*;
use statrs::distribution::{Continuous, Normal};
use tracing::{debug, warn};

use crate::models::{ChartRequest, DensityCurve, Histogram, HistogramBin, Moments};
use crate::utils::errors::AnalysisError;

/// Bars in the empirical histogram
pub const HISTOGRAM_BINS: usize = 200;
/// Samples along the theoretical curve
pub const CURVE_POINTS: usize = 1000;
/// Half-width of the curve's x-range, in standard deviations
pub const CURVE_SPAN: f64 = 4.0;

/// Turns a chart request into an encoded image
pub trait ChartRenderer {
    /// Render the chart and return the encoded PNG bytes
    fn render(&self, request: &ChartRequest<'_>) -> Result<Vec<u8>, AnalysisError>;
}

/// Chart title for a ticker
pub fn chart_title(label: &str) -> String {
    format!("{} Daily Returns vs. Normal Distribution (Fat Tail Analysis)", label)
}

/// Density-normalized histogram with `bins` equal-width bins over the data range
///
/// Each value lands in `[lower, upper)`, except the maximum which falls in the
/// last bin. When every value is identical the range is widened by 0.5 on each
/// side. NaNs are ignored.
pub fn build_histogram(values: &[f64], bins: usize) -> Histogram {
    let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if finite.is_empty() || bins == 0 {
        return Histogram { bins: Vec::new() };
    }

    let mut min = finite.iter().copied().fold(f64::INFINITY, f64::min);
    let mut max = finite.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if min == max {
        min -= 0.5;
        max += 0.5;
    }

    let width = (max - min) / bins as f64;
    let mut counts = vec![0usize; bins];
    for v in &finite {
        let idx = ((v - min) / width).floor() as usize;
        counts[idx.min(bins - 1)] += 1;
    }

    let total = finite.len() as f64;
    let bins = counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| {
            let lower = min + i as f64 * width;
            let upper = if i + 1 == bins { max } else { min + (i + 1) as f64 * width };
            HistogramBin {
                lower,
                upper,
                count,
                density: count as f64 / (total * width),
            }
        })
        .collect();

    Histogram { bins }
}

/// Normal density sampled on `mean ± 4σ`
///
/// Returns `None` when the moments cannot define a normal distribution.
pub fn normal_curve(moments: &Moments, points: usize) -> Option<DensityCurve> {
    if moments.is_degenerate() || points < 2 {
        return None;
    }
    let normal = Normal::new(moments.mean, moments.std_dev).ok()?;

    let start = moments.mean - CURVE_SPAN * moments.std_dev;
    let end = moments.mean + CURVE_SPAN * moments.std_dev;
    let step = (end - start) / (points - 1) as f64;

    let points = (0..points)
        .map(|i| {
            let x = start + i as f64 * step;
            (x, normal.pdf(x))
        })
        .collect();

    Some(DensityCurve { points })
}

/// Bitmap renderer backed by plotters
#[derive(Debug, Clone, Copy)]
pub struct PlottersRenderer {
    pub width: u32,
    pub height: u32,
}

impl Default for PlottersRenderer {
    /// 14 x 7 inches at 100 dpi
    fn default() -> Self {
        Self {
            width: 1400,
            height: 700,
        }
    }
}

impl ChartRenderer for PlottersRenderer {
    fn render(&self, request: &ChartRequest<'_>) -> Result<Vec<u8>, AnalysisError> {
        let histogram = build_histogram(&request.returns.values(), request.bins);
        let (hist_min, hist_max) = histogram
            .range()
            .ok_or_else(|| AnalysisError::Chart("No returns to plot".to_string()))?;

        let curve = normal_curve(&request.moments, CURVE_POINTS);
        if curve.is_none() {
            warn!(
                "Standard deviation is {}, skipping the normal distribution overlay",
                request.moments.std_dev
            );
        }

        // Axis range covers both the bars and the curve
        let (mut x_min, mut x_max) = (hist_min, hist_max);
        let mut y_max = histogram.max_density();
        if let Some(curve) = &curve {
            if let (Some(first), Some(last)) = (curve.points.first(), curve.points.last()) {
                x_min = x_min.min(first.0);
                x_max = x_max.max(last.0);
            }
            y_max = y_max.max(curve.max_density());
        }
        let y_max = if y_max > 0.0 { y_max * 1.05 } else { 1.0 };

        debug!(
            "Rendering {} bins on x [{:.4}, {:.4}], y [0, {:.4}]",
            histogram.bins.len(),
            x_min,
            x_max,
            y_max
        );

        // Use a temporary file path for BitMapBackend
        let temp_file = std::env::temp_dir().join(format!(
            "fat_tail_chart_{}_{}.png",
            std::process::id(),
            chrono::Utc::now().timestamp_millis()
        ));

        {
            let backend = BitMapBackend::new(&temp_file, (self.width, self.height));
            let root = backend.into_drawing_area();
            root.fill(&WHITE)
                .map_err(|e| AnalysisError::Chart(format!("Failed to fill canvas: {}", e)))?;

            let mut chart = ChartBuilder::on(&root)
                .caption(chart_title(request.label), ("sans-serif", 30.0).into_font())
                .margin(15)
                .x_label_area_size(40)
                .y_label_area_size(60)
                .build_cartesian_2d(x_min..x_max, 0.0..y_max)
                .map_err(|e| AnalysisError::Chart(format!("Failed to build chart: {}", e)))?;

            chart
                .configure_mesh()
                .x_desc("Daily Return (%)")
                .y_desc("Probability Density")
                .bold_line_style(BLACK.mix(0.15))
                .light_line_style(BLACK.mix(0.05))
                .draw()
                .map_err(|e| AnalysisError::Chart(format!("Failed to draw mesh: {}", e)))?;

            let bar_style = BLUE.mix(0.6).filled();
            chart
                .draw_series(
                    histogram
                        .bins
                        .iter()
                        .filter(|bin| bin.count > 0)
                        .map(|bin| Rectangle::new([(bin.lower, 0.0), (bin.upper, bin.density)], bar_style)),
                )
                .map_err(|e| AnalysisError::Chart(format!("Failed to draw histogram: {}", e)))?
                .label(format!("Actual {} Returns", request.label))
                .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 20, y + 5)], bar_style));

            if let Some(curve) = curve {
                chart
                    .draw_series(LineSeries::new(curve.points, RED.stroke_width(2)))
                    .map_err(|e| AnalysisError::Chart(format!("Failed to draw density curve: {}", e)))?
                    .label("Normal Distribution (Theory)")
                    .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], RED.stroke_width(2)));
            }

            chart
                .configure_series_labels()
                .position(SeriesLabelPosition::UpperRight)
                .background_style(WHITE.mix(0.8))
                .border_style(BLACK)
                .draw()
                .map_err(|e| AnalysisError::Chart(format!("Failed to draw legend: {}", e)))?;

            root.present()
                .map_err(|e| AnalysisError::Chart(format!("Failed to render chart: {}", e)))?;
        }

        // Read the temporary file into memory
        let image_data = std::fs::read(&temp_file)?;

        // Clean up temporary file
        let _ = std::fs::remove_file(&temp_file);

        Ok(image_data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ReturnPoint, ReturnSeries};
    use chrono::NaiveDate;

    fn returns(values: &[f64]) -> ReturnSeries {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        ReturnSeries::new(
            values
                .iter()
                .enumerate()
                .map(|(i, &percent)| ReturnPoint {
                    date: start + chrono::Duration::days(i as i64),
                    percent,
                })
                .collect(),
        )
    }

    #[test]
    fn test_histogram_integrates_to_one() {
        let values: Vec<f64> = (0..500).map(|i| ((i * 37) % 101) as f64 / 10.0 - 5.0).collect();
        let histogram = build_histogram(&values, HISTOGRAM_BINS);

        assert_eq!(histogram.bins.len(), HISTOGRAM_BINS);
        let area: f64 = histogram.bins.iter().map(|b| b.density * b.width()).sum();
        assert!((area - 1.0).abs() < 1e-9);

        let counted: usize = histogram.bins.iter().map(|b| b.count).sum();
        assert_eq!(counted, values.len());
    }

    #[test]
    fn test_histogram_edges_and_maximum() {
        let histogram = build_histogram(&[0.0, 1.0, 2.0, 4.0], 4);

        assert_eq!(histogram.range(), Some((0.0, 4.0)));
        let counts: Vec<usize> = histogram.bins.iter().map(|b| b.count).collect();
        // 4.0 sits on the last edge and is counted in the last bin
        assert_eq!(counts, vec![1, 1, 1, 1]);
        assert!((histogram.bins[0].density - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_histogram_constant_values() {
        let histogram = build_histogram(&[0.3, 0.3, 0.3], 200);

        let (lo, hi) = histogram.range().unwrap();
        assert!((lo - -0.2).abs() < 1e-12);
        assert!((hi - 0.8).abs() < 1e-12);
        assert_eq!(histogram.bins.iter().filter(|b| b.count > 0).count(), 1);
    }

    #[test]
    fn test_histogram_is_reproducible() {
        let values = [1.0, -0.5, 0.25, 3.5, -2.0, 0.0];
        assert_eq!(build_histogram(&values, 200), build_histogram(&values, 200));
    }

    #[test]
    fn test_histogram_empty_input() {
        assert!(build_histogram(&[], 200).bins.is_empty());
        assert!(build_histogram(&[f64::NAN], 200).bins.is_empty());
    }

    #[test]
    fn test_normal_curve_shape() {
        let moments = Moments { mean: 0.05, std_dev: 1.2 };
        let curve = normal_curve(&moments, CURVE_POINTS).expect("curve");

        assert_eq!(curve.points.len(), CURVE_POINTS);
        let (first_x, _) = curve.points[0];
        let (last_x, _) = curve.points[CURVE_POINTS - 1];
        assert!((first_x - (0.05 - 4.8)).abs() < 1e-9);
        assert!((last_x - (0.05 + 4.8)).abs() < 1e-9);

        let peak = 1.0 / (1.2 * (2.0 * std::f64::consts::PI).sqrt());
        assert!((curve.max_density() - peak).abs() < 1e-4);
        assert!(curve.points.iter().all(|&(_, y)| y.is_finite() && y > 0.0));
    }

    #[test]
    fn test_normal_curve_skipped_for_zero_spread() {
        assert!(normal_curve(&Moments { mean: 0.3, std_dev: 0.0 }, CURVE_POINTS).is_none());
        assert!(normal_curve(&Moments { mean: 0.3, std_dev: f64::NAN }, CURVE_POINTS).is_none());
    }

    #[test]
    fn test_chart_title() {
        assert_eq!(
            chart_title("SPY"),
            "SPY Daily Returns vs. Normal Distribution (Fat Tail Analysis)"
        );
    }

    #[test]
    fn test_render_empty_returns_fails() {
        let series = ReturnSeries::default();
        let request = ChartRequest {
            label: "SPY",
            returns: &series,
            moments: Moments { mean: 0.0, std_dev: 1.0 },
            bins: HISTOGRAM_BINS,
        };

        let result = PlottersRenderer::default().render(&request);
        assert!(matches!(result, Err(AnalysisError::Chart(_))));
    }

    #[test]
    #[ignore] // Requires system fonts for text rendering
    fn test_render_png() {
        let series = returns(&[1.0, -0.5, 0.25, 3.5, -2.0, 0.0, 0.75]);
        let request = ChartRequest {
            label: "SPY",
            returns: &series,
            moments: Moments { mean: 0.43, std_dev: 1.7 },
            bins: HISTOGRAM_BINS,
        };

        let png = PlottersRenderer::default().render(&request).expect("render failed");
        assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
    }

    #[test]
    #[ignore] // Requires system fonts for text rendering
    fn test_render_zero_spread_without_overlay() {
        let series = returns(&[0.5, 0.5, 0.5]);
        let request = ChartRequest {
            label: "FLAT",
            returns: &series,
            moments: Moments { mean: 0.5, std_dev: 0.0 },
            bins: HISTOGRAM_BINS,
        };

        let png = PlottersRenderer::default().render(&request).expect("render failed");
        assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
    }
}
