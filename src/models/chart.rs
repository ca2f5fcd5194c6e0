//! Chart generation models

use crate::models::{Moments, ReturnSeries};

/// Everything a renderer needs to draw the fat tail chart
#[derive(Debug, Clone)]
pub struct ChartRequest<'a> {
    pub label: &'a str,
    pub returns: &'a ReturnSeries,
    pub moments: Moments,
    pub bins: usize,
}

/// One equal-width histogram bin
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistogramBin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
    /// count / (total * width), so the bars integrate to 1
    pub density: f64,
}

impl HistogramBin {
    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }
}

/// Density-normalized histogram of the returns
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    pub bins: Vec<HistogramBin>,
}

impl Histogram {
    pub fn max_density(&self) -> f64 {
        self.bins.iter().map(|b| b.density).fold(0.0, f64::max)
    }

    /// (lowest edge, highest edge)
    pub fn range(&self) -> Option<(f64, f64)> {
        match (self.bins.first(), self.bins.last()) {
            (Some(first), Some(last)) => Some((first.lower, last.upper)),
            _ => None,
        }
    }
}

/// Sampled theoretical normal density
#[derive(Debug, Clone, PartialEq)]
pub struct DensityCurve {
    pub points: Vec<(f64, f64)>,
}

impl DensityCurve {
    pub fn max_density(&self) -> f64 {
        self.points.iter().map(|&(_, y)| y).fold(0.0, f64::max)
    }
}
