//! Return series models

use chrono::NaiveDate;

/// Percent change between a trading day and the one before it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReturnPoint {
    pub date: NaiveDate,
    pub percent: f64,
}

/// Daily percent returns, one entry fewer than the prices they came from
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ReturnSeries {
    points: Vec<ReturnPoint>,
}

impl ReturnSeries {
    pub fn new(points: Vec<ReturnPoint>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[ReturnPoint] {
        &self.points
    }

    /// Return values in chronological order
    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.percent).collect()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
