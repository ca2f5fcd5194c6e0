//! Price series models

use chrono::NaiveDate;

use crate::utils::errors::AnalysisError;

/// A single trading day close
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub close: f64,
}

impl PricePoint {
    pub fn new(date: NaiveDate, close: f64) -> Self {
        Self { date, close }
    }
}

/// Chronologically ordered closing prices, one entry per trading day
#[derive(Debug, Clone, PartialEq)]
pub struct PriceSeries {
    points: Vec<PricePoint>,
}

impl PriceSeries {
    /// Build a series, rejecting out-of-order or duplicate dates and
    /// prices that cannot be used as a percent-change base.
    pub fn new(points: Vec<PricePoint>) -> Result<Self, AnalysisError> {
        for (i, point) in points.iter().enumerate() {
            if !point.close.is_finite() || point.close <= 0.0 {
                return Err(AnalysisError::InvalidSeries(format!(
                    "close on {} must be a positive number, got {}",
                    point.date, point.close
                )));
            }
            if i > 0 && point.date <= points[i - 1].date {
                return Err(AnalysisError::InvalidSeries(format!(
                    "dates must be strictly increasing ({} follows {})",
                    point.date,
                    points[i - 1].date
                )));
            }
        }

        Ok(Self { points })
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.points.first().map(|p| p.date)
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.points.last().map(|p| p.date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    #[test]
    fn test_accepts_increasing_dates() {
        let series = PriceSeries::new(vec![
            PricePoint::new(day(2), 100.0),
            PricePoint::new(day(3), 101.5),
        ])
        .expect("valid series");

        assert_eq!(series.len(), 2);
        assert_eq!(series.points()[1].close, 101.5);
        assert_eq!(series.first_date(), Some(day(2)));
        assert_eq!(series.last_date(), Some(day(3)));
    }

    #[test]
    fn test_rejects_duplicate_dates() {
        let result = PriceSeries::new(vec![
            PricePoint::new(day(2), 100.0),
            PricePoint::new(day(2), 101.0),
        ]);
        assert!(matches!(result, Err(AnalysisError::InvalidSeries(_))));
    }

    #[test]
    fn test_rejects_unusable_prices() {
        let zero = PriceSeries::new(vec![PricePoint::new(day(2), 0.0)]);
        assert!(matches!(zero, Err(AnalysisError::InvalidSeries(_))));

        let nan = PriceSeries::new(vec![PricePoint::new(day(2), f64::NAN)]);
        assert!(matches!(nan, Err(AnalysisError::InvalidSeries(_))));
    }
}
