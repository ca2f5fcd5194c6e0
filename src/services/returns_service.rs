use crate::models::{PriceSeries, ReturnPoint, ReturnSeries};
use crate::utils::errors::AnalysisError;

/// Daily percent changes, dated with the later session of each pair
///
/// The first session has no predecessor, so the result is one entry shorter
/// than the prices.
pub fn calculate_returns(prices: &PriceSeries) -> Result<ReturnSeries, AnalysisError> {
    if prices.len() < 2 {
        return Err(AnalysisError::InsufficientData(format!(
            "need at least 2 prices to compute returns, got {}",
            prices.len()
        )));
    }

    let points = prices
        .points()
        .windows(2)
        .map(|pair| ReturnPoint {
            date: pair[1].date,
            percent: 100.0 * (pair[1].close - pair[0].close) / pair[0].close,
        })
        .collect();

    Ok(ReturnSeries::new(points))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PricePoint;
    use chrono::NaiveDate;

    fn series(closes: &[f64]) -> PriceSeries {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let points = closes
            .iter()
            .enumerate()
            .map(|(i, &close)| PricePoint::new(start + chrono::Duration::days(i as i64), close))
            .collect();
        PriceSeries::new(points).unwrap()
    }

    #[test]
    fn test_known_returns() {
        let returns = calculate_returns(&series(&[100.0, 102.0, 101.0, 105.0])).unwrap();
        let values = returns.values();

        assert_eq!(values.len(), 3);
        assert!((values[0] - 2.0).abs() < 1e-9);
        assert!((values[1] - -0.9804).abs() < 1e-4);
        assert!((values[2] - 3.9604).abs() < 1e-4);
    }

    #[test]
    fn test_length_and_formula_hold_for_every_index() {
        let closes = [50.0, 51.25, 49.8, 49.8, 60.1, 58.0, 58.7];
        let returns = calculate_returns(&series(&closes)).unwrap();

        assert_eq!(returns.len(), closes.len() - 1);
        for (i, value) in returns.values().iter().enumerate() {
            let expected = 100.0 * (closes[i + 1] - closes[i]) / closes[i];
            assert!((value - expected).abs() < 1e-12);
        }
    }

    #[test]
    fn test_returns_take_later_date() {
        let prices = series(&[10.0, 11.0]);
        let returns = calculate_returns(&prices).unwrap();
        assert_eq!(returns.points()[0].date, prices.points()[1].date);
    }

    #[test]
    fn test_single_price_fails() {
        let result = calculate_returns(&series(&[100.0]));
        assert!(matches!(result, Err(AnalysisError::InsufficientData(_))));
    }

    #[test]
    fn test_empty_series_fails() {
        let result = calculate_returns(&series(&[]));
        assert!(matches!(result, Err(AnalysisError::InsufficientData(_))));
    }
}
