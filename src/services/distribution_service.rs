use statrs::statistics::Statistics;

use crate::models::{Moments, ReturnSeries};
use crate::utils::errors::AnalysisError;

/// Mean and sample (n-1) standard deviation of the returns
pub fn analyze_distribution(returns: &ReturnSeries) -> Result<Moments, AnalysisError> {
    if returns.is_empty() {
        return Err(AnalysisError::InsufficientData(
            "cannot summarize an empty return series".to_string(),
        ));
    }

    let values = returns.values();
    let mean = Statistics::mean(&values);
    // n-1 is zero for a single observation
    let std_dev = if values.len() == 1 {
        0.0
    } else {
        Statistics::std_dev(&values)
    };

    Ok(Moments { mean, std_dev })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ReturnPoint;
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
    fn test_known_moments() {
        let moments = analyze_distribution(&returns(&[2.0, -0.9803921568627451, 3.9603960396039604])).unwrap();

        assert!((moments.mean - 1.6600).abs() < 1e-4);
        assert!((moments.std_dev - 2.4879).abs() < 1e-4);
    }

    #[test]
    fn test_matches_textbook_formulas() {
        let values = [0.5, -1.25, 3.0, 0.0, -0.75, 2.2];
        let moments = analyze_distribution(&returns(&values)).unwrap();

        let n = values.len() as f64;
        let mean = values.iter().sum::<f64>() / n;
        let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0);

        assert!((moments.mean - mean).abs() < 1e-12);
        assert!((moments.std_dev - variance.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_constant_returns_are_degenerate() {
        let moments = analyze_distribution(&returns(&[0.4, 0.4, 0.4])).unwrap();

        assert!((moments.mean - 0.4).abs() < 1e-12);
        assert!(moments.std_dev.abs() < 1e-12);
        assert!(moments.is_degenerate());
    }

    #[test]
    fn test_single_return_has_zero_spread() {
        let moments = analyze_distribution(&returns(&[1.5])).unwrap();
        assert_eq!(moments.mean, 1.5);
        assert_eq!(moments.std_dev, 0.0);
    }

    #[test]
    fn test_empty_returns_fail() {
        let result = analyze_distribution(&ReturnSeries::default());
        assert!(matches!(result, Err(AnalysisError::InsufficientData(_))));
    }

    #[test]
    fn test_repeated_runs_are_identical() {
        let series = returns(&[1.0, -2.0, 0.5, 0.25]);
        assert_eq!(
            analyze_distribution(&series).unwrap(),
            analyze_distribution(&series).unwrap()
        );
    }
}
