//! Straight-line trend over the positions of a univariate series.

use crate::solvers::traits::{RegressionError, UnivariateModel};
use faer::Col;

/// Univariate linear regression on the time index.
///
/// Fits `y = slope * t + intercept` with `t = 0, 1, …, n-1` using the closed
/// form sums, and forecasts at `t = n`.
///
/// # Example
///
/// ```rust,ignore
/// use regress_select::solvers::{LinearRegression, UnivariateModel};
///
/// let mut model = LinearRegression::new();
/// model.train(&series)?;
/// let next = model.predict_next()?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct LinearRegression {
    fit: Option<LineFit>,
}

#[derive(Debug, Clone, Copy)]
struct LineFit {
    slope: f64,
    intercept: f64,
    n_observations: usize,
}

impl LinearRegression {
    /// Create an untrained model.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fitted slope, if trained.
    pub fn slope(&self) -> Option<f64> {
        self.fit.map(|f| f.slope)
    }

    /// Fitted intercept, if trained.
    pub fn intercept(&self) -> Option<f64> {
        self.fit.map(|f| f.intercept)
    }
}

impl UnivariateModel for LinearRegression {
    fn name(&self) -> String {
        "LinearRegression".to_string()
    }

    fn train(&mut self, series: &Col<f64>) -> Result<(), RegressionError> {
        let n = series.nrows();
        if n == 0 {
            return Err(RegressionError::EmptyData);
        }

        // A single point carries no trend.
        if n == 1 {
            self.fit = Some(LineFit {
                slope: 0.0,
                intercept: series[0],
                n_observations: 1,
            });
            return Ok(());
        }

        let count = n as f64;
        let mut sum_x = 0.0;
        let mut sum_y = 0.0;
        let mut sum_xy = 0.0;
        let mut sum_x2 = 0.0;
        for (i, &y) in series.iter().enumerate() {
            let x = i as f64;
            sum_x += x;
            sum_y += y;
            sum_xy += x * y;
            sum_x2 += x * x;
        }

        let denominator = count * sum_x2 - sum_x * sum_x;
        let slope = (count * sum_xy - sum_x * sum_y) / denominator;
        let intercept = (sum_y - slope * sum_x) / count;

        tracing::debug!(slope, intercept, n, "fitted linear trend");

        self.fit = Some(LineFit {
            slope,
            intercept,
            n_observations: n,
        });
        Ok(())
    }

    fn predict_next(&self) -> Result<f64, RegressionError> {
        let fit = self.fit.ok_or_else(|| RegressionError::NotTrained {
            model: self.name(),
        })?;
        Ok(fit.slope * fit.n_observations as f64 + fit.intercept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_perfect_trend() {
        let series = Col::from_fn(5, |i| 100.0 + i as f64);
        let mut model = LinearRegression::new();
        model.train(&series).unwrap();

        assert!((model.slope().unwrap() - 1.0).abs() < 1e-10);
        assert!((model.intercept().unwrap() - 100.0).abs() < 1e-10);
        assert!((model.predict_next().unwrap() - 105.0).abs() < 1e-10);
    }

    #[test]
    fn test_single_point() {
        let series = Col::from_fn(1, |_| 42.0);
        let mut model = LinearRegression::new();
        model.train(&series).unwrap();

        assert_eq!(model.slope(), Some(0.0));
        assert_eq!(model.predict_next().unwrap(), 42.0);
    }

    #[test]
    fn test_zero_series_is_trained() {
        // A flat zero series is a valid fit, not an untrained model.
        let series = Col::<f64>::zeros(4);
        let mut model = LinearRegression::new();
        model.train(&series).unwrap();

        assert_eq!(model.predict_next().unwrap(), 0.0);
    }

    #[test]
    fn test_predict_before_train() {
        let model = LinearRegression::new();
        assert!(matches!(
            model.predict_next(),
            Err(RegressionError::NotTrained { .. })
        ));
    }

    #[test]
    fn test_empty_series() {
        let mut model = LinearRegression::new();
        assert!(matches!(
            model.train(&Col::zeros(0)),
            Err(RegressionError::EmptyData)
        ));
    }
}
