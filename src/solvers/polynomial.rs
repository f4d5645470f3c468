//! Polynomial trend over the positions of a univariate series.

use crate::solvers::traits::{RegressionError, UnivariateModel};
use crate::utils::fit_least_squares;
use faer::{Col, Mat};

/// Univariate polynomial regression on the time index.
///
/// Builds the Vandermonde matrix `[1, t, t², …, t^degree]` for
/// `t = 0, 1, …, n-1`, fits it by least squares, and forecasts at `t = n`.
#[derive(Debug, Clone)]
pub struct PolynomialRegression {
    degree: usize,
    fit: Option<PolynomialFit>,
}

#[derive(Debug, Clone)]
struct PolynomialFit {
    coefficients: Col<f64>,
    n_observations: usize,
}

impl PolynomialRegression {
    /// Create an untrained model of the given degree.
    pub fn new(degree: usize) -> Self {
        Self { degree, fit: None }
    }

    /// Degree of the fitted polynomial.
    pub fn degree(&self) -> usize {
        self.degree
    }

    /// Fitted coefficients `[a₀, a₁, …, a_degree]`.
    pub fn coefficients(&self) -> Option<&Col<f64>> {
        self.fit.as_ref().map(|f| &f.coefficients)
    }

    fn evaluate(coefficients: &Col<f64>, t: f64) -> f64 {
        // Horner's scheme
        (0..coefficients.nrows())
            .rev()
            .fold(0.0, |acc, j| acc * t + coefficients[j])
    }
}

impl UnivariateModel for PolynomialRegression {
    fn name(&self) -> String {
        format!("PolynomialRegression (deg={})", self.degree)
    }

    fn train(&mut self, series: &Col<f64>) -> Result<(), RegressionError> {
        let n = series.nrows();
        if n == 0 {
            return Err(RegressionError::EmptyData);
        }

        let vandermonde = Mat::from_fn(n, self.degree + 1, |i, j| (i as f64).powi(j as i32));
        let coefficients = fit_least_squares(&vandermonde, series)?;

        self.fit = Some(PolynomialFit {
            coefficients,
            n_observations: n,
        });
        Ok(())
    }

    fn predict_next(&self) -> Result<f64, RegressionError> {
        let fit = self.fit.as_ref().ok_or_else(|| RegressionError::NotTrained {
            model: self.name(),
        })?;
        Ok(Self::evaluate(&fit.coefficients, fit.n_observations as f64))
    }
}
