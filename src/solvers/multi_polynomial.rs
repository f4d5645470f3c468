//! Multivariate polynomial regression with cross-validated degree.

use crate::solvers::traits::{check_training_data, MultivariateModel, RegressionError};
use crate::utils::{dot, fit_least_squares, PolynomialExpander};
use crate::validation::cross_validate_r2;
use faer::{Col, Mat};

/// Polynomial regression on all monomials of the features.
///
/// Every degree from 1 to `max_degree` is scored with k-fold
/// cross-validation; the degree with the highest mean R² wins (ties keep the
/// lower degree). The full training set is then expanded at that degree and
/// fitted by least squares. The constant monomial serves as the intercept.
#[derive(Debug, Clone)]
pub struct MultivariatePolynomialRegression {
    max_degree: usize,
    folds: usize,
    fit: Option<SelectedFit>,
}

#[derive(Debug, Clone)]
struct SelectedFit {
    degree: usize,
    cv_r_squared: f64,
    weights: Col<f64>,
}

impl MultivariatePolynomialRegression {
    /// Create an untrained model searching degrees `1..=max_degree` with 5 folds.
    pub fn new(max_degree: usize) -> Self {
        Self::with_folds(max_degree, 5)
    }

    /// Create an untrained model with a custom number of folds.
    pub fn with_folds(max_degree: usize, folds: usize) -> Self {
        Self {
            max_degree,
            folds,
            fit: None,
        }
    }

    /// Highest degree considered during selection.
    pub fn max_degree(&self) -> usize {
        self.max_degree
    }

    /// Degree chosen by cross-validation, if trained.
    pub fn selected_degree(&self) -> Option<usize> {
        self.fit.as_ref().map(|f| f.degree)
    }

    /// Mean cross-validated R² of the chosen degree, if trained.
    pub fn cv_r_squared(&self) -> Option<f64> {
        self.fit.as_ref().map(|f| f.cv_r_squared)
    }

    /// Fitted weights over the expanded features.
    pub fn weights(&self) -> Option<&Col<f64>> {
        self.fit.as_ref().map(|f| &f.weights)
    }

    fn select_degree(&self, x: &Mat<f64>, y: &Col<f64>) -> Result<(usize, f64), RegressionError> {
        let mut best: Option<(usize, f64)> = None;
        let mut last_error = None;

        for degree in 1..=self.max_degree {
            match cross_validate_r2(x, y, degree, self.folds) {
                Ok(score) => {
                    tracing::debug!(degree, cv_r_squared = score, "cross-validated degree");
                    if best.map_or(!score.is_nan(), |(_, b)| score > b) {
                        best = Some((degree, score));
                    }
                }
                Err(e) => {
                    tracing::debug!(degree, error = %e, "skipping degree");
                    last_error = Some(e);
                }
            }
        }

        match (best, last_error) {
            (Some(selected), _) => Ok(selected),
            (None, Some(e)) => Err(e),
            (None, None) => Err(RegressionError::InsufficientObservations {
                needed: self.folds,
                got: x.nrows(),
            }),
        }
    }
}

impl MultivariateModel for MultivariatePolynomialRegression {
    fn name(&self) -> String {
        format!("MultivariatePolyRegression (maxDeg={})", self.max_degree)
    }

    fn train(&mut self, x: &Mat<f64>, y: &Col<f64>) -> Result<(), RegressionError> {
        check_training_data(x, y)?;

        let (degree, cv_r_squared) = self.select_degree(x, y)?;
        tracing::debug!(degree, cv_r_squared, "selected polynomial degree");

        let expanded = PolynomialExpander::new(degree).expand(x);
        let weights = fit_least_squares(&expanded, y)?;

        self.fit = Some(SelectedFit {
            degree,
            cv_r_squared,
            weights,
        });
        Ok(())
    }

    fn predict(&self, features: &Col<f64>) -> Result<f64, RegressionError> {
        let fit = self.fit.as_ref().ok_or_else(|| RegressionError::NotTrained {
            model: self.name(),
        })?;
        let expanded = PolynomialExpander::new(fit.degree).expand_single(features);
        dot(&fit.weights, &expanded)
    }
}
