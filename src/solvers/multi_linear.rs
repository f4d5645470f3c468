//! Multi-feature linear regression via the normal equation.

use crate::solvers::traits::{check_training_data, MultivariateModel, RegressionError};
use crate::utils::{add_bias_column, fit_least_squares};
use faer::{Col, Mat};

/// Linear regression on a feature matrix with an intercept.
///
/// A constant 1.0 column is prepended to `X` and the weights are the
/// normal-equation solution `θ = (X'X)⁻¹X'y`. `θ[0]` is the intercept.
#[derive(Debug, Clone, Default)]
pub struct MultiFeatureLinearRegression {
    weights: Option<Col<f64>>,
}

impl MultiFeatureLinearRegression {
    /// Create an untrained model.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fitted weights, intercept first.
    pub fn weights(&self) -> Option<&Col<f64>> {
        self.weights.as_ref()
    }
}

impl MultivariateModel for MultiFeatureLinearRegression {
    fn name(&self) -> String {
        "MultiFeatureLinearRegression".to_string()
    }

    fn train(&mut self, x: &Mat<f64>, y: &Col<f64>) -> Result<(), RegressionError> {
        check_training_data(x, y)?;
        let weights = fit_least_squares(&add_bias_column(x), y)?;
        self.weights = Some(weights);
        Ok(())
    }

    fn predict(&self, features: &Col<f64>) -> Result<f64, RegressionError> {
        let weights = self.weights.as_ref().ok_or_else(|| RegressionError::NotTrained {
            model: self.name(),
        })?;
        predict_with_bias(weights, features)
    }
}

/// Evaluate `w[0] + Σ w[j + 1] * x[j]`.
pub(crate) fn predict_with_bias(
    weights: &Col<f64>,
    features: &Col<f64>,
) -> Result<f64, RegressionError> {
    if weights.nrows() != features.nrows() + 1 {
        return Err(RegressionError::LengthMismatch {
            expected: weights.nrows() - 1,
            got: features.nrows(),
        });
    }

    let mut result = weights[0];
    for j in 0..features.nrows() {
        result += weights[j + 1] * features[j];
    }
    Ok(result)
}
