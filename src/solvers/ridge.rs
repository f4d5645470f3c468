//! Ridge regression (L2 regularization) solver.

use crate::solvers::multi_linear::predict_with_bias;
use crate::solvers::traits::{check_training_data, MultivariateModel, RegressionError};
use crate::utils::{add_bias_column, solve_normal_equation};
use faer::{Col, Mat};

/// Ridge regression estimator.
///
/// Solves `θ = (X'X + λI)⁻¹X'y` on the bias-augmented design matrix.
///
/// The penalty is added to every diagonal entry of `X'X`, including the one
/// belonging to the intercept column, so large λ shrinks the intercept
/// toward zero together with the slopes.
///
/// # Example
///
/// ```rust,ignore
/// use regress_select::solvers::{MultivariateModel, RidgeRegression};
///
/// let mut model = RidgeRegression::new(0.5);
/// model.train(&x, &y)?;
/// let forecast = model.predict(&latest)?;
/// ```
#[derive(Debug, Clone)]
pub struct RidgeRegression {
    lambda: f64,
    weights: Option<Col<f64>>,
}

impl RidgeRegression {
    /// Create an untrained model with the given L2 penalty.
    pub fn new(lambda: f64) -> Self {
        Self {
            lambda,
            weights: None,
        }
    }

    /// The regularization parameter.
    pub fn lambda(&self) -> f64 {
        self.lambda
    }

    /// Fitted weights, intercept first.
    pub fn weights(&self) -> Option<&Col<f64>> {
        self.weights.as_ref()
    }
}

impl MultivariateModel for RidgeRegression {
    fn name(&self) -> String {
        format!("RidgeRegression (λ={})", self.lambda)
    }

    fn train(&mut self, x: &Mat<f64>, y: &Col<f64>) -> Result<(), RegressionError> {
        check_training_data(x, y)?;
        let weights = solve_normal_equation(&add_bias_column(x), y, self.lambda)?;
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
