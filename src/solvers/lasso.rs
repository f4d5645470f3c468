//! Lasso regression (L1 regularization) via coordinate descent.

use crate::solvers::traits::{check_training_data, MultivariateModel, RegressionError};
use crate::utils::dot;
use faer::{Col, Mat};

/// Lasso regression estimator using coordinate descent.
///
/// Minimizes `(1/2n)||y - Xw||² + λ||w||₁` one weight at a time on the raw
/// feature matrix. No intercept column is added: the model assumes centred
/// (z-scored) features and fits the targets through the origin, unlike the
/// other multivariate models.
///
/// Each sweep updates `w[j] = S(ρⱼ, λ)` where `ρⱼ = (1/n) Σᵢ xᵢⱼ (yᵢ − Σ_{k≠j} xᵢₖ wₖ)`
/// and `S` is the soft-thresholding operator. Iteration stops after
/// `max_iterations` sweeps or once the summed absolute weight change of a
/// sweep falls below `tolerance`.
#[derive(Debug, Clone)]
pub struct LassoRegression {
    lambda: f64,
    max_iterations: usize,
    tolerance: f64,
    fit: Option<LassoFit>,
}

#[derive(Debug, Clone)]
struct LassoFit {
    weights: Col<f64>,
    iterations: usize,
    converged: bool,
}

impl LassoRegression {
    /// Create an untrained model with default convergence settings.
    pub fn new(lambda: f64) -> Self {
        Self::builder().lambda(lambda).build()
    }

    /// Create a builder for configuring the model.
    pub fn builder() -> LassoRegressionBuilder {
        LassoRegressionBuilder::default()
    }

    /// Soft thresholding operator: S(z, γ) = sign(z) * max(|z| - γ, 0)
    fn soft_threshold(z: f64, gamma: f64) -> f64 {
        if z > gamma {
            z - gamma
        } else if z < -gamma {
            z + gamma
        } else {
            0.0
        }
    }

    /// The regularization parameter.
    pub fn lambda(&self) -> f64 {
        self.lambda
    }

    /// Fitted weights, one per raw feature.
    pub fn weights(&self) -> Option<&Col<f64>> {
        self.fit.as_ref().map(|f| &f.weights)
    }

    /// Number of sweeps performed by the last fit.
    pub fn iterations(&self) -> Option<usize> {
        self.fit.as_ref().map(|f| f.iterations)
    }

    /// Whether the last fit met the tolerance before the iteration cap.
    pub fn converged(&self) -> Option<bool> {
        self.fit.as_ref().map(|f| f.converged)
    }

    /// Count non-zero weights (sparsity).
    pub fn n_nonzero(&self) -> usize {
        self.weights()
            .map_or(0, |w| w.iter().filter(|&&c| c != 0.0).count())
    }

    fn coordinate_descent(&self, x: &Mat<f64>, y: &Col<f64>) -> LassoFit {
        let n_samples = x.nrows();
        let n_features = x.ncols();
        let n = n_samples as f64;

        let mut weights: Col<f64> = Col::zeros(n_features);

        for iter in 0..self.max_iterations {
            let mut change = 0.0;

            for j in 0..n_features {
                let mut rho = 0.0;
                for i in 0..n_samples {
                    let mut partial = 0.0;
                    for k in 0..n_features {
                        if k != j {
                            partial += x[(i, k)] * weights[k];
                        }
                    }
                    rho += x[(i, j)] * (y[i] - partial);
                }
                rho /= n;

                let updated = Self::soft_threshold(rho, self.lambda);
                change += (updated - weights[j]).abs();
                weights[j] = updated;
            }

            if change < self.tolerance {
                return LassoFit {
                    weights,
                    iterations: iter + 1,
                    converged: true,
                };
            }
        }

        LassoFit {
            weights,
            iterations: self.max_iterations,
            converged: false,
        }
    }
}

impl MultivariateModel for LassoRegression {
    fn name(&self) -> String {
        format!("LassoRegression (λ={})", self.lambda)
    }

    fn train(&mut self, x: &Mat<f64>, y: &Col<f64>) -> Result<(), RegressionError> {
        check_training_data(x, y)?;

        let fit = self.coordinate_descent(x, y);
        if !fit.converged {
            tracing::debug!(
                iterations = fit.iterations,
                lambda = self.lambda,
                "lasso stopped at the iteration cap"
            );
        }
        self.fit = Some(fit);
        Ok(())
    }

    fn predict(&self, features: &Col<f64>) -> Result<f64, RegressionError> {
        let weights = self.weights().ok_or_else(|| RegressionError::NotTrained {
            model: self.name(),
        })?;
        dot(weights, features)
    }
}

/// Builder for `LassoRegression`.
#[derive(Debug, Clone)]
pub struct LassoRegressionBuilder {
    lambda: f64,
    max_iterations: usize,
    tolerance: f64,
}

impl Default for LassoRegressionBuilder {
    fn default() -> Self {
        Self {
            lambda: 0.1,
            max_iterations: 1000,
            tolerance: 1e-4,
        }
    }
}

impl LassoRegressionBuilder {
    /// Set the regularization parameter (lambda).
    pub fn lambda(mut self, lambda: f64) -> Self {
        self.lambda = lambda;
        self
    }

    /// Set maximum coordinate descent sweeps.
    pub fn max_iterations(mut self, max_iter: usize) -> Self {
        self.max_iterations = max_iter;
        self
    }

    /// Set convergence tolerance.
    pub fn tolerance(mut self, tol: f64) -> Self {
        self.tolerance = tol;
        self
    }

    /// Build the Lasso model.
    pub fn build(self) -> LassoRegression {
        LassoRegression {
            lambda: self.lambda,
            max_iterations: self.max_iterations,
            tolerance: self.tolerance,
            fit: None,
        }
    }
}
