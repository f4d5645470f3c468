//! Engine options and configuration.

use thiserror::Error;

/// Configuration for the model registry and the iterative solvers.
///
/// The defaults reproduce the standard model set: ridge with λ = 0.5, lasso
/// with λ = 0.1, and polynomial models for degrees 2 through 5 selected with
/// 5-fold cross-validation.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineOptions {
    /// L2 penalty for the ridge model (default: 0.5).
    pub ridge_lambda: f64,
    /// L1 penalty for the lasso model (default: 0.1).
    pub lasso_lambda: f64,
    /// Smallest polynomial degree registered (default: 2).
    pub min_polynomial_degree: usize,
    /// Largest polynomial degree registered (default: 5).
    pub max_polynomial_degree: usize,
    /// Number of folds used for polynomial degree selection (default: 5).
    pub cv_folds: usize,
    /// Maximum coordinate descent sweeps for lasso (default: 1000).
    pub lasso_max_iterations: usize,
    /// Lasso stops once the summed absolute weight change of a sweep drops below this.
    pub lasso_tolerance: f64,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            ridge_lambda: 0.5,
            lasso_lambda: 0.1,
            min_polynomial_degree: 2,
            max_polynomial_degree: 5,
            cv_folds: 5,
            lasso_max_iterations: 1000,
            lasso_tolerance: 1e-4,
        }
    }
}

/// Errors that can occur when validating engine options.
#[derive(Debug, Error, PartialEq)]
pub enum OptionsError {
    #[error("lambda must be non-negative, got {0}")]
    InvalidLambda(f64),
    #[error("polynomial degree must be at least 1, got {0}")]
    InvalidDegree(usize),
    #[error("polynomial degree range is empty: {min}..={max}")]
    EmptyDegreeRange { min: usize, max: usize },
    #[error("cross-validation needs at least 2 folds, got {0}")]
    InvalidFolds(usize),
    #[error("tolerance must be positive, got {0}")]
    InvalidTolerance(f64),
    #[error("max_iterations must be at least 1, got {0}")]
    InvalidMaxIterations(usize),
}

impl EngineOptions {
    /// Create a new builder for engine options.
    pub fn builder() -> EngineOptionsBuilder {
        EngineOptionsBuilder::default()
    }

    /// Polynomial degrees registered per prediction cycle.
    pub fn polynomial_degrees(&self) -> std::ops::RangeInclusive<usize> {
        self.min_polynomial_degree..=self.max_polynomial_degree
    }

    /// Validate the options and return an error if invalid.
    pub fn validate(&self) -> Result<(), OptionsError> {
        if self.ridge_lambda < 0.0 || self.ridge_lambda.is_nan() {
            return Err(OptionsError::InvalidLambda(self.ridge_lambda));
        }
        if self.lasso_lambda < 0.0 || self.lasso_lambda.is_nan() {
            return Err(OptionsError::InvalidLambda(self.lasso_lambda));
        }
        if self.min_polynomial_degree == 0 {
            return Err(OptionsError::InvalidDegree(self.min_polynomial_degree));
        }
        if self.min_polynomial_degree > self.max_polynomial_degree {
            return Err(OptionsError::EmptyDegreeRange {
                min: self.min_polynomial_degree,
                max: self.max_polynomial_degree,
            });
        }
        if self.cv_folds < 2 {
            return Err(OptionsError::InvalidFolds(self.cv_folds));
        }
        if self.lasso_tolerance <= 0.0 || self.lasso_tolerance.is_nan() {
            return Err(OptionsError::InvalidTolerance(self.lasso_tolerance));
        }
        if self.lasso_max_iterations < 1 {
            return Err(OptionsError::InvalidMaxIterations(
                self.lasso_max_iterations,
            ));
        }
        Ok(())
    }
}

/// Builder for `EngineOptions`.
#[derive(Debug, Clone, Default)]
pub struct EngineOptionsBuilder {
    options: EngineOptions,
}

impl EngineOptionsBuilder {
    /// Create a new builder with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the ridge penalty.
    pub fn ridge_lambda(mut self, lambda: f64) -> Self {
        self.options.ridge_lambda = lambda;
        self
    }

    /// Set the lasso penalty.
    pub fn lasso_lambda(mut self, lambda: f64) -> Self {
        self.options.lasso_lambda = lambda;
        self
    }

    /// Set the inclusive range of polynomial degrees to register.
    pub fn polynomial_degrees(mut self, min: usize, max: usize) -> Self {
        self.options.min_polynomial_degree = min;
        self.options.max_polynomial_degree = max;
        self
    }

    /// Set the number of cross-validation folds.
    pub fn cv_folds(mut self, folds: usize) -> Self {
        self.options.cv_folds = folds;
        self
    }

    /// Set the maximum coordinate descent sweeps for lasso.
    pub fn lasso_max_iterations(mut self, max_iter: usize) -> Self {
        self.options.lasso_max_iterations = max_iter;
        self
    }

    /// Set the lasso convergence tolerance.
    pub fn lasso_tolerance(mut self, tol: f64) -> Self {
        self.options.lasso_tolerance = tol;
        self
    }

    /// Build and validate the options.
    pub fn build(self) -> Result<EngineOptions, OptionsError> {
        self.options.validate()?;
        Ok(self.options)
    }

    /// Build the options without validation.
    pub fn build_unchecked(self) -> EngineOptions {
        self.options
    }
}
