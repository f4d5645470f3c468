//! Capability-tagged model handle and the catalogue of built-in models.

use crate::solvers::lasso::LassoRegression;
use crate::solvers::linear::LinearRegression;
use crate::solvers::multi_linear::MultiFeatureLinearRegression;
use crate::solvers::multi_polynomial::MultivariatePolynomialRegression;
use crate::solvers::polynomial::PolynomialRegression;
use crate::solvers::ridge::RidgeRegression;
use crate::solvers::traits::{Capability, MultivariateModel, RegressionError, UnivariateModel};
use faer::{Col, Mat};

/// A model together with the one kind of data it accepts.
///
/// The capability is fixed when the model is wrapped, so the manager branches
/// once per model instead of probing methods at call time. Calling the other
/// capability's methods returns [`RegressionError::UnsupportedMode`].
pub enum Model {
    Univariate(Box<dyn UnivariateModel>),
    Multivariate(Box<dyn MultivariateModel>),
}

impl Model {
    /// Wrap a univariate model.
    pub fn univariate<M: UnivariateModel + 'static>(model: M) -> Self {
        Model::Univariate(Box::new(model))
    }

    /// Wrap a multivariate model.
    pub fn multivariate<M: MultivariateModel + 'static>(model: M) -> Self {
        Model::Multivariate(Box::new(model))
    }

    /// Display name of the wrapped model.
    pub fn name(&self) -> String {
        match self {
            Model::Univariate(m) => m.name(),
            Model::Multivariate(m) => m.name(),
        }
    }

    /// The kind of data this model accepts.
    pub fn capability(&self) -> Capability {
        match self {
            Model::Univariate(_) => Capability::Univariate,
            Model::Multivariate(_) => Capability::Multivariate,
        }
    }

    /// Train on a scalar series.
    pub fn train_univariate(&mut self, series: &Col<f64>) -> Result<(), RegressionError> {
        match self {
            Model::Univariate(m) => m.train(series),
            Model::Multivariate(m) => Err(unsupported(m.name(), Capability::Univariate)),
        }
    }

    /// Forecast the next value of the training series.
    pub fn predict_next(&self) -> Result<f64, RegressionError> {
        match self {
            Model::Univariate(m) => m.predict_next(),
            Model::Multivariate(m) => Err(unsupported(m.name(), Capability::Univariate)),
        }
    }

    /// Train on a feature matrix and aligned targets.
    pub fn train_multivariate(&mut self, x: &Mat<f64>, y: &Col<f64>) -> Result<(), RegressionError> {
        match self {
            Model::Multivariate(m) => m.train(x, y),
            Model::Univariate(m) => Err(unsupported(m.name(), Capability::Multivariate)),
        }
    }

    /// Predict the target for one feature vector.
    pub fn predict(&self, features: &Col<f64>) -> Result<f64, RegressionError> {
        match self {
            Model::Multivariate(m) => m.predict(features),
            Model::Univariate(m) => Err(unsupported(m.name(), Capability::Multivariate)),
        }
    }
}

impl std::fmt::Debug for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Model")
            .field("name", &self.name())
            .field("capability", &self.capability())
            .finish()
    }
}

fn unsupported(model: String, mode: Capability) -> RegressionError {
    RegressionError::UnsupportedMode { model, mode }
}

/// The built-in model variants with their hyperparameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ModelKind {
    /// Straight line over the time index.
    Linear,
    /// Least squares on the raw features with an intercept.
    MultiFeatureLinear,
    /// L2-penalized least squares.
    Ridge { lambda: f64 },
    /// L1-penalized coordinate descent without an intercept.
    Lasso {
        lambda: f64,
        max_iterations: usize,
        tolerance: f64,
    },
    /// Polynomial over the time index.
    Polynomial { degree: usize },
    /// Polynomial features with the degree chosen by cross-validation.
    MultivariatePolynomial { max_degree: usize, folds: usize },
}

impl ModelKind {
    /// The kind of data models of this variant accept.
    pub fn capability(&self) -> Capability {
        match self {
            ModelKind::Linear | ModelKind::Polynomial { .. } => Capability::Univariate,
            _ => Capability::Multivariate,
        }
    }

    /// Create a fresh, untrained model.
    pub fn build(&self) -> Model {
        match *self {
            ModelKind::Linear => Model::univariate(LinearRegression::new()),
            ModelKind::MultiFeatureLinear => {
                Model::multivariate(MultiFeatureLinearRegression::new())
            }
            ModelKind::Ridge { lambda } => Model::multivariate(RidgeRegression::new(lambda)),
            ModelKind::Lasso {
                lambda,
                max_iterations,
                tolerance,
            } => Model::multivariate(
                LassoRegression::builder()
                    .lambda(lambda)
                    .max_iterations(max_iterations)
                    .tolerance(tolerance)
                    .build(),
            ),
            ModelKind::Polynomial { degree } => Model::univariate(PolynomialRegression::new(degree)),
            ModelKind::MultivariatePolynomial { max_degree, folds } => Model::multivariate(
                MultivariatePolynomialRegression::with_folds(max_degree, folds),
            ),
        }
    }
}
