//! Core traits for forecasting models.

use faer::{Col, Mat};
use std::fmt;
use thiserror::Error;

/// Errors that can occur while fitting, predicting or scoring a model.
#[derive(Debug, Error)]
pub enum RegressionError {
    #[error("training data cannot be empty")]
    EmptyData,

    #[error("insufficient observations: need at least {needed}, got {got}")]
    InsufficientObservations { needed: usize, got: usize },

    #[error("dimension mismatch: X has {x_rows} rows but y has {y_len} elements")]
    DimensionMismatch { x_rows: usize, y_len: usize },

    #[error("length mismatch: expected {expected} values, got {got}")]
    LengthMismatch { expected: usize, got: usize },

    #[error("row {row} has {got} features, expected {expected}")]
    RaggedRows {
        row: usize,
        expected: usize,
        got: usize,
    },

    #[error("model {model} is not trained")]
    NotTrained { model: String },

    #[error("model {model} does not support {mode} data")]
    UnsupportedMode { model: String, mode: Capability },

    #[error("matrix is singular or nearly singular")]
    SingularMatrix,

    #[error("invalid options: {0}")]
    InvalidOptions(#[from] crate::core::OptionsError),
}

/// The single kind of input a model is able to learn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// A plain scalar series; the position in the series is the regressor.
    Univariate,
    /// A feature matrix with an aligned target series.
    Multivariate,
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Capability::Univariate => f.write_str("univariate"),
            Capability::Multivariate => f.write_str("multivariate"),
        }
    }
}

/// A model that learns from a scalar series and forecasts its next value.
pub trait UnivariateModel: Send {
    /// Display name used in scores and logs.
    fn name(&self) -> String;

    /// Fit the model, replacing any previous state.
    fn train(&mut self, series: &Col<f64>) -> Result<(), RegressionError>;

    /// Forecast the value one step past the training window.
    fn predict_next(&self) -> Result<f64, RegressionError>;
}

/// A model that learns a mapping from feature vectors to a target.
pub trait MultivariateModel: Send {
    /// Display name used in scores and logs.
    fn name(&self) -> String;

    /// Fit the model, replacing any previous state.
    ///
    /// # Arguments
    /// * `x` - Feature matrix of shape (n_samples, n_features)
    /// * `y` - Target vector of length n_samples
    fn train(&mut self, x: &Mat<f64>, y: &Col<f64>) -> Result<(), RegressionError>;

    /// Predict the target for a single feature vector.
    fn predict(&self, features: &Col<f64>) -> Result<f64, RegressionError>;

    /// Predict every row of a feature matrix.
    fn predict_rows(&self, x: &Mat<f64>) -> Result<Col<f64>, RegressionError> {
        let mut predictions = Col::zeros(x.nrows());
        for i in 0..x.nrows() {
            let row = Col::from_fn(x.ncols(), |j| x[(i, j)]);
            predictions[i] = self.predict(&row)?;
        }
        Ok(predictions)
    }
}

/// Validate that `x` and `y` describe the same, non-empty set of samples.
pub(crate) fn check_training_data(x: &Mat<f64>, y: &Col<f64>) -> Result<(), RegressionError> {
    if x.nrows() != y.nrows() {
        return Err(RegressionError::DimensionMismatch {
            x_rows: x.nrows(),
            y_len: y.nrows(),
        });
    }
    if x.nrows() == 0 || x.ncols() == 0 {
        return Err(RegressionError::EmptyData);
    }
    Ok(())
}
