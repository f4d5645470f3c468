//! Input bundle handed to the model manager by the data collaborator.

use crate::solvers::RegressionError;
use crate::utils::{col_from_slice, rows_to_mat};
use faer::{Col, Mat};

/// Already-scaled train/test partitions for one prediction cycle.
///
/// Feature matrices hold one sample per row. The test partition is used to
/// score each model; `latest_features` is the most recent feature vector and
/// drives the one-step-ahead forecast of multivariate models, while
/// `univariate_series` feeds the univariate models.
#[derive(Debug, Clone)]
pub struct ForecastData {
    train_features: Mat<f64>,
    test_features: Mat<f64>,
    train_targets: Col<f64>,
    test_targets: Col<f64>,
    latest_features: Col<f64>,
    univariate_series: Col<f64>,
}

impl ForecastData {
    /// Bundle the partitions, checking that they line up.
    ///
    /// Empty partitions are accepted here; the manager reports them as
    /// insufficient data.
    ///
    /// # Errors
    /// `DimensionMismatch` when a feature matrix and its targets disagree in
    /// length, `LengthMismatch` when the test matrix or latest vector has a
    /// different width from the training matrix.
    pub fn new(
        train_features: Mat<f64>,
        test_features: Mat<f64>,
        train_targets: Col<f64>,
        test_targets: Col<f64>,
        latest_features: Col<f64>,
        univariate_series: Col<f64>,
    ) -> Result<Self, RegressionError> {
        if train_features.nrows() != train_targets.nrows() {
            return Err(RegressionError::DimensionMismatch {
                x_rows: train_features.nrows(),
                y_len: train_targets.nrows(),
            });
        }
        if test_features.nrows() != test_targets.nrows() {
            return Err(RegressionError::DimensionMismatch {
                x_rows: test_features.nrows(),
                y_len: test_targets.nrows(),
            });
        }

        if train_features.nrows() > 0 {
            let width = train_features.ncols();
            if test_features.nrows() > 0 && test_features.ncols() != width {
                return Err(RegressionError::LengthMismatch {
                    expected: width,
                    got: test_features.ncols(),
                });
            }
            if latest_features.nrows() != width {
                return Err(RegressionError::LengthMismatch {
                    expected: width,
                    got: latest_features.nrows(),
                });
            }
        }

        Ok(Self {
            train_features,
            test_features,
            train_targets,
            test_targets,
            latest_features,
            univariate_series,
        })
    }

    /// Build from plain row vectors and slices.
    pub fn from_rows(
        train_features: &[Vec<f64>],
        test_features: &[Vec<f64>],
        train_targets: &[f64],
        test_targets: &[f64],
        latest_features: &[f64],
        univariate_series: &[f64],
    ) -> Result<Self, RegressionError> {
        Self::new(
            rows_to_mat(train_features)?,
            rows_to_mat(test_features)?,
            col_from_slice(train_targets),
            col_from_slice(test_targets),
            col_from_slice(latest_features),
            col_from_slice(univariate_series),
        )
    }

    pub fn train_features(&self) -> &Mat<f64> {
        &self.train_features
    }

    pub fn test_features(&self) -> &Mat<f64> {
        &self.test_features
    }

    pub fn train_targets(&self) -> &Col<f64> {
        &self.train_targets
    }

    pub fn test_targets(&self) -> &Col<f64> {
        &self.test_targets
    }

    pub fn latest_features(&self) -> &Col<f64> {
        &self.latest_features
    }

    pub fn univariate_series(&self) -> &Col<f64> {
        &self.univariate_series
    }

    /// True when there is nothing to train on or nothing to score against.
    pub fn is_insufficient(&self) -> bool {
        self.train_features.nrows() == 0 || self.test_targets.nrows() == 0
    }
}
