//! K-fold cross-validation for polynomial degree selection.
//!
//! Folds are contiguous and never shuffled, so the held-out block keeps the
//! time ordering of the series.

use crate::evaluation::r_squared;
use crate::solvers::RegressionError;
use crate::utils::{fit_least_squares, PolynomialExpander};
use faer::{Col, Mat};
use std::ops::Range;

/// One train/test split produced by [`KFold`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FoldSplit {
    /// Index of the fold (0-based).
    pub fold: usize,
    /// Held-out rows.
    pub test: Range<usize>,
    /// Total number of rows being split.
    pub n_samples: usize,
}

impl FoldSplit {
    /// Rows used for fitting: everything outside the held-out block.
    pub fn train_indices(&self) -> Vec<usize> {
        (0..self.test.start)
            .chain(self.test.end..self.n_samples)
            .collect()
    }
}

/// Contiguous k-fold splitter.
///
/// Every fold holds `n / k` rows except the last, which also takes the
/// remainder.
#[derive(Debug, Clone)]
pub struct KFold {
    n_samples: usize,
    k: usize,
    fold_size: usize,
    next: usize,
}

impl KFold {
    /// Split `n_samples` rows into `k` folds.
    pub fn new(n_samples: usize, k: usize) -> Result<Self, RegressionError> {
        if k < 2 {
            return Err(crate::core::OptionsError::InvalidFolds(k).into());
        }
        if n_samples < k {
            return Err(RegressionError::InsufficientObservations {
                needed: k,
                got: n_samples,
            });
        }
        Ok(Self {
            n_samples,
            k,
            fold_size: n_samples / k,
            next: 0,
        })
    }
}

impl Iterator for KFold {
    type Item = FoldSplit;

    fn next(&mut self) -> Option<FoldSplit> {
        if self.next == self.k {
            return None;
        }
        let fold = self.next;
        self.next += 1;

        let start = fold * self.fold_size;
        let end = if fold + 1 == self.k {
            self.n_samples
        } else {
            start + self.fold_size
        };
        Some(FoldSplit {
            fold,
            test: start..end,
            n_samples: self.n_samples,
        })
    }
}

fn select_rows(x: &Mat<f64>, rows: &[usize]) -> Mat<f64> {
    Mat::from_fn(rows.len(), x.ncols(), |i, j| x[(rows[i], j)])
}

fn select_values(y: &Col<f64>, rows: &[usize]) -> Col<f64> {
    Col::from_fn(rows.len(), |i| y[rows[i]])
}

/// Mean held-out R² of a least-squares fit on polynomial features.
///
/// `features` is expanded at `degree`, split into `k` contiguous folds, and
/// each fold is predicted by weights fitted on the other folds.
///
/// # Errors
/// Fails when `features` and `targets` disagree in length, when there are
/// fewer rows than folds, or when a fold's training block is singular.
pub fn cross_validate_r2(
    features: &Mat<f64>,
    targets: &Col<f64>,
    degree: usize,
    k: usize,
) -> Result<f64, RegressionError> {
    if features.nrows() != targets.nrows() {
        return Err(RegressionError::DimensionMismatch {
            x_rows: features.nrows(),
            y_len: targets.nrows(),
        });
    }

    let expanded = PolynomialExpander::new(degree).expand(features);
    let mut total = 0.0;

    for split in KFold::new(expanded.nrows(), k)? {
        let train_rows = split.train_indices();
        let test_rows: Vec<usize> = split.test.clone().collect();

        let weights = fit_least_squares(
            &select_rows(&expanded, &train_rows),
            &select_values(targets, &train_rows),
        )?;

        let test_x = select_rows(&expanded, &test_rows);
        let predicted = Col::from_fn(test_rows.len(), |i| {
            (0..test_x.ncols())
                .map(|j| test_x[(i, j)] * weights[j])
                .sum::<f64>()
        });
        let actual = select_values(targets, &test_rows);

        total += r_squared(&actual, &predicted)?;
    }

    Ok(total / k as f64)
}
