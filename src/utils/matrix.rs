//! Dense matrix algebra used by the least-squares solvers.
//!
//! Everything here works on `faer` storage but performs the arithmetic
//! directly, so the elimination order is fixed and reproducible.

use crate::solvers::RegressionError;
use faer::{Col, Mat};

/// Transpose a matrix.
pub fn transpose(a: &Mat<f64>) -> Mat<f64> {
    Mat::from_fn(a.ncols(), a.nrows(), |i, j| a[(j, i)])
}

/// Multiply two matrices (A * B).
pub fn multiply(a: &Mat<f64>, b: &Mat<f64>) -> Result<Mat<f64>, RegressionError> {
    if a.ncols() != b.nrows() {
        return Err(RegressionError::DimensionMismatch {
            x_rows: a.ncols(),
            y_len: b.nrows(),
        });
    }

    let shared = a.ncols();
    let mut result = Mat::zeros(a.nrows(), b.ncols());
    for i in 0..a.nrows() {
        for j in 0..b.ncols() {
            let mut sum = 0.0;
            for k in 0..shared {
                sum += a[(i, k)] * b[(k, j)];
            }
            result[(i, j)] = sum;
        }
    }
    Ok(result)
}

/// Multiply a matrix with a vector (A * v).
pub fn multiply_vec(a: &Mat<f64>, v: &Col<f64>) -> Result<Col<f64>, RegressionError> {
    if a.ncols() != v.nrows() {
        return Err(RegressionError::LengthMismatch {
            expected: a.ncols(),
            got: v.nrows(),
        });
    }

    let mut result = Col::zeros(a.nrows());
    for i in 0..a.nrows() {
        let mut sum = 0.0;
        for j in 0..a.ncols() {
            sum += a[(i, j)] * v[j];
        }
        result[i] = sum;
    }
    Ok(result)
}

/// Invert a square matrix with Gauss-Jordan elimination.
///
/// Rows are normalized by their diagonal pivot in order, without row
/// exchanges. The normal-equation matrices built by the solvers are symmetric
/// positive semi-definite, so a pivot that cancels down to the rounding
/// level of its original diagonal entry means the matrix is singular. Such a
/// pivot, or a non-finite one, yields [`RegressionError::SingularMatrix`]
/// instead of NaN/infinite output.
pub fn invert(a: &Mat<f64>) -> Result<Mat<f64>, RegressionError> {
    let n = a.nrows();
    if a.ncols() != n {
        return Err(RegressionError::DimensionMismatch {
            x_rows: n,
            y_len: a.ncols(),
        });
    }

    // [A | I]
    let mut augmented = Mat::from_fn(n, 2 * n, |i, j| {
        if j < n {
            a[(i, j)]
        } else if j - n == i {
            1.0
        } else {
            0.0
        }
    });

    for i in 0..n {
        let pivot = augmented[(i, i)];
        if !pivot.is_finite() || pivot.abs() <= f64::EPSILON * a[(i, i)].abs() {
            return Err(RegressionError::SingularMatrix);
        }
        for j in 0..2 * n {
            augmented[(i, j)] /= pivot;
        }
        for k in 0..n {
            if k == i {
                continue;
            }
            let factor = augmented[(k, i)];
            if factor == 0.0 {
                continue;
            }
            for j in 0..2 * n {
                augmented[(k, j)] -= factor * augmented[(i, j)];
            }
        }
    }

    Ok(Mat::from_fn(n, n, |i, j| augmented[(i, j + n)]))
}

/// Dot product of two vectors.
pub fn dot(u: &Col<f64>, v: &Col<f64>) -> Result<f64, RegressionError> {
    if u.nrows() != v.nrows() {
        return Err(RegressionError::LengthMismatch {
            expected: u.nrows(),
            got: v.nrows(),
        });
    }
    Ok(u.iter().zip(v.iter()).map(|(a, b)| a * b).sum())
}

/// Build the normal equations `(X'X + λI, X'y)`.
///
/// `ridge` is added to every diagonal entry of `X'X`; pass 0.0 for plain
/// least squares.
pub fn normal_equations(
    x: &Mat<f64>,
    y: &Col<f64>,
    ridge: f64,
) -> Result<(Mat<f64>, Col<f64>), RegressionError> {
    if x.nrows() != y.nrows() {
        return Err(RegressionError::DimensionMismatch {
            x_rows: x.nrows(),
            y_len: y.nrows(),
        });
    }

    let xt = transpose(x);
    let mut xtx = multiply(&xt, x)?;
    if ridge != 0.0 {
        for i in 0..xtx.nrows() {
            xtx[(i, i)] += ridge;
        }
    }
    let xty = multiply_vec(&xt, y)?;
    Ok((xtx, xty))
}

/// Solve the (optionally ridge-penalized) normal equation `(X'X + λI)⁻¹X'y`.
pub fn solve_normal_equation(
    x: &Mat<f64>,
    y: &Col<f64>,
    ridge: f64,
) -> Result<Col<f64>, RegressionError> {
    if x.nrows() == 0 || x.ncols() == 0 {
        return Err(RegressionError::EmptyData);
    }
    let (xtx, xty) = normal_equations(x, y, ridge)?;
    let xtx_inv = invert(&xtx)?;
    multiply_vec(&xtx_inv, &xty)
}

/// Least-squares weights via the normal equation `θ = (X'X)⁻¹X'y`.
pub fn fit_least_squares(x: &Mat<f64>, y: &Col<f64>) -> Result<Col<f64>, RegressionError> {
    solve_normal_equation(x, y, 0.0)
}

/// Prepend a constant 1.0 column to a feature matrix.
pub fn add_bias_column(x: &Mat<f64>) -> Mat<f64> {
    Mat::from_fn(x.nrows(), x.ncols() + 1, |i, j| {
        if j == 0 {
            1.0
        } else {
            x[(i, j - 1)]
        }
    })
}

/// Copy row `i` of a matrix into a column vector.
pub fn row(x: &Mat<f64>, i: usize) -> Col<f64> {
    Col::from_fn(x.ncols(), |j| x[(i, j)])
}

/// Build a feature matrix from row vectors of identical width.
pub fn rows_to_mat(rows: &[Vec<f64>]) -> Result<Mat<f64>, RegressionError> {
    let n_cols = rows.first().map_or(0, Vec::len);
    for (i, r) in rows.iter().enumerate() {
        if r.len() != n_cols {
            return Err(RegressionError::RaggedRows {
                row: i,
                expected: n_cols,
                got: r.len(),
            });
        }
    }
    Ok(Mat::from_fn(rows.len(), n_cols, |i, j| rows[i][j]))
}

/// Build a column vector from a slice.
pub fn col_from_slice(values: &[f64]) -> Col<f64> {
    Col::from_fn(values.len(), |i| values[i])
}
