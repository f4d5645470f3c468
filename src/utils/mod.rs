//! Numeric building blocks shared by the solvers.

mod matrix;
mod polynomial;

pub use matrix::{
    add_bias_column, col_from_slice, dot, fit_least_squares, invert, multiply, multiply_vec,
    normal_equations, row, rows_to_mat, solve_normal_equation, transpose,
};
pub use polynomial::PolynomialExpander;
