//! Model fitting tests.

mod common;

use approx::assert_relative_eq;
use faer::{Col, Mat};
use regress_select::solvers::{
    LassoRegression, LinearRegression, MultiFeatureLinearRegression, MultivariateModel,
    MultivariatePolynomialRegression, PolynomialRegression, RegressionError, RidgeRegression,
    UnivariateModel,
};
use regress_select::utils::{add_bias_column, fit_least_squares, invert, multiply};

// ============================================================================
// Matrix core
// ============================================================================

#[test]
fn test_least_squares_recovers_line() {
    // y = 3 + 2x
    let x = add_bias_column(&Mat::from_fn(8, 1, |i, _| i as f64));
    let y = Col::from_fn(8, |i| 3.0 + 2.0 * i as f64);

    let w = fit_least_squares(&x, &y).expect("fit should succeed");
    assert_relative_eq!(w[0], 3.0, epsilon = 1e-6);
    assert_relative_eq!(w[1], 2.0, epsilon = 1e-6);
}

#[test]
fn test_inverse_times_matrix_is_identity() {
    let a = Mat::from_fn(3, 3, |i, j| if i == j { 4.0 } else { (i + j) as f64 * 0.5 });
    let inv = invert(&a).expect("matrix is invertible");
    let product = multiply(&a, &inv).unwrap();

    for i in 0..3 {
        for j in 0..3 {
            let expected = if i == j { 1.0 } else { 0.0 };
            assert_relative_eq!(product[(i, j)], expected, epsilon = 1e-10);
        }
    }
}

#[test]
fn test_singular_matrix_rejected() {
    let a = Mat::from_fn(2, 2, |i, j| ((i + 1) * (j + 1)) as f64);
    assert!(matches!(invert(&a), Err(RegressionError::SingularMatrix)));
}

// ============================================================================
// Univariate models
// ============================================================================

#[test]
fn test_linear_trend_forecast() {
    let series = Col::from_fn(5, |i| 100.0 + i as f64);
    let mut model = LinearRegression::new();
    model.train(&series).unwrap();

    assert_relative_eq!(model.predict_next().unwrap(), 105.0, epsilon = 0.1);
}

#[test]
fn test_linear_trend_on_noisy_series() {
    let series = common::generate_price_series(60, 50.0, 0.5, 7);
    let mut model = LinearRegression::new();
    model.train(&Col::from_fn(series.len(), |i| series[i])).unwrap();

    assert_relative_eq!(model.slope().unwrap(), 0.5, epsilon = 0.02);
    assert_relative_eq!(model.predict_next().unwrap(), 80.0, epsilon = 0.5);
}

#[test]
fn test_polynomial_trend_on_quadratic_series() {
    let series = Col::from_fn(10, |i| 1.0 + (i * i) as f64);
    let mut model = PolynomialRegression::new(2);
    model.train(&series).unwrap();

    assert_relative_eq!(model.predict_next().unwrap(), 101.0, epsilon = 1e-6);
}

#[test]
fn test_models_reject_prediction_before_training() {
    assert!(matches!(
        LinearRegression::new().predict_next(),
        Err(RegressionError::NotTrained { .. })
    ));
    assert!(matches!(
        PolynomialRegression::new(2).predict_next(),
        Err(RegressionError::NotTrained { .. })
    ));

    let features = Col::zeros(2);
    assert!(MultiFeatureLinearRegression::new().predict(&features).is_err());
    assert!(RidgeRegression::new(0.5).predict(&features).is_err());
    assert!(LassoRegression::new(0.1).predict(&features).is_err());
    assert!(MultivariatePolynomialRegression::new(3)
        .predict(&features)
        .is_err());
}

// ============================================================================
// Multivariate models
// ============================================================================

#[test]
fn test_multi_feature_linear_recovers_coefficients() {
    let (x, y, beta) = common::generate_linear_data(50, 3, 2.0, 0.0, 42);
    let mut model = MultiFeatureLinearRegression::new();
    model.train(&x, &y).unwrap();

    let w = model.weights().unwrap();
    assert_relative_eq!(w[0], 2.0, epsilon = 1e-8);
    for j in 0..3 {
        assert_relative_eq!(w[j + 1], beta[j], epsilon = 1e-8);
    }
}

#[test]
fn test_ridge_lambda_zero_equals_least_squares() {
    let (x, y, _) = common::generate_linear_data(50, 3, 2.0, 0.1, 42);

    let mut ridge = RidgeRegression::new(0.0);
    let mut ols = MultiFeatureLinearRegression::new();
    ridge.train(&x, &y).unwrap();
    ols.train(&x, &y).unwrap();

    let (rw, ow) = (ridge.weights().unwrap(), ols.weights().unwrap());
    for j in 0..4 {
        assert_relative_eq!(rw[j], ow[j], epsilon = 1e-8);
    }
}

#[test]
fn test_ridge_large_lambda_shrinks_weights() {
    let (x, y, _) = common::generate_linear_data(50, 3, 1.0, 0.1, 42);

    let norm = |w: &Col<f64>| w.iter().map(|v| v * v).sum::<f64>().sqrt();

    let mut small = RidgeRegression::new(0.0);
    let mut large = RidgeRegression::new(1000.0);
    small.train(&x, &y).unwrap();
    large.train(&x, &y).unwrap();

    let (small_norm, large_norm) = (norm(small.weights().unwrap()), norm(large.weights().unwrap()));
    assert!(
        large_norm < 0.1 * small_norm,
        "λ=1000 norm {large_norm} should be far below λ=0 norm {small_norm}"
    );
}

#[test]
fn test_lasso_zeroes_irrelevant_feature() {
    // Only the first feature carries signal.
    let mut rng = common::Lcg::new(11);
    let values: Vec<f64> = (0..240).map(|_| rng.next_f64()).collect();
    let x = Mat::from_fn(80, 3, |i, j| values[i * 3 + j]);
    let y = Col::from_fn(80, |i| 3.0 * x[(i, 0)]);

    let mut model = LassoRegression::new(0.1);
    model.train(&x, &y).unwrap();

    // Updates are not rescaled by the column norm, so w0 settles near
    // 3 * mean(x0²) - λ rather than 3.
    let w = model.weights().unwrap();
    assert!(w[0] > 0.5);
    assert!(w[1].abs() < 0.05);
    assert!(w[2].abs() < 0.05);
    assert_eq!(model.converged(), Some(true));
}

#[test]
fn test_lasso_huge_lambda_gives_all_zero() {
    let (x, y, _) = common::generate_linear_data(30, 3, 0.0, 0.1, 3);
    let mut model = LassoRegression::new(1e6);
    model.train(&x, &y).unwrap();

    assert_eq!(model.n_nonzero(), 0);
    assert_eq!(model.predict(&Col::from_fn(3, |_| 1.0)).unwrap(), 0.0);
}

#[test]
fn test_multivariate_polynomial_picks_quadratic() {
    let (x, y) = common::generate_quadratic_data(40);
    let mut model = MultivariatePolynomialRegression::new(4);
    model.train(&x, &y).unwrap();

    // Higher degrees fit exactly too; degree 1 never does.
    assert!(model.selected_degree().unwrap() >= 2);
    assert!(model.cv_r_squared().unwrap() > 0.999);
    let prediction = model.predict(&Col::from_fn(1, |_| 1.5)).unwrap();
    assert_relative_eq!(prediction, 2.25, epsilon = 1e-4);
}

#[test]
fn test_multivariate_polynomial_tie_keeps_degree_one() {
    let (x, _, _) = common::generate_linear_data(30, 2, 0.0, 0.0, 8);
    let y = Col::from_fn(30, |_| 12.5);

    let mut model = MultivariatePolynomialRegression::new(4);
    model.train(&x, &y).unwrap();

    assert_eq!(model.selected_degree(), Some(1));
    assert_relative_eq!(
        model.predict(&Col::from_fn(2, |_| 0.3)).unwrap(),
        12.5,
        epsilon = 1e-6
    );
}

#[test]
fn test_feature_width_mismatch_on_predict() {
    let (x, y, _) = common::generate_linear_data(20, 2, 0.0, 0.0, 5);
    let mut model = MultiFeatureLinearRegression::new();
    model.train(&x, &y).unwrap();

    assert!(matches!(
        model.predict(&Col::zeros(3)),
        Err(RegressionError::LengthMismatch { expected: 2, got: 3 })
    ));
}
