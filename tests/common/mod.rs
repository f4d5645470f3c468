//! Common test utilities and data generators.
#![allow(dead_code)]

use faer::{Col, Mat};
use regress_select::ForecastData;

/// Deterministic pseudo-random values in [-1, 1).
pub struct Lcg(u64);

impl Lcg {
    pub fn new(seed: u64) -> Self {
        Self(seed)
    }

    pub fn next_f64(&mut self) -> f64 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        ((self.0 >> 33) as f64) / ((1u64 << 31) as f64) * 2.0 - 1.0
    }
}

/// Generate simple linear data: y = x * beta + intercept + noise,
/// with beta = [1, 2, ..., n_features].
pub fn generate_linear_data(
    n_samples: usize,
    n_features: usize,
    intercept: f64,
    noise_std: f64,
    seed: u64,
) -> (Mat<f64>, Col<f64>, Col<f64>) {
    let mut rng = Lcg::new(seed);

    let true_coefficients = Col::from_fn(n_features, |j| (j + 1) as f64);
    let mut x = Mat::zeros(n_samples, n_features);
    let mut y = Col::zeros(n_samples);

    for i in 0..n_samples {
        let mut yi = intercept;
        for j in 0..n_features {
            x[(i, j)] = rng.next_f64();
            yi += x[(i, j)] * true_coefficients[j];
        }
        yi += noise_std * rng.next_f64();
        y[i] = yi;
    }

    (x, y, true_coefficients)
}

/// Single feature on an even grid with y = x².
pub fn generate_quadratic_data(n_samples: usize) -> (Mat<f64>, Col<f64>) {
    let x = Mat::from_fn(n_samples, 1, |i, _| -2.0 + 4.0 * i as f64 / n_samples as f64);
    let y = Col::from_fn(n_samples, |i| x[(i, 0)] * x[(i, 0)]);
    (x, y)
}

/// Slowly trending price series with small deterministic noise.
pub fn generate_price_series(n: usize, start: f64, step: f64, seed: u64) -> Vec<f64> {
    let mut rng = Lcg::new(seed);
    (0..n)
        .map(|i| start + step * i as f64 + 0.2 * rng.next_f64())
        .collect()
}

/// A complete prediction-cycle bundle.
///
/// Two features drive the target linearly; the first `n_train` rows train,
/// the next `n_test` rows are held out, and one extra row is the latest
/// feature vector. The univariate series is the training targets.
pub fn generate_forecast_data(n_train: usize, n_test: usize, seed: u64) -> ForecastData {
    let n = n_train + n_test + 1;
    let mut rng = Lcg::new(seed);

    let rows: Vec<Vec<f64>> = (0..n)
        .map(|i| {
            let t = i as f64 / n as f64;
            vec![t + 0.1 * rng.next_f64(), (2.0 * t).sin() + 0.1 * rng.next_f64()]
        })
        .collect();
    let targets: Vec<f64> = rows
        .iter()
        .map(|r| 100.0 + 5.0 * r[0] - 3.0 * r[1] + 0.05 * rng.next_f64())
        .collect();

    ForecastData::from_rows(
        &rows[..n_train],
        &rows[n_train..n_train + n_test],
        &targets[..n_train],
        &targets[n_train..n_train + n_test],
        &rows[n - 1],
        &targets[..n_train],
    )
    .expect("generated partitions are aligned")
}

/// Approximate equality check for floating point values.
pub fn approx_eq(a: f64, b: f64, epsilon: f64) -> bool {
    (a - b).abs() < epsilon
}
