//! Error metrics over paired actual/predicted series.

use crate::core::ModelScore;
use crate::solvers::RegressionError;
use faer::Col;

fn check_pair(actual: &Col<f64>, predicted: &Col<f64>) -> Result<usize, RegressionError> {
    if actual.nrows() != predicted.nrows() {
        return Err(RegressionError::LengthMismatch {
            expected: actual.nrows(),
            got: predicted.nrows(),
        });
    }
    if actual.nrows() == 0 {
        return Err(RegressionError::EmptyData);
    }
    Ok(actual.nrows())
}

/// Mean of squared residuals.
pub fn mean_squared_error(actual: &Col<f64>, predicted: &Col<f64>) -> Result<f64, RegressionError> {
    let n = check_pair(actual, predicted)?;
    let sse: f64 = (0..n).map(|i| (actual[i] - predicted[i]).powi(2)).sum();
    Ok(sse / n as f64)
}

/// Square root of [`mean_squared_error`].
pub fn root_mean_squared_error(
    actual: &Col<f64>,
    predicted: &Col<f64>,
) -> Result<f64, RegressionError> {
    Ok(mean_squared_error(actual, predicted)?.sqrt())
}

/// Mean of absolute residuals.
pub fn mean_absolute_error(actual: &Col<f64>, predicted: &Col<f64>) -> Result<f64, RegressionError> {
    let n = check_pair(actual, predicted)?;
    let sae: f64 = (0..n).map(|i| (actual[i] - predicted[i]).abs()).sum();
    Ok(sae / n as f64)
}

/// Coefficient of determination, `1 - SSres / SStot`.
///
/// A constant `actual` series has no variance to explain, so R² is reported
/// as 1 regardless of the predictions.
pub fn r_squared(actual: &Col<f64>, predicted: &Col<f64>) -> Result<f64, RegressionError> {
    let n = check_pair(actual, predicted)?;
    let mean = actual.iter().sum::<f64>() / n as f64;

    let mut ss_tot = 0.0;
    let mut ss_res = 0.0;
    for i in 0..n {
        ss_tot += (actual[i] - mean).powi(2);
        ss_res += (actual[i] - predicted[i]).powi(2);
    }

    if ss_tot == 0.0 {
        return Ok(1.0);
    }
    Ok(1.0 - ss_res / ss_tot)
}

/// Score a model's held-out predictions.
///
/// The final element of `predicted` becomes the score's predicted price.
///
/// # Errors
/// `LengthMismatch` when the series differ in length, `EmptyData` when they
/// are empty.
pub fn evaluate(
    model_name: &str,
    timeframe: &str,
    actual: &Col<f64>,
    predicted: &Col<f64>,
) -> Result<ModelScore, RegressionError> {
    let n = check_pair(actual, predicted)?;

    let mse = mean_squared_error(actual, predicted)?;
    let mae = mean_absolute_error(actual, predicted)?;
    let r2 = r_squared(actual, predicted)?;

    Ok(ModelScore::new(
        model_name.to_string(),
        timeframe.to_string(),
        r2,
        mse,
        mse.sqrt(),
        mae,
        predicted[n - 1],
    ))
}
