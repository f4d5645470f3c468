//! Per-model evaluation records.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Held-out performance of one model for one prediction cycle.
///
/// Scores are produced by [`crate::evaluation::evaluate`] and never modified
/// afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelScore {
    model_name: String,
    timeframe: String,
    r_squared: f64,
    mse: f64,
    rmse: f64,
    mae: f64,
    predicted_price: f64,
}

impl ModelScore {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        model_name: String,
        timeframe: String,
        r_squared: f64,
        mse: f64,
        rmse: f64,
        mae: f64,
        predicted_price: f64,
    ) -> Self {
        Self {
            model_name,
            timeframe,
            r_squared,
            mse,
            rmse,
            mae,
            predicted_price,
        }
    }

    /// Name of the scored model.
    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    /// Label of the sampling interval the series was taken at.
    pub fn timeframe(&self) -> &str {
        &self.timeframe
    }

    /// Coefficient of determination on the held-out data.
    pub fn r_squared(&self) -> f64 {
        self.r_squared
    }

    /// Mean squared error.
    pub fn mse(&self) -> f64 {
        self.mse
    }

    /// Root mean squared error.
    pub fn rmse(&self) -> f64 {
        self.rmse
    }

    /// Mean absolute error.
    pub fn mae(&self) -> f64 {
        self.mae
    }

    /// Last value of the predicted held-out series.
    pub fn predicted_price(&self) -> f64 {
        self.predicted_price
    }

    /// Look up a metric by kind.
    pub fn metric(&self, metric: Metric) -> f64 {
        match metric {
            Metric::RSquared => self.r_squared,
            Metric::Mse => self.mse,
            Metric::Rmse => self.rmse,
            Metric::Mae => self.mae,
            Metric::Predicted => self.predicted_price,
        }
    }
}

impl fmt::Display for ModelScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{}] R²: {:.4} | MSE: {:.4} | RMSE: {:.4} | MAE: {:.4} | Predicted: {:.2}",
            self.model_name,
            self.timeframe,
            self.r_squared,
            self.mse,
            self.rmse,
            self.mae,
            self.predicted_price
        )
    }
}

/// A field of [`ModelScore`] that scores can be compared on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    RSquared,
    Mse,
    Rmse,
    Mae,
    Predicted,
}

impl Metric {
    /// Whether larger values mean a better model.
    pub fn higher_is_better(&self) -> bool {
        matches!(self, Metric::RSquared)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unsupported metric: {0}")]
pub struct UnknownMetric(pub String);

impl FromStr for Metric {
    type Err = UnknownMetric;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "r²" | "r2" | "r_squared" => Ok(Metric::RSquared),
            "mse" => Ok(Metric::Mse),
            "rmse" => Ok(Metric::Rmse),
            "mae" => Ok(Metric::Mae),
            "predicted" => Ok(Metric::Predicted),
            _ => Err(UnknownMetric(s.to_string())),
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Metric::RSquared => "R²",
            Metric::Mse => "MSE",
            Metric::Rmse => "RMSE",
            Metric::Mae => "MAE",
            Metric::Predicted => "Predicted",
        };
        f.write_str(label)
    }
}
