//! Multi-model regression engine for short price series.
//!
//! Each prediction cycle fits a line-up of competing regressors (linear
//! trends, ridge, lasso, and polynomial models with cross-validated degree
//! selection), scores them on a held-out partition, and reports the forecast
//! of the model with the highest held-out R².
//!
//! # Example
//!
//! ```rust,ignore
//! use regress_select::prelude::*;
//!
//! let data = ForecastData::from_rows(
//!     &train_rows, &test_rows, &train_targets, &test_targets,
//!     &latest_row, &price_series,
//! )?;
//!
//! let manager = ModelManager::new(&EngineOptions::default());
//! let outcome = manager.predict_best_model(&data, "Daily");
//!
//! if let Some(best) = outcome.best_score() {
//!     println!("{best}");
//! }
//! println!("forecast = {}", outcome.best_prediction());
//! ```
//!
//! The crate logs through `tracing` and installs no subscriber.

pub mod core;
pub mod evaluation;
pub mod manager;
pub mod solvers;
pub mod utils;
pub mod validation;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::core::{
        EngineOptions, EngineOptionsBuilder, ForecastData, Metric, ModelScore, OptionsError,
    };
    pub use crate::evaluation::{evaluate, sort_for_comparison};
    pub use crate::manager::{
        ModelFailure, ModelManager, ModelRegistry, SelectionOutcome, SelectionStatus,
        NO_PREDICTION,
    };
    pub use crate::solvers::{
        Capability, LassoRegression, LinearRegression, Model, ModelKind,
        MultiFeatureLinearRegression, MultivariateModel, MultivariatePolynomialRegression,
        PolynomialRegression, RegressionError, RidgeRegression, UnivariateModel,
    };
}

pub use crate::core::{EngineOptions, ForecastData, ModelScore};
pub use crate::manager::{ModelManager, SelectionOutcome};
pub use crate::solvers::RegressionError;
