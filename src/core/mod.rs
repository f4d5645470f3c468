//! Core types for model selection.

mod data;
mod options;
mod score;

pub use data::ForecastData;
pub use options::{EngineOptions, EngineOptionsBuilder, OptionsError};
pub use score::{Metric, ModelScore, UnknownMetric};
