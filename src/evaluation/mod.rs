//! Held-out scoring of model predictions.

mod comparison;
mod metrics;

pub use comparison::sort_for_comparison;
pub use metrics::{
    evaluate, mean_absolute_error, mean_squared_error, r_squared, root_mean_squared_error,
};
