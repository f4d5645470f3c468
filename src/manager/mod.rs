//! Model registry and best-model selection.

mod registry;
mod selection;

pub use registry::ModelRegistry;
pub use selection::{
    ModelFailure, ModelManager, SelectionOutcome, SelectionStatus, NO_PREDICTION,
};
