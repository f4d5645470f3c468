//! Reusable catalogue of model factories.

use crate::core::EngineOptions;
use crate::solvers::{Model, ModelKind};

type ModelFactory = Box<dyn Fn() -> Model + Send + Sync>;

/// The set of models evaluated in each prediction cycle.
///
/// The registry stores factories rather than models, so every cycle starts
/// from untrained instances and nothing fitted in one cycle leaks into the
/// next.
pub struct ModelRegistry {
    factories: Vec<ModelFactory>,
}

impl ModelRegistry {
    /// An empty registry. See [`ModelRegistry::standard`] for the built-in
    /// line-up.
    pub fn new() -> Self {
        Self {
            factories: Vec::new(),
        }
    }

    /// The standard line-up: linear trend, multi-feature linear, ridge, lasso,
    /// then a polynomial trend and a cross-validated multivariate polynomial
    /// for each degree in the configured range.
    pub fn standard(options: &EngineOptions) -> Self {
        let mut registry = Self::new();
        registry
            .register_kind(ModelKind::Linear)
            .register_kind(ModelKind::MultiFeatureLinear)
            .register_kind(ModelKind::Ridge {
                lambda: options.ridge_lambda,
            })
            .register_kind(ModelKind::Lasso {
                lambda: options.lasso_lambda,
                max_iterations: options.lasso_max_iterations,
                tolerance: options.lasso_tolerance,
            });

        for degree in options.polynomial_degrees() {
            registry
                .register_kind(ModelKind::Polynomial { degree })
                .register_kind(ModelKind::MultivariatePolynomial {
                    max_degree: degree,
                    folds: options.cv_folds,
                });
        }
        registry
    }

    /// Add a custom model factory.
    pub fn register<F>(&mut self, factory: F) -> &mut Self
    where
        F: Fn() -> Model + Send + Sync + 'static,
    {
        self.factories.push(Box::new(factory));
        self
    }

    /// Add one of the built-in model variants.
    pub fn register_kind(&mut self, kind: ModelKind) -> &mut Self {
        self.register(move || kind.build())
    }

    /// Fresh, untrained models in registration order.
    pub fn instantiate(&self) -> Vec<Model> {
        self.factories.iter().map(|factory| factory()).collect()
    }

    /// Names of the registered models in registration order.
    pub fn names(&self) -> Vec<String> {
        self.factories.iter().map(|factory| factory().name()).collect()
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}

/// Same as [`ModelRegistry::new`]: an empty registry. Use
/// [`ModelRegistry::standard`] for the built-in line-up.
impl Default for ModelRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ModelRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelRegistry")
            .field("models", &self.names())
            .finish()
    }
}
