//! Train, score, and pick the best model for one prediction cycle.

use crate::core::{EngineOptions, ForecastData, Metric, ModelScore};
use crate::evaluation::evaluate;
use crate::manager::registry::ModelRegistry;
use crate::solvers::{Model, RegressionError};
use crate::utils::row;
use faer::Col;

/// Prediction reported when no model could be selected.
pub const NO_PREDICTION: f64 = -1.0;

/// How a prediction cycle ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionStatus {
    /// A best model was chosen.
    Selected,
    /// The training features or the test targets were empty.
    InsufficientData,
    /// Every model errored, so no score was recorded.
    AllModelsFailed,
    /// Some models were scored but every R² was NaN.
    NoUsableScore,
}

/// A model whose lifecycle errored during a cycle.
#[derive(Debug)]
pub struct ModelFailure {
    pub model_name: String,
    pub error: RegressionError,
}

#[derive(Debug)]
struct ScoredModel {
    score: ModelScore,
    forecast: f64,
}

/// Everything a prediction cycle produced.
#[derive(Debug)]
pub struct SelectionOutcome {
    status: SelectionStatus,
    best_prediction: f64,
    best_index: Option<usize>,
    scores: Vec<ModelScore>,
    failures: Vec<ModelFailure>,
}

impl SelectionOutcome {
    fn insufficient() -> Self {
        Self {
            status: SelectionStatus::InsufficientData,
            best_prediction: NO_PREDICTION,
            best_index: None,
            scores: Vec::new(),
            failures: Vec::new(),
        }
    }

    pub fn status(&self) -> SelectionStatus {
        self.status
    }

    /// Forecast of the best model, or [`NO_PREDICTION`].
    pub fn best_prediction(&self) -> f64 {
        self.best_prediction
    }

    /// Score of the best model.
    pub fn best_score(&self) -> Option<&ModelScore> {
        self.best_index.map(|i| &self.scores[i])
    }

    /// Scores of every model that completed, in registration order.
    pub fn scores(&self) -> &[ModelScore] {
        &self.scores
    }

    /// Models that failed, in registration order.
    pub fn failures(&self) -> &[ModelFailure] {
        &self.failures
    }

    /// Scores ordered best first by `metric`.
    ///
    /// NaN values sort last.
    pub fn ranked(&self, metric: Metric) -> Vec<&ModelScore> {
        let mut ranked: Vec<&ModelScore> = self.scores.iter().collect();
        ranked.sort_by(|a, b| {
            let (x, y) = (a.metric(metric), b.metric(metric));
            match (x.is_nan(), y.is_nan()) {
                (true, true) => std::cmp::Ordering::Equal,
                (true, false) => std::cmp::Ordering::Greater,
                (false, true) => std::cmp::Ordering::Less,
                (false, false) if metric.higher_is_better() => y.total_cmp(&x),
                (false, false) => x.total_cmp(&y),
            }
        });
        ranked
    }
}

/// Runs every registered model against a [`ForecastData`] bundle and keeps
/// the one with the highest held-out R².
#[derive(Debug)]
pub struct ModelManager {
    registry: ModelRegistry,
}

impl ModelManager {
    /// Manager over the standard model line-up built from `options`.
    pub fn new(options: &EngineOptions) -> Self {
        Self {
            registry: ModelRegistry::standard(options),
        }
    }

    /// Manager over a caller-supplied registry.
    pub fn with_registry(registry: ModelRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &ModelRegistry {
        &self.registry
    }

    /// Train and score every model, then report the best forecast.
    ///
    /// Multivariate models learn from the feature partitions and forecast
    /// from `latest_features`. Univariate models learn from the price series
    /// and their single forecast is scored against every test target. A
    /// model that errors is recorded as a failure and the cycle continues.
    pub fn predict_best_model(&self, data: &ForecastData, timeframe: &str) -> SelectionOutcome {
        if data.is_insufficient() {
            tracing::error!(timeframe, "insufficient data for model evaluation");
            return SelectionOutcome::insufficient();
        }

        let models = self.registry.instantiate();
        let results = run_all(models, data, timeframe);

        let mut scores: Vec<ModelScore> = Vec::new();
        let mut failures = Vec::new();
        let mut best: Option<(usize, f64)> = None;

        for result in results {
            match result {
                Ok(scored) => {
                    let r2 = scored.score.r_squared();
                    let improves = match best {
                        None => !r2.is_nan(),
                        Some((i, _)) => r2 > scores[i].r_squared(),
                    };
                    if improves {
                        best = Some((scores.len(), scored.forecast));
                    }
                    scores.push(scored.score);
                }
                Err(failure) => failures.push(failure),
            }
        }

        match best {
            Some((index, forecast)) => {
                tracing::info!(
                    timeframe,
                    model = scores[index].model_name(),
                    r_squared = scores[index].r_squared(),
                    forecast,
                    "selected best model"
                );
                SelectionOutcome {
                    status: SelectionStatus::Selected,
                    best_prediction: forecast,
                    best_index: Some(index),
                    scores,
                    failures,
                }
            }
            None => {
                let status = if scores.is_empty() {
                    SelectionStatus::AllModelsFailed
                } else {
                    SelectionStatus::NoUsableScore
                };
                tracing::error!(
                    timeframe,
                    failed = failures.len(),
                    scored = scores.len(),
                    "all models failed or returned no valid prediction"
                );
                SelectionOutcome {
                    status,
                    best_prediction: NO_PREDICTION,
                    best_index: None,
                    scores,
                    failures,
                }
            }
        }
    }
}

impl Default for ModelManager {
    fn default() -> Self {
        Self::new(&EngineOptions::default())
    }
}

#[cfg(not(feature = "parallel"))]
fn run_all(
    models: Vec<Model>,
    data: &ForecastData,
    timeframe: &str,
) -> Vec<Result<ScoredModel, ModelFailure>> {
    models
        .into_iter()
        .map(|model| run_model(model, data, timeframe))
        .collect()
}

#[cfg(feature = "parallel")]
fn run_all(
    models: Vec<Model>,
    data: &ForecastData,
    timeframe: &str,
) -> Vec<Result<ScoredModel, ModelFailure>> {
    use rayon::prelude::*;

    models
        .into_par_iter()
        .map(|model| run_model(model, data, timeframe))
        .collect()
}

fn run_model(
    mut model: Model,
    data: &ForecastData,
    timeframe: &str,
) -> Result<ScoredModel, ModelFailure> {
    let name = model.name();
    let result = forecast_and_score(&mut model, &name, data, timeframe);
    match result {
        Ok(scored) => {
            tracing::debug!(model = %name, score = %scored.score, "model evaluated");
            Ok(scored)
        }
        Err(error) => {
            tracing::warn!(model = %name, error = %error, "model failed");
            Err(ModelFailure {
                model_name: name,
                error,
            })
        }
    }
}

fn forecast_and_score(
    model: &mut Model,
    name: &str,
    data: &ForecastData,
    timeframe: &str,
) -> Result<ScoredModel, RegressionError> {
    let test_targets = data.test_targets();
    let n_test = test_targets.nrows();

    let (forecast, predicted) = match model {
        Model::Multivariate(m) => {
            m.train(data.train_features(), data.train_targets())?;
            let forecast = m.predict(data.latest_features())?;
            let test_features = data.test_features();
            let mut predicted = Col::zeros(n_test);
            for i in 0..n_test {
                predicted[i] = m.predict(&row(test_features, i))?;
            }
            (forecast, predicted)
        }
        Model::Univariate(m) => {
            m.train(data.univariate_series())?;
            let forecast = m.predict_next()?;
            (forecast, Col::from_fn(n_test, |_| forecast))
        }
    };

    let score = evaluate(name, timeframe, test_targets, &predicted)?;
    Ok(ScoredModel { score, forecast })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solvers::{ModelKind, UnivariateModel};

    struct AlwaysFails;

    impl UnivariateModel for AlwaysFails {
        fn name(&self) -> String {
            "AlwaysFails".to_string()
        }

        fn train(&mut self, _series: &Col<f64>) -> Result<(), RegressionError> {
            Err(RegressionError::SingularMatrix)
        }

        fn predict_next(&self) -> Result<f64, RegressionError> {
            Err(RegressionError::NotTrained {
                model: self.name(),
            })
        }
    }

    struct PredictsNan;

    impl UnivariateModel for PredictsNan {
        fn name(&self) -> String {
            "PredictsNan".to_string()
        }

        fn train(&mut self, _series: &Col<f64>) -> Result<(), RegressionError> {
            Ok(())
        }

        fn predict_next(&self) -> Result<f64, RegressionError> {
            Ok(f64::NAN)
        }
    }

    fn small_data() -> ForecastData {
        ForecastData::from_rows(
            &[vec![1.0], vec![2.0], vec![3.0], vec![4.0]],
            &[vec![5.0], vec![6.0]],
            &[2.0, 4.0, 6.0, 8.0],
            &[10.0, 12.0],
            &[7.0],
            &[2.0, 4.0, 6.0, 8.0],
        )
        .unwrap()
    }

    #[test]
    fn test_insufficient_data() {
        let data = ForecastData::from_rows(&[], &[], &[], &[], &[], &[1.0]).unwrap();
        let outcome = ModelManager::default().predict_best_model(&data, "Daily");

        assert_eq!(outcome.status(), SelectionStatus::InsufficientData);
        assert_eq!(outcome.best_prediction(), NO_PREDICTION);
        assert!(outcome.scores().is_empty());
        assert!(outcome.best_score().is_none());
    }

    #[test]
    fn test_all_models_fail() {
        let mut registry = ModelRegistry::new();
        registry
            .register(|| Model::univariate(AlwaysFails))
            .register(|| Model::univariate(AlwaysFails));
        let outcome = ModelManager::with_registry(registry).predict_best_model(&small_data(), "Daily");

        assert_eq!(outcome.status(), SelectionStatus::AllModelsFailed);
        assert_eq!(outcome.best_prediction(), NO_PREDICTION);
        assert!(outcome.scores().is_empty());
        assert_eq!(outcome.failures().len(), 2);
        assert_eq!(outcome.failures()[0].model_name, "AlwaysFails");
    }

    #[test]
    fn test_failure_does_not_stop_cycle() {
        let mut registry = ModelRegistry::new();
        registry
            .register(|| Model::univariate(AlwaysFails))
            .register_kind(ModelKind::MultiFeatureLinear);
        let outcome = ModelManager::with_registry(registry).predict_best_model(&small_data(), "Daily");

        assert_eq!(outcome.status(), SelectionStatus::Selected);
        assert_eq!(outcome.failures().len(), 1);
        assert_eq!(outcome.scores().len(), 1);
        // y = 2x exactly, so the forecast at x = 7 is 14.
        assert!((outcome.best_prediction() - 14.0).abs() < 1e-6);
    }

    #[test]
    fn test_univariate_forecast_repeated_over_test_rows() {
        let mut registry = ModelRegistry::new();
        registry.register_kind(ModelKind::Linear);
        let outcome = ModelManager::with_registry(registry).predict_best_model(&small_data(), "Daily");

        let score = outcome.best_score().unwrap();
        // series 2, 4, 6, 8 forecasts 10 for every test row
        assert!((outcome.best_prediction() - 10.0).abs() < 1e-9);
        assert!((score.predicted_price() - 10.0).abs() < 1e-9);
        assert!((score.mae() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_first_of_equal_scores_wins() {
        let mut registry = ModelRegistry::new();
        registry
            .register_kind(ModelKind::MultiFeatureLinear)
            .register_kind(ModelKind::MultiFeatureLinear);
        let outcome = ModelManager::with_registry(registry).predict_best_model(&small_data(), "Daily");

        assert_eq!(outcome.scores().len(), 2);
        assert!(std::ptr::eq(
            outcome.best_score().unwrap(),
            &outcome.scores()[0]
        ));
    }

    #[test]
    fn test_nan_scores_are_never_selected() {
        let mut registry = ModelRegistry::new();
        registry.register(|| Model::univariate(PredictsNan));
        let outcome = ModelManager::with_registry(registry).predict_best_model(&small_data(), "Daily");

        assert_eq!(outcome.status(), SelectionStatus::NoUsableScore);
        assert_eq!(outcome.best_prediction(), NO_PREDICTION);
        assert!(outcome.best_score().is_none());
        assert_eq!(outcome.scores().len(), 1);
        assert!(outcome.scores()[0].r_squared().is_nan());
        assert!(outcome.failures().is_empty());
    }

    #[test]
    fn test_nan_score_does_not_block_later_model() {
        let mut registry = ModelRegistry::new();
        registry
            .register(|| Model::univariate(PredictsNan))
            .register_kind(ModelKind::Linear);
        let outcome = ModelManager::with_registry(registry).predict_best_model(&small_data(), "Daily");

        assert_eq!(outcome.status(), SelectionStatus::Selected);
        assert_eq!(outcome.best_score().unwrap().model_name(), "LinearRegression");
        assert!((outcome.best_prediction() - 10.0).abs() < 1e-9);
    }
}
