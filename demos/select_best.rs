//! Run one prediction cycle on a synthetic price series and print the
//! comparison table.
//!
//! ```text
//! RUST_LOG=regress_select=debug cargo run --example select_best
//! ```

use regress_select::evaluation::sort_for_comparison;
use regress_select::prelude::*;

fn main() -> Result<(), RegressionError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "regress_select=info".into()),
        )
        .init();

    // Lagged, roughly z-scored features: previous return and a slow moving average.
    let n = 80;
    let prices: Vec<f64> = (0..n)
        .map(|i| {
            let t = i as f64;
            100.0 + 0.3 * t + 2.0 * (t / 6.0).sin()
        })
        .collect();
    let rows: Vec<Vec<f64>> = (0..n)
        .map(|i| {
            let prev = if i == 0 { prices[0] } else { prices[i - 1] };
            let start = i.saturating_sub(5);
            let window = &prices[start..=i];
            let mean = window.iter().sum::<f64>() / window.len() as f64;
            vec![(prices[i] - prev) / 2.0, (mean - 112.0) / 7.0]
        })
        .collect();
    let targets: Vec<f64> = (0..n).map(|i| prices[(i + 1).min(n - 1)]).collect();

    let split = 64;
    let data = ForecastData::from_rows(
        &rows[..split],
        &rows[split..n - 1],
        &targets[..split],
        &targets[split..n - 1],
        &rows[n - 1],
        &prices[..split],
    )?;

    let options = EngineOptions::builder()
        .ridge_lambda(0.5)
        .lasso_lambda(0.1)
        .polynomial_degrees(2, 4)
        .build()?;
    let outcome = ModelManager::new(&options).predict_best_model(&data, "Daily");

    let mut scores = outcome.scores().to_vec();
    sort_for_comparison(&mut scores);
    for score in &scores {
        println!("{score}");
    }
    for failure in outcome.failures() {
        println!("{} failed: {}", failure.model_name, failure.error);
    }

    match outcome.best_score() {
        Some(best) => println!(
            "\nbest: {} -> next close {:.2}",
            best.model_name(),
            outcome.best_prediction()
        ),
        None => println!("\nno model selected ({:?})", outcome.status()),
    }
    Ok(())
}
