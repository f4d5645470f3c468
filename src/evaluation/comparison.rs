//! Presentation order for score tables.

use crate::core::ModelScore;

const FAMILY_ORDER: [&str; 6] = [
    "LinearRegression",
    "MultiFeatureLinearRegression",
    "PolynomialRegression",
    "MultivariatePolyRegression",
    "RidgeRegression",
    "LassoRegression",
];

fn family_rank(name: &str) -> usize {
    FAMILY_ORDER
        .iter()
        .position(|family| name.starts_with(family))
        .unwrap_or(FAMILY_ORDER.len())
}

/// Degree embedded in a model name as `deg=N` (any case), or 0.
fn embedded_degree(name: &str) -> usize {
    let lower = name.to_lowercase();
    lower
        .find("deg=")
        .map(|idx| {
            lower[idx + 4..]
                .chars()
                .take_while(|c| c.is_ascii_digit())
                .collect::<String>()
        })
        .and_then(|digits| digits.parse().ok())
        .unwrap_or(0)
}

/// Sort scores into family order, then by ascending degree within a family.
///
/// Families: linear, multi-feature linear, polynomial, multivariate
/// polynomial, ridge, lasso. Unrecognized names sort last. The sort is
/// stable, so scores that compare equal keep their relative order.
pub fn sort_for_comparison(scores: &mut [ModelScore]) {
    scores.sort_by_key(|s| (family_rank(s.model_name()), embedded_degree(s.model_name())));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn score(name: &str) -> ModelScore {
        ModelScore::new(name.to_string(), "Daily".to_string(), 0.0, 0.0, 0.0, 0.0, 0.0)
    }

    #[test]
    fn test_embedded_degree() {
        assert_eq!(embedded_degree("PolynomialRegression (deg=4)"), 4);
        assert_eq!(embedded_degree("MultivariatePolyRegression (maxDeg=12)"), 12);
        assert_eq!(embedded_degree("RidgeRegression (λ=0.5)"), 0);
    }

    #[test]
    fn test_sort_for_comparison() {
        let mut scores = vec![
            score("LassoRegression (λ=0.1)"),
            score("Custom"),
            score("PolynomialRegression (deg=3)"),
            score("MultivariatePolyRegression (maxDeg=2)"),
            score("PolynomialRegression (deg=2)"),
            score("RidgeRegression (λ=0.5)"),
            score("MultiFeatureLinearRegression"),
            score("LinearRegression"),
        ];
        sort_for_comparison(&mut scores);

        let names: Vec<&str> = scores.iter().map(|s| s.model_name()).collect();
        assert_eq!(
            names,
            vec![
                "LinearRegression",
                "MultiFeatureLinearRegression",
                "PolynomialRegression (deg=2)",
                "PolynomialRegression (deg=3)",
                "MultivariatePolyRegression (maxDeg=2)",
                "RidgeRegression (λ=0.5)",
                "LassoRegression (λ=0.1)",
                "Custom",
            ]
        );
    }
}
