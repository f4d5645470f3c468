//! Polynomial feature expansion.

use faer::{Col, Mat};

/// Expands feature vectors into every monomial up to a total degree.
///
/// For `k` features and degree `D` the expansion has `C(k + D, D)` terms. The
/// constant term comes first and acts as the bias column, so expanded
/// matrices are fitted without an extra intercept.
///
/// # Example
///
/// ```rust,ignore
/// use regress_select::utils::PolynomialExpander;
///
/// // [x, y] at degree 2 -> [1, x, x², y, xy, y²]
/// let terms = PolynomialExpander::new(2).expand_single(&x);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PolynomialExpander {
    degree: usize,
}

impl PolynomialExpander {
    /// Create an expander for the given maximum total degree.
    pub fn new(degree: usize) -> Self {
        Self { degree }
    }

    /// Maximum total degree of the generated monomials.
    pub fn degree(&self) -> usize {
        self.degree
    }

    /// Number of terms produced for `n_features` inputs.
    pub fn n_terms(&self, n_features: usize) -> usize {
        // C(n_features + degree, degree), built incrementally to stay exact.
        let mut terms = 1usize;
        for i in 1..=self.degree {
            terms = terms * (n_features + i) / i;
        }
        terms
    }

    /// Expand a single feature vector.
    pub fn expand_single(&self, input: &Col<f64>) -> Col<f64> {
        let values: Vec<f64> = input.iter().copied().collect();
        let mut exponents = vec![0usize; values.len()];
        let mut terms = Vec::with_capacity(self.n_terms(values.len()));

        generate_terms(&values, &mut exponents, values.len(), self.degree, &mut terms);

        Col::from_fn(terms.len(), |i| terms[i])
    }

    /// Expand every row of a feature matrix.
    pub fn expand(&self, x: &Mat<f64>) -> Mat<f64> {
        let n_terms = self.n_terms(x.ncols());
        let mut expanded = Mat::zeros(x.nrows(), n_terms);

        for i in 0..x.nrows() {
            let row = Col::from_fn(x.ncols(), |j| x[(i, j)]);
            let terms = self.expand_single(&row);
            for j in 0..n_terms {
                expanded[(i, j)] = terms[j];
            }
        }

        expanded
    }
}

/// Depth-first enumeration of exponent vectors with total degree ≤ `degree_left`.
///
/// `remaining` counts the features still to be assigned, taken from the last
/// one down to feature 0, so feature 0's exponent varies fastest.
fn generate_terms(
    values: &[f64],
    exponents: &mut [usize],
    remaining: usize,
    degree_left: usize,
    terms: &mut Vec<f64>,
) {
    if remaining == 0 {
        let product: f64 = values
            .iter()
            .zip(exponents.iter())
            .map(|(&v, &e)| v.powi(e as i32))
            .product();
        terms.push(product);
        return;
    }

    let pos = remaining - 1;
    for d in 0..=degree_left {
        exponents[pos] = d;
        generate_terms(values, exponents, pos, degree_left - d, terms);
    }
    exponents[pos] = 0;
}
