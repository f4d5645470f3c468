//! Forecasting models: univariate trends and multivariate regressors.

mod traits;
mod linear;
mod multi_linear;
mod ridge;
mod lasso;
mod polynomial;
mod multi_polynomial;
mod model;

pub use traits::{Capability, MultivariateModel, RegressionError, UnivariateModel};
pub use linear::LinearRegression;
pub use multi_linear::MultiFeatureLinearRegression;
pub use ridge::RidgeRegression;
pub use lasso::{LassoRegression, LassoRegressionBuilder};
pub use polynomial::PolynomialRegression;
pub use multi_polynomial::MultivariatePolynomialRegression;
pub use model::{Model, ModelKind};
