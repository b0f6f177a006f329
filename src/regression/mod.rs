// Ordinary least squares over a fixed feature set
//
// accuracy_score ~ 1 + task_complexity + cost_per_task_cents + execution_time_seconds
//
// Coefficients come from the normal equations, (XᵗX)⁻¹ Xᵗy, with the inverse
// computed by Gauss-Jordan elimination. Failures are explicit: too few rows
// for the number of parameters, or a singular XᵗX (collinear or constant
// features). Neither case returns partial coefficients.
//
// Sums run in row order, so results are independent of input order only up
// to floating-point rounding.

mod matrix;
mod ols;
mod predictions;

pub use matrix::{Matrix, DEFAULT_PIVOT_TOLERANCE};
pub use ols::{
    fit, fit_with_tolerance, r_squared, RegressionResult, DEFAULT_FEATURES, DEFAULT_TARGET,
};
pub use predictions::{sample_predictions, PredictionPoint, PredictionSample, DEFAULT_MAX_POINTS};

use thiserror::Error;

/// Why a fit produced no model
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FitError {
    #[error("Insufficient data: need at least {required} rows, got {actual}")]
    InsufficientData { required: usize, actual: usize },

    #[error("Singular design matrix: no usable pivot for column {column}")]
    Singular { column: usize },
}
