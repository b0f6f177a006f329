// Normal-equations fit and goodness of fit

use super::matrix::{Matrix, DEFAULT_PIVOT_TOLERANCE};
use super::FitError;
use crate::record::{NumericField, Row};
use serde::{Deserialize, Serialize};

/// Predictors used by the dashboard model
pub const DEFAULT_FEATURES: [NumericField; 3] = [
    NumericField::TaskComplexity,
    NumericField::CostPerTaskCents,
    NumericField::ExecutionTimeSeconds,
];

/// Response used by the dashboard model
pub const DEFAULT_TARGET: NumericField = NumericField::AccuracyScore;

/// A fitted linear model
///
/// `coefficients[0]` is the intercept, followed by one entry per feature in
/// the order the features were given. `actual` and `fitted_values` are
/// aligned with the rows that took part in the fit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegressionResult {
    pub features: Vec<NumericField>,
    pub target: NumericField,
    pub coefficients: Vec<f64>,
    pub actual: Vec<f64>,
    pub fitted_values: Vec<f64>,
    /// `None` when the target is constant and R² is undefined
    pub r_squared: Option<f64>,
}

impl RegressionResult {
    pub fn intercept(&self) -> f64 {
        self.coefficients[0]
    }

    /// Feature coefficients without the intercept
    pub fn feature_coefficients(&self) -> impl Iterator<Item = (NumericField, f64)> + '_ {
        self.features
            .iter()
            .copied()
            .zip(self.coefficients[1..].iter().copied())
    }

    /// Number of rows the model was fitted on
    pub fn observations(&self) -> usize {
        self.actual.len()
    }

    /// Predict the target for a row, `None` if a feature is absent
    pub fn predict(&self, row: &Row) -> Option<f64> {
        let mut y = self.intercept();
        for (field, beta) in self.feature_coefficients() {
            y += beta * row.numeric(field)?;
        }
        Some(y)
    }
}

/// Fit `target ~ 1 + features` by ordinary least squares
pub fn fit(rows: &[Row], features: &[NumericField], target: NumericField) -> Result<RegressionResult, FitError> {
    fit_with_tolerance(rows, features, target, DEFAULT_PIVOT_TOLERANCE)
}

/// Same as [`fit`] with an explicit pivot tolerance for the inversion
pub fn fit_with_tolerance(
    rows: &[Row],
    features: &[NumericField],
    target: NumericField,
    tolerance: f64,
) -> Result<RegressionResult, FitError> {
    let columns = features.len() + 1;

    let mut design: Vec<Vec<f64>> = Vec::new();
    let mut actual: Vec<f64> = Vec::new();
    for row in rows {
        let Some(y) = row.numeric(target) else {
            continue;
        };
        let mut x = Vec::with_capacity(columns);
        x.push(1.0);
        x.extend(features.iter().map_while(|&f| row.numeric(f)));
        if x.len() != columns {
            continue;
        }
        design.push(x);
        actual.push(y);
    }

    if design.len() < columns {
        return Err(FitError::InsufficientData {
            required: columns,
            actual: design.len(),
        });
    }

    let x = Matrix::from_rows(&design);
    let xt = x.transpose();
    let xtx_inv = xt.mul(&x).inverse(tolerance)?;
    let xty = xt.mul(&Matrix::column(&actual));
    let coefficients = xtx_inv.mul(&xty).into_vec();

    let fitted_values: Vec<f64> = (0..x.rows())
        .map(|i| x.row(i).iter().zip(&coefficients).map(|(a, b)| a * b).sum())
        .collect();

    let r_squared = r_squared(&actual, &fitted_values);

    tracing::debug!(
        observations = actual.len(),
        ?r_squared,
        "fitted linear model"
    );

    Ok(RegressionResult {
        features: features.to_vec(),
        target,
        coefficients,
        actual,
        fitted_values,
        r_squared,
    })
}

/// Coefficient of determination; `None` when `actual` has zero variance
///
/// A constant target is detected directly, since its computed mean can be
/// one ulp off and leave a tiny non-zero total sum of squares.
pub fn r_squared(actual: &[f64], fitted: &[f64]) -> Option<f64> {
    let first = *actual.first()?;
    if actual.iter().all(|&y| y == first) {
        return None;
    }
    let mean = actual.iter().sum::<f64>() / actual.len() as f64;
    let ss_tot: f64 = actual.iter().map(|y| (y - mean).powi(2)).sum();
    if ss_tot == 0.0 {
        return None;
    }
    let ss_res: f64 = actual
        .iter()
        .zip(fitted)
        .map(|(y, f)| (y - f).powi(2))
        .sum();
    Some(1.0 - ss_res / ss_tot)
}
