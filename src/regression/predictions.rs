// Down-sampled predicted-vs-actual points for the scatter chart

use super::RegressionResult;
use serde::{Deserialize, Serialize};

/// Scatter charts stay readable below this many points
pub const DEFAULT_MAX_POINTS: usize = 900;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictionPoint {
    pub predicted: f64,
    pub actual: f64,
}

/// Evenly strided subset of the fitted points plus the ideal-line extent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionSample {
    pub points: Vec<PredictionPoint>,
    /// Smallest coordinate across both axes of the sampled points
    pub min: f64,
    /// Largest coordinate across both axes of the sampled points
    pub max: f64,
}

/// Take every `max(1, n / min(max_points, n))`-th observation
///
/// Returns `None` when the model has no observations or `max_points` is 0.
pub fn sample_predictions(result: &RegressionResult, max_points: usize) -> Option<PredictionSample> {
    let n = result.observations();
    let target = max_points.min(n);
    if target == 0 {
        return None;
    }
    let step = (n / target).max(1);

    let points: Vec<PredictionPoint> = result
        .fitted_values
        .iter()
        .zip(&result.actual)
        .step_by(step)
        .map(|(&predicted, &actual)| PredictionPoint { predicted, actual })
        .collect();

    let min = points
        .iter()
        .map(|p| p.predicted.min(p.actual))
        .fold(f64::INFINITY, f64::min);
    let max = points
        .iter()
        .map(|p| p.predicted.max(p.actual))
        .fold(f64::NEG_INFINITY, f64::max);

    Some(PredictionSample { points, min, max })
}
