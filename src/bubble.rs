//! Bubble-chart projection: complexity vs execution time, sized by accuracy

use crate::record::Row;
use serde::{Deserialize, Serialize};

const MIN_RADIUS: f64 = 3.0;
const RADIUS_RANGE: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BubblePoint {
    /// Task complexity
    pub x: f64,
    /// Execution time in seconds
    pub y: f64,
    pub radius: f64,
    pub accuracy: f64,
}

impl BubblePoint {
    pub fn from_row(row: &Row) -> Self {
        Self {
            x: row.task_complexity,
            y: row.execution_time_seconds,
            radius: MIN_RADIUS + row.accuracy_score.clamp(0.0, 1.0) * RADIUS_RANGE,
            accuracy: row.accuracy_score,
        }
    }
}

/// One bubble per row, input order preserved
pub fn bubble_points(rows: &[Row]) -> Vec<BubblePoint> {
    rows.iter().map(BubblePoint::from_row).collect()
}
