//! Top-N entity ranking
//!
//! Entities (model architectures in the dashboard) are ranked by their mean
//! performance index. Absent metric values count as 0, so an entity with
//! sparse data is pulled down rather than skipped.

use crate::record::{CategoryField, NumericField, Row};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Rows shown in the "top performers" table
pub const DEFAULT_TOP_N: usize = 6;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedEntity {
    pub name: String,
    pub mean_performance: f64,
    pub mean_accuracy: f64,
    /// Rows contributing to the means
    pub count: usize,
}

#[derive(Default)]
struct Accumulator {
    perf: f64,
    acc: f64,
    count: usize,
}

/// Rank entities by mean `perf_field`, highest first, at most `n` entries
///
/// Ties keep the order in which entities were first encountered.
pub fn top_n(
    rows: &[Row],
    entity_field: CategoryField,
    perf_field: NumericField,
    acc_field: NumericField,
    n: usize,
) -> Vec<RankedEntity> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<(&str, Accumulator)> = Vec::new();

    for row in rows {
        let Some(name) = row.category(entity_field) else {
            continue;
        };
        let slot = *index.entry(name).or_insert_with(|| {
            groups.push((name, Accumulator::default()));
            groups.len() - 1
        });
        let entry = &mut groups[slot].1;
        entry.perf += row.numeric(perf_field).unwrap_or(0.0);
        entry.acc += row.numeric(acc_field).unwrap_or(0.0);
        entry.count += 1;
    }

    let mut ranked: Vec<RankedEntity> = groups
        .into_iter()
        .map(|(name, a)| RankedEntity {
            name: name.to_string(),
            mean_performance: a.perf / a.count as f64,
            mean_accuracy: a.acc / a.count as f64,
            count: a.count,
        })
        .collect();

    // sort_by is stable
    ranked.sort_by(|a, b| b.mean_performance.total_cmp(&a.mean_performance));
    ranked.truncate(n);
    ranked
}

/// Dashboard ranking: model architectures by performance index, then accuracy
pub fn top_models(rows: &[Row], n: usize) -> Vec<RankedEntity> {
    top_n(
        rows,
        CategoryField::ModelArchitecture,
        NumericField::PerformanceIndex,
        NumericField::AccuracyScore,
        n,
    )
}
