//! @ai:module:intent Rescale aggregate means into [0, 1] for combined charts
//! @ai:module:layer application
//! @ai:module:public_api ChartNormalizer
//! @ai:module:stateless true

use crate::catalog::MetricCatalog;
use crate::metrics::types::{AggregateRecord, NormalizedTable};
use std::collections::BTreeMap;

/// @ai:intent Divides each mean by the largest mean of its metric
pub struct ChartNormalizer;

impl ChartNormalizer {
    pub fn new() -> Self {
        Self
    }

    /// @ai:intent Normalize every (framework, metric) pair
    /// @ai:post every value is finite and within [0, 1]; undefined means map to 0
    /// @ai:effects pure
    pub fn normalize(&self, aggregates: &[AggregateRecord], catalog: &MetricCatalog) -> NormalizedTable {
        let frameworks: Vec<String> = aggregates.iter().map(|a| a.framework.clone()).collect();
        let mut values = BTreeMap::new();

        for key in catalog.keys() {
            let max_mean = aggregates
                .iter()
                .filter_map(|a| a.mean(key))
                .fold(None, |max: Option<f64>, v| Some(max.map_or(v, |m| m.max(v))));

            let per_framework: BTreeMap<String, f64> = aggregates
                .iter()
                .map(|a| {
                    let ratio = match (a.mean(key), max_mean) {
                        (Some(mean), Some(max)) if max > 0.0 => mean / max,
                        _ => 0.0,
                    };
                    // NaN survives clamp
                    let normalized = if ratio.is_finite() { ratio.clamp(0.0, 1.0) } else { 0.0 };
                    (a.framework.clone(), normalized)
                })
                .collect();

            values.insert(key.to_string(), per_framework);
        }

        NormalizedTable {
            frameworks,
            metrics: catalog.keys().map(str::to_string).collect(),
            values,
        }
    }
}

impl Default for ChartNormalizer {
    fn default() -> Self {
        Self::new()
    }
}
