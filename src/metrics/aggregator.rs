//! @ai:module:intent Statistical aggregation of run metrics per framework
//! @ai:module:layer application
//! @ai:module:public_api MetricsAggregator, MetricsAggregatorTrait
//! @ai:module:stateless true

use crate::catalog::MetricCatalog;
use crate::metrics::types::{AggregateRecord, Dataset, MetricStats};
use std::collections::BTreeMap;

/// @ai:intent Trait for metrics aggregation
pub trait MetricsAggregatorTrait: Send + Sync {
    /// @ai:intent Aggregate the dataset into one record per framework
    fn aggregate(&self, dataset: &Dataset, catalog: &MetricCatalog) -> Vec<AggregateRecord>;
}

/// @ai:intent Computes mean and sample standard deviation over present values only
pub struct MetricsAggregator;

impl MetricsAggregator {
    /// @ai:intent Create a new metrics aggregator
    /// @ai:effects pure
    pub fn new() -> Self {
        Self
    }

    /// @ai:intent Summarize the present values of one metric
    /// @ai:post mean and std are None iff values is empty; std is 0 for a single value
    /// @ai:effects pure
    pub fn calculate_stats(values: &[f64]) -> MetricStats {
        let mean = match average(values.iter().copied()) {
            Some(mean) => mean,
            None => return MetricStats::undefined(),
        };

        MetricStats {
            mean: Some(mean),
            std: Some(sample_std_dev(values, mean)),
            samples: values.len(),
        }
    }
}

impl Default for MetricsAggregator {
    fn default() -> Self {
        Self::new()
    }
}

/// @ai:intent Calculate average of an iterator of f64, None when empty
/// @ai:post finite inputs give a finite mean, even when their sum overflows
/// @ai:effects pure
fn average<I: Iterator<Item = f64>>(iter: I) -> Option<f64> {
    let values: Vec<f64> = iter.collect();
    if values.is_empty() {
        return None;
    }

    let n = values.len() as f64;
    let sum: f64 = values.iter().sum();
    if sum.is_finite() {
        return Some(sum / n);
    }

    // Sum overflowed: divide before adding
    Some(values.iter().map(|v| v / n).sum())
}

/// Sample (n - 1) standard deviation; 0 for fewer than two values.
/// Deviations are scaled by the largest magnitude so squaring stays finite.
fn sample_std_dev(values: &[f64], mean: f64) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }

    let scale = values
        .iter()
        .map(|v| (v / 2.0 - mean / 2.0).abs())
        .fold(0.0, f64::max);
    if scale == 0.0 {
        return 0.0;
    }

    let sum_sq: f64 = values
        .iter()
        .map(|v| ((v / 2.0 - mean / 2.0) / scale).powi(2))
        .sum();
    (sum_sq / (values.len() - 1) as f64).sqrt() * scale * 2.0
}

impl MetricsAggregatorTrait for MetricsAggregator {
    /// @ai:intent Aggregate metrics per framework in dataset order
    /// @ai:effects pure
    fn aggregate(&self, dataset: &Dataset, catalog: &MetricCatalog) -> Vec<AggregateRecord> {
        tracing::info!("Calculating means and standard deviations...");

        let records: Vec<AggregateRecord> = dataset
            .frameworks()
            .into_iter()
            .map(|framework| {
                let runs: Vec<_> = dataset.runs_for(framework).collect();

                let per_metric: BTreeMap<String, MetricStats> = catalog
                    .keys()
                    .map(|key| {
                        let present: Vec<f64> = runs.iter().filter_map(|r| r.value(key)).collect();
                        (key.to_string(), Self::calculate_stats(&present))
                    })
                    .collect();

                AggregateRecord {
                    framework: framework.to_string(),
                    runs: runs.len(),
                    per_metric,
                }
            })
            .collect();

        tracing::info!("Aggregated {} frameworks", records.len());
        records
    }
}
