//! @ai:module:intent Row, aggregate and normalized value types for extracted metrics
//! @ai:module:layer domain
//! @ai:module:public_api MetricValues, RunRecord, Dataset, MetricStats, AggregateRecord, NormalizedTable, AnalysisResults
//! @ai:module:stateless true

use crate::catalog::MetricDefinition;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Metric key to value; `None` is an absent metric, never zero.
pub type MetricValues = BTreeMap<String, Option<f64>>;

/// @ai:intent Extracted metrics for one run of one framework
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunRecord {
    pub framework: String,
    /// 1-based position within the framework's sorted report list.
    pub run: usize,
    pub values: MetricValues,
}

impl RunRecord {
    /// @ai:intent Value for a metric, None when absent or unknown
    /// @ai:effects pure
    pub fn value(&self, metric: &str) -> Option<f64> {
        self.values.get(metric).copied().flatten()
    }
}

/// @ai:intent Ordered rows, one per successfully loaded report
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    records: Vec<RunRecord>,
}

impl Dataset {
    pub fn new(records: Vec<RunRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[RunRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// @ai:intent Frameworks in order of first appearance
    /// @ai:effects pure
    pub fn frameworks(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();

        for record in &self.records {
            if !seen.contains(&record.framework.as_str()) {
                seen.push(&record.framework);
            }
        }

        seen
    }

    pub fn runs_for<'a>(&'a self, framework: &'a str) -> impl Iterator<Item = &'a RunRecord> + 'a {
        self.records.iter().filter(move |r| r.framework == framework)
    }
}

/// @ai:intent Mean and standard deviation over the present values of one metric
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricStats {
    pub mean: Option<f64>,
    pub std: Option<f64>,
    /// Number of runs where the metric was present.
    pub samples: usize,
}

impl MetricStats {
    pub fn undefined() -> Self {
        Self::default()
    }

    pub fn is_defined(&self) -> bool {
        self.mean.is_some()
    }
}

/// @ai:intent Per-framework summary statistics, keyed by metric
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateRecord {
    pub framework: String,
    pub runs: usize,
    pub per_metric: BTreeMap<String, MetricStats>,
}

impl AggregateRecord {
    pub fn stats(&self, metric: &str) -> MetricStats {
        self.per_metric.get(metric).copied().unwrap_or_default()
    }

    pub fn mean(&self, metric: &str) -> Option<f64> {
        self.stats(metric).mean
    }

    pub fn std(&self, metric: &str) -> Option<f64> {
        self.stats(metric).std
    }
}

/// @ai:intent Aggregate means rescaled to [0, 1] per metric
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NormalizedTable {
    pub frameworks: Vec<String>,
    pub metrics: Vec<String>,
    /// metric key -> framework -> value in [0, 1]
    pub values: BTreeMap<String, BTreeMap<String, f64>>,
}

impl NormalizedTable {
    /// @ai:intent Normalized value for a (framework, metric) pair
    /// @ai:effects pure
    pub fn get(&self, framework: &str, metric: &str) -> Option<f64> {
        self.values.get(metric)?.get(framework).copied()
    }

    /// @ai:intent Values for one framework in metric order
    /// @ai:effects pure
    pub fn row(&self, framework: &str) -> Vec<f64> {
        self.metrics
            .iter()
            .map(|m| self.get(framework, m).unwrap_or(0.0))
            .collect()
    }
}

/// @ai:intent Complete output of one analysis pass, handed to the export sinks
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResults {
    pub timestamp: String,
    pub metrics: Vec<MetricDefinition>,
    /// Exported separately as CSV.
    #[serde(skip)]
    pub dataset: Dataset,
    pub aggregates: Vec<AggregateRecord>,
    pub normalized: NormalizedTable,
}

impl AnalysisResults {
    pub fn frameworks(&self) -> Vec<&str> {
        self.aggregates.iter().map(|a| a.framework.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(framework: &str, run: usize, fcp: Option<f64>) -> RunRecord {
        let mut values = MetricValues::new();
        values.insert("first-contentful-paint".to_string(), fcp);
        RunRecord {
            framework: framework.to_string(),
            run,
            values,
        }
    }

    #[test]
    fn test_frameworks_first_appearance() {
        let dataset = Dataset::new(vec![
            record("vue", 1, Some(1.0)),
            record("react", 1, None),
            record("vue", 2, Some(2.0)),
        ]);

        assert_eq!(dataset.frameworks(), vec!["vue", "react"]);
        assert_eq!(dataset.runs_for("vue").count(), 2);
    }

    #[test]
    fn test_value_absent_vs_unknown() {
        let r = record("vue", 1, None);
        assert_eq!(r.value("first-contentful-paint"), None);
        assert_eq!(r.value("speed-index"), None);
        assert_eq!(record("vue", 1, Some(0.0)).value("first-contentful-paint"), Some(0.0));
    }
}
