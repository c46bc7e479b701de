//! @ai:module:intent Assemble per-run extraction results into one dataset
//! @ai:module:layer application
//! @ai:module:public_api DatasetBuilder
//! @ai:module:stateless true

use crate::catalog::MetricCatalog;
use crate::corpus::LoadedReports;
use crate::diagnostics::{Diagnostic, Staged};
use crate::error::{Error, Result};
use crate::metrics::extractor::MetricExtractor;
use crate::metrics::types::{Dataset, RunRecord};

/// @ai:intent Builds the run-level dataset from loaded reports
pub struct DatasetBuilder {
    extractor: MetricExtractor,
}

impl DatasetBuilder {
    pub fn new() -> Self {
        Self {
            extractor: MetricExtractor::new(),
        }
    }

    /// @ai:intent One row per loaded report, run numbers assigned from load order
    /// @ai:pre reports within each framework are already in their final order
    /// @ai:post Err(EmptyDataset) iff no framework contributed a report
    /// @ai:effects pure
    pub fn build(&self, loaded: LoadedReports, catalog: &MetricCatalog) -> Result<Staged<Dataset>> {
        tracing::info!("Extracting performance metrics...");

        let mut records = Vec::with_capacity(loaded.total());
        let mut diagnostics = Vec::new();

        for (framework, reports) in loaded.iter() {
            for (index, loaded_report) in reports.iter().enumerate() {
                let run = index + 1;
                let values = self.extractor.extract(&loaded_report.report, catalog);

                for metric in catalog.keys() {
                    if values.get(metric).copied().flatten().is_none() {
                        tracing::debug!("Metric '{}' absent for {} run {}", metric, framework, run);
                        diagnostics.push(Diagnostic::missing_metric(framework, run, metric));
                    }
                }

                records.push(RunRecord {
                    framework: framework.to_string(),
                    run,
                    values,
                });
            }
        }

        if records.is_empty() {
            tracing::error!("No metrics extracted, check the report files");
            return Err(Error::EmptyDataset {
                frameworks: loaded.frameworks(),
                diagnostics,
            });
        }

        tracing::info!("Metrics extracted from {} runs", records.len());
        Ok(Staged::new(Dataset::new(records), diagnostics))
    }
}

impl Default for DatasetBuilder {
    fn default() -> Self {
        Self::new()
    }
}
