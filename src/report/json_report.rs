//! @ai:module:intent JSON report generation
//! @ai:module:layer infrastructure
//! @ai:module:public_api JsonReporter
//! @ai:module:stateless true

use crate::error::Result;
use crate::metrics::AnalysisResults;
use std::path::Path;

/// @ai:intent Trait for JSON report generation
pub trait JsonReporterTrait: Send + Sync {
    /// @ai:intent Generate JSON report from results
    fn generate(&self, results: &AnalysisResults, output_path: &Path) -> Result<()>;
}

/// @ai:intent Generates JSON reports of aggregates and normalized values
pub struct JsonReporter;

impl JsonReporter {
    /// @ai:intent Create a new JSON reporter
    /// @ai:effects pure
    pub fn new() -> Self {
        Self
    }
}

impl Default for JsonReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl JsonReporterTrait for JsonReporter {
    /// @ai:intent Generate JSON report to file
    /// @ai:effects fs:write
    fn generate(&self, results: &AnalysisResults, output_path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(results)?;
        std::fs::write(output_path, json)?;
        Ok(())
    }
}
