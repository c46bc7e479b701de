//! @ai:module:intent Export sinks for analysis results
//! @ai:module:layer infrastructure
//! @ai:module:public_api ReportGenerator, CsvExporter, JsonReporter, MarkdownReporter, ChartGenerator

pub mod charts;
pub mod csv_export;
pub mod json_report;
pub mod markdown_report;

pub use charts::{ChartGenerator, ChartGeneratorTrait};
pub use csv_export::{CsvExporter, CsvExporterTrait};
pub use json_report::{JsonReporter, JsonReporterTrait};
pub use markdown_report::{MarkdownReporter, MarkdownReporterTrait};

use crate::error::Result;
use crate::metrics::AnalysisResults;
use std::path::Path;

pub const DATASET_FILE: &str = "raw_metrics.csv";
pub const AGGREGATES_FILE: &str = "aggregates.json";
pub const SUMMARY_FILE: &str = "summary.md";

/// @ai:intent Combined report generator
pub struct ReportGenerator {
    csv: CsvExporter,
    json: JsonReporter,
    markdown: MarkdownReporter,
    charts: Box<dyn ChartGeneratorTrait>,
}

impl ReportGenerator {
    /// @ai:intent Create a report generator with the given chart sink
    /// @ai:effects pure
    pub fn new(charts: Box<dyn ChartGeneratorTrait>) -> Self {
        Self {
            csv: CsvExporter::new(),
            json: JsonReporter::new(),
            markdown: MarkdownReporter::new(),
            charts,
        }
    }

    /// @ai:intent Write dataset, aggregates, summary and charts; returns the file names written
    /// @ai:effects fs:write
    pub fn generate_all(&self, results: &AnalysisResults, output_dir: &Path) -> Result<Vec<String>> {
        std::fs::create_dir_all(output_dir)?;

        let metric_keys: Vec<String> = results.metrics.iter().map(|m| m.key.clone()).collect();

        self.csv
            .export(&results.dataset, &metric_keys, &output_dir.join(DATASET_FILE))?;
        self.json.generate(results, &output_dir.join(AGGREGATES_FILE))?;
        self.markdown.generate(results, &output_dir.join(SUMMARY_FILE))?;

        let mut written = vec![
            DATASET_FILE.to_string(),
            AGGREGATES_FILE.to_string(),
            SUMMARY_FILE.to_string(),
        ];
        written.extend(self.charts.generate_all(results, output_dir)?);

        tracing::info!("Reports generated in {}", output_dir.display());
        Ok(written)
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new(Box::new(ChartGenerator::default()))
    }
}
