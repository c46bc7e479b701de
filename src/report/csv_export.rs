//! @ai:module:intent CSV export of the run-level dataset
//! @ai:module:layer infrastructure
//! @ai:module:public_api CsvExporter, CsvExporterTrait
//! @ai:module:stateless true

use crate::error::Result;
use crate::metrics::Dataset;
use std::fmt::Write as FmtWrite;
use std::path::Path;

/// @ai:intent Trait for dataset export
pub trait CsvExporterTrait: Send + Sync {
    /// @ai:intent Write the dataset with one row per run
    fn export(&self, dataset: &Dataset, metric_keys: &[String], output_path: &Path) -> Result<()>;
}

/// @ai:intent Writes `framework,run,<metric...>` rows; absent metrics are empty cells
pub struct CsvExporter;

impl CsvExporter {
    pub fn new() -> Self {
        Self
    }

    /// @ai:intent Render the dataset as CSV text
    /// @ai:post identical input always yields identical bytes
    /// @ai:effects pure
    pub fn render(dataset: &Dataset, metric_keys: &[String]) -> String {
        let mut output = String::new();

        let mut header = vec!["framework".to_string(), "run".to_string()];
        header.extend(metric_keys.iter().map(|k| escape_field(k)));
        output.push_str(&header.join(","));
        output.push('\n');

        for record in dataset.records() {
            write!(output, "{},{}", escape_field(&record.framework), record.run).unwrap();

            for key in metric_keys {
                output.push(',');
                if let Some(value) = record.value(key) {
                    write!(output, "{}", value).unwrap();
                }
            }

            output.push('\n');
        }

        output
    }
}

impl Default for CsvExporter {
    fn default() -> Self {
        Self::new()
    }
}

impl CsvExporterTrait for CsvExporter {
    /// @ai:effects fs:write
    fn export(&self, dataset: &Dataset, metric_keys: &[String], output_path: &Path) -> Result<()> {
        std::fs::write(output_path, Self::render(dataset, metric_keys))?;
        tracing::info!("Metrics exported to {}", output_path.display());
        Ok(())
    }
}

/// Quote a field when it contains a delimiter, quote or line break.
fn escape_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
