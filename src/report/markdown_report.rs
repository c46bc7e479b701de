//! @ai:module:intent Markdown summary of per-framework statistics
//! @ai:module:layer infrastructure
//! @ai:module:public_api MarkdownReporter
//! @ai:module:stateless true

use crate::error::Result;
use crate::metrics::{AnalysisResults, MetricStats};
use std::fmt::Write as FmtWrite;
use std::path::Path;

/// @ai:intent Trait for Markdown report generation
pub trait MarkdownReporterTrait: Send + Sync {
    /// @ai:intent Generate Markdown report from results
    fn generate(&self, results: &AnalysisResults, output_path: &Path) -> Result<()>;
}

/// @ai:intent Generates Markdown reports from analysis results
pub struct MarkdownReporter;

impl MarkdownReporter {
    /// @ai:intent Create a new Markdown reporter
    /// @ai:effects pure
    pub fn new() -> Self {
        Self
    }

    /// @ai:intent Format mean ± std, or n/a when undefined
    /// @ai:effects pure
    fn format_stats(stats: &MetricStats) -> String {
        match (stats.mean, stats.std) {
            (Some(mean), Some(std)) => format!("{:.2} ± {:.2}", mean, std),
            (Some(mean), None) => format!("{:.2}", mean),
            _ => "n/a".to_string(),
        }
    }

    /// @ai:intent Render the whole report
    /// @ai:effects pure
    pub fn render(results: &AnalysisResults) -> String {
        let mut output = String::new();

        writeln!(output, "# Lighthouse Performance Comparison").unwrap();
        writeln!(output).unwrap();
        writeln!(output, "**Date:** {}", results.timestamp).unwrap();
        writeln!(output, "**Frameworks:** {}", results.frameworks().join(", ")).unwrap();
        writeln!(output, "**Runs:** {}", results.dataset.len()).unwrap();
        writeln!(output).unwrap();

        writeln!(output, "## Runs per Framework").unwrap();
        writeln!(output).unwrap();
        writeln!(output, "| Framework | Runs |").unwrap();
        writeln!(output, "|-----------|------|").unwrap();
        for aggregate in &results.aggregates {
            writeln!(output, "| {} | {} |", aggregate.framework, aggregate.runs).unwrap();
        }
        writeln!(output).unwrap();

        for metric in &results.metrics {
            writeln!(output, "## {}", metric.display_name).unwrap();
            writeln!(output).unwrap();
            writeln!(output, "| Framework | Mean ± Std ({}) | Samples | Normalized |", metric.unit).unwrap();
            writeln!(output, "|-----------|------------|---------|------------|").unwrap();

            for aggregate in &results.aggregates {
                let stats = aggregate.stats(&metric.key);
                let normalized = results
                    .normalized
                    .get(&aggregate.framework, &metric.key)
                    .unwrap_or(0.0);

                writeln!(
                    output,
                    "| {} | {} | {} | {:.2} |",
                    aggregate.framework,
                    Self::format_stats(&stats),
                    stats.samples,
                    normalized
                )
                .unwrap();
            }

            writeln!(output).unwrap();
        }

        output
    }
}

impl Default for MarkdownReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkdownReporterTrait for MarkdownReporter {
    /// @ai:intent Generate Markdown report to file
    /// @ai:effects fs:write
    fn generate(&self, results: &AnalysisResults, output_path: &Path) -> Result<()> {
        std::fs::write(output_path, Self::render(results))?;
        Ok(())
    }
}
