//! @ai:module:intent Sequential load → extract → aggregate → normalize → export pipeline
//! @ai:module:layer application
//! @ai:module:public_api Pipeline, Analysis, PipelineOutcome

use crate::catalog::MetricCatalog;
use crate::config::AnalyzerConfig;
use crate::corpus::{ReportLoader, ReportLoaderTrait};
use crate::diagnostics::{Diagnostic, DiagnosticKind};
use crate::error::{Error, Result};
use crate::metrics::{
    AnalysisResults, ChartNormalizer, DatasetBuilder, MetricsAggregator, MetricsAggregatorTrait,
};
use crate::report::{ChartGenerator, ChartGeneratorTrait, ReportGenerator};

/// @ai:intent In-memory result of the analysis stages
#[derive(Debug, Clone)]
pub struct Analysis {
    pub results: AnalysisResults,
    pub diagnostics: Vec<Diagnostic>,
}

impl Analysis {
    pub fn count(&self, kind: DiagnosticKind) -> usize {
        self.diagnostics.iter().filter(|d| d.kind == kind).count()
    }
}

/// @ai:intent Analysis plus the artifacts written to the output directory
#[derive(Debug, Clone)]
pub struct PipelineOutcome {
    pub analysis: Analysis,
    pub artifacts: Vec<String>,
}

/// @ai:intent Owns the stage components for one configuration
pub struct Pipeline {
    config: AnalyzerConfig,
    catalog: MetricCatalog,
    loader: Box<dyn ReportLoaderTrait>,
    builder: DatasetBuilder,
    aggregator: MetricsAggregator,
    normalizer: ChartNormalizer,
    reports: ReportGenerator,
}

impl Pipeline {
    /// @ai:intent Build a pipeline with the Lighthouse catalog and default sinks
    /// @ai:effects pure
    pub fn new(config: AnalyzerConfig) -> Self {
        let loader = ReportLoader::new(&config.run.extension);
        let charts = ChartGenerator::new(config.charts.clone());

        Self {
            catalog: MetricCatalog::lighthouse(),
            loader: Box::new(loader),
            builder: DatasetBuilder::new(),
            aggregator: MetricsAggregator::new(),
            normalizer: ChartNormalizer::new(),
            reports: ReportGenerator::new(Box::new(charts)),
            config,
        }
    }

    pub fn with_catalog(mut self, catalog: MetricCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    /// Replaces the chart sink, e.g. with one that records instead of rendering.
    pub fn with_chart_sink(mut self, charts: Box<dyn ChartGeneratorTrait>) -> Self {
        self.reports = ReportGenerator::new(charts);
        self
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    pub fn catalog(&self) -> &MetricCatalog {
        &self.catalog
    }

    /// @ai:intent Run every in-memory stage; nothing is written
    /// @ai:post Err(EmptyDataset) carries the loader diagnostics explaining why
    /// @ai:effects fs:read
    pub fn analyze(&self) -> Result<Analysis> {
        let (loaded, mut diagnostics) = self
            .loader
            .load(&self.config.paths.results_dir, &self.config.run.frameworks)
            .into_parts();

        let (dataset, extraction_diagnostics) = match self.builder.build(loaded, &self.catalog) {
            Ok(staged) => staged.into_parts(),
            Err(Error::EmptyDataset {
                frameworks,
                diagnostics: builder_diagnostics,
            }) => {
                diagnostics.extend(builder_diagnostics);
                return Err(Error::EmptyDataset {
                    frameworks,
                    diagnostics,
                });
            }
            Err(e) => return Err(e),
        };
        diagnostics.extend(extraction_diagnostics);

        let aggregates = self.aggregator.aggregate(&dataset, &self.catalog);
        let normalized = self.normalizer.normalize(&aggregates, &self.catalog);

        let results = AnalysisResults {
            timestamp: chrono::Utc::now().to_rfc3339(),
            metrics: self.catalog.iter().cloned().collect(),
            dataset,
            aggregates,
            normalized,
        };

        Ok(Analysis {
            results,
            diagnostics,
        })
    }

    /// @ai:intent Analyze, then export dataset, reports and charts
    /// @ai:effects fs:read, fs:write
    pub fn run(&self) -> Result<PipelineOutcome> {
        tracing::info!("Starting complete Lighthouse analysis...");

        let analysis = self.analyze()?;
        let artifacts = self
            .reports
            .generate_all(&analysis.results, &self.config.paths.output_dir)?;

        tracing::info!(
            "Analysis complete, results available in {}",
            self.config.paths.output_dir.display()
        );

        Ok(PipelineOutcome {
            analysis,
            artifacts,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::NormalizedTable;
    use crate::report::DATASET_FILE;
    use pretty_assertions::assert_eq;
    use std::path::Path;
    use std::sync::{Arc, Mutex};
    use tempfile::TempDir;

    /// Chart sink that records what it was asked to draw.
    struct RecordingCharts {
        seen: Arc<Mutex<Option<NormalizedTable>>>,
    }

    impl ChartGeneratorTrait for RecordingCharts {
        fn generate_all(&self, results: &AnalysisResults, _output_dir: &Path) -> Result<Vec<String>> {
            *self.seen.lock().unwrap() = Some(results.normalized.clone());
            Ok(vec!["recorded.png".to_string()])
        }
    }

    fn write_report(root: &Path, framework: &str, run: u32, content: &str) {
        let dir = root.join(framework);
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join(format!("{}-run-{}.json", framework, run)), content).unwrap();
    }

    fn fcp(value: f64) -> String {
        format!(r#"{{"audits": {{"first-contentful-paint": {{"numericValue": {}}}}}}}"#, value)
    }

    fn config(temp: &TempDir, frameworks: &[&str]) -> AnalyzerConfig {
        let mut config = AnalyzerConfig::default();
        config.paths.results_dir = temp.path().join("results");
        config.paths.output_dir = temp.path().join("charts");
        config.run.frameworks = frameworks.iter().map(|s| s.to_string()).collect();
        config.charts.disable_all();
        config
    }

    #[test]
    fn test_end_to_end_two_frameworks() {
        let temp = TempDir::new().unwrap();
        let results_dir = temp.path().join("results");
        write_report(&results_dir, "a", 1, &fcp(100.0));
        write_report(&results_dir, "a", 2, &fcp(200.0));
        write_report(&results_dir, "b", 1, r#"{"audits": {}}"#);

        let seen = Arc::new(Mutex::new(None));
        let pipeline = Pipeline::new(config(&temp, &["a", "b"])).with_chart_sink(Box::new(
            RecordingCharts {
                seen: Arc::clone(&seen),
            },
        ));

        let outcome = pipeline.run().unwrap();
        let results = &outcome.analysis.results;

        assert_eq!(results.dataset.len(), 3);

        let a = &results.aggregates[0];
        let b = &results.aggregates[1];
        assert_eq!(a.framework, "a");
        assert_eq!(a.mean("first-contentful-paint"), Some(150.0));
        let std = a.std("first-contentful-paint").unwrap();
        assert!((std - 70.71067811865476).abs() < 1e-9);
        assert_eq!(b.mean("first-contentful-paint"), None);

        assert_eq!(results.normalized.get("a", "first-contentful-paint"), Some(1.0));
        assert_eq!(results.normalized.get("b", "first-contentful-paint"), Some(0.0));

        // The sink received exactly the computed table
        assert_eq!(seen.lock().unwrap().as_ref(), Some(&results.normalized));
        assert!(outcome.artifacts.contains(&"recorded.png".to_string()));
        assert!(outcome.artifacts.contains(&DATASET_FILE.to_string()));
    }

    #[test]
    fn test_malformed_files_contribute_no_rows() {
        let temp = TempDir::new().unwrap();
        let results_dir = temp.path().join("results");
        write_report(&results_dir, "react", 1, &fcp(100.0));
        write_report(&results_dir, "react", 2, "{ not json");
        write_report(&results_dir, "vue", 1, &fcp(300.0));

        let analysis = Pipeline::new(config(&temp, &["react", "vue", "angular"]))
            .analyze()
            .unwrap();

        assert_eq!(analysis.results.dataset.len(), 2);
        assert_eq!(analysis.count(DiagnosticKind::MalformedReport), 1);
        assert_eq!(analysis.count(DiagnosticKind::DiscoveryMiss), 1);
        assert_eq!(analysis.results.aggregates.len(), 2);
    }

    #[test]
    fn test_empty_dataset_aborts_before_export() {
        let temp = TempDir::new().unwrap();
        let cfg = config(&temp, &["react", "vue"]);
        let output_dir = cfg.paths.output_dir.clone();

        let err = Pipeline::new(cfg).run().unwrap_err();

        match err {
            Error::EmptyDataset {
                frameworks,
                diagnostics,
            } => {
                assert_eq!(frameworks, vec!["react", "vue"]);
                assert_eq!(diagnostics.len(), 2);
                assert!(diagnostics.iter().all(|d| d.kind == DiagnosticKind::DiscoveryMiss));
            }
            other => panic!("expected EmptyDataset, got {}", other),
        }
        assert!(!output_dir.exists());
    }

    #[test]
    fn test_custom_catalog_drives_extraction() {
        use crate::catalog::{LookupPath, MetricDefinition};

        let temp = TempDir::new().unwrap();
        let results_dir = temp.path().join("results");
        write_report(
            &results_dir,
            "svelte",
            1,
            r#"{"audits": {"cumulative-layout-shift": {"numericValue": 0.02}}}"#,
        );
        write_report(
            &results_dir,
            "svelte",
            2,
            r#"{"timing": {"cls": [0.04]}}"#,
        );

        let cls = MetricDefinition::audit("cumulative-layout-shift", "Cumulative Layout Shift (CLS)", "score")
            .with_fallback(LookupPath::new(vec![]).key("timing").key("cls").index(0));
        let catalog = MetricCatalog::new(vec![cls]).unwrap();

        let pipeline = Pipeline::new(config(&temp, &["svelte"])).with_catalog(catalog);
        let analysis = pipeline.analyze().unwrap();

        assert_eq!(pipeline.catalog().len(), 1);
        assert_eq!(analysis.results.metrics.len(), 1);
        assert!(analysis.diagnostics.is_empty());
        let mean = analysis.results.aggregates[0].mean("cumulative-layout-shift").unwrap();
        assert!((mean - 0.03).abs() < 1e-12);
    }

    #[test]
    fn test_huge_metric_values_stay_finite_through_pipeline() {
        let temp = TempDir::new().unwrap();
        let results_dir = temp.path().join("results");
        let huge = r#"{"audits": {"first-contentful-paint": {"numericValue": 1.5e308}}}"#;
        write_report(&results_dir, "a", 1, huge);
        write_report(&results_dir, "a", 2, huge);
        write_report(&results_dir, "b", 1, &fcp(10.0));

        let seen = Arc::new(Mutex::new(None));
        let outcome = Pipeline::new(config(&temp, &["a", "b"]))
            .with_chart_sink(Box::new(RecordingCharts {
                seen: Arc::clone(&seen),
            }))
            .run()
            .unwrap();
        let results = &outcome.analysis.results;

        assert_eq!(results.aggregates[0].mean("first-contentful-paint"), Some(1.5e308));
        assert_eq!(results.aggregates[0].std("first-contentful-paint"), Some(0.0));

        let recorded = seen.lock().unwrap().clone().unwrap();
        for framework in ["a", "b"] {
            let value = recorded.get(framework, "first-contentful-paint").unwrap();
            assert!((0.0..=1.0).contains(&value), "{} out of range: {}", framework, value);
        }

        let json = std::fs::read_to_string(temp.path().join("charts").join(crate::report::AGGREGATES_FILE))
            .unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        let stats = &parsed["aggregates"][0]["per_metric"]["first-contentful-paint"];
        assert_eq!(stats["mean"].as_f64(), Some(1.5e308));
        assert_eq!(stats["samples"], 2);
    }

    #[test]
    fn test_dataset_export_is_byte_identical_across_runs() {
        let temp = TempDir::new().unwrap();
        let results_dir = temp.path().join("results");
        for run in 1..=12 {
            write_report(&results_dir, "react", run, &fcp(100.0 + run as f64 * 0.1));
        }
        write_report(
            &results_dir,
            "vue",
            1,
            r#"{"audits": {"metrics": {"details": {"items": [{"observedDomContentLoaded": 77.7}]}}}}"#,
        );

        let cfg = config(&temp, &["react", "vue"]);
        let csv_path = cfg.paths.output_dir.join(DATASET_FILE);

        Pipeline::new(cfg.clone()).run().unwrap();
        let first = std::fs::read(&csv_path).unwrap();
        Pipeline::new(cfg).run().unwrap();
        let second = std::fs::read(&csv_path).unwrap();

        assert_eq!(first, second);

        let text = String::from_utf8(first).unwrap();
        assert_eq!(text.lines().count(), 14);
        assert!(text.lines().last().unwrap().starts_with("vue,1,"));
        assert!(text.contains(",77.7,"));
    }
}
