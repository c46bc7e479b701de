//! @ai:module:intent Lighthouse report analysis library
//! @ai:module:layer application
//! @ai:module:public_api catalog, config, corpus, diagnostics, error, metrics, pipeline, report

pub mod catalog;
pub mod config;
pub mod corpus;
pub mod diagnostics;
pub mod error;
pub mod metrics;
pub mod pipeline;
pub mod report;

pub use catalog::{MetricCatalog, MetricDefinition};
pub use config::AnalyzerConfig;
pub use corpus::{RawReport, ReportLoader};
pub use diagnostics::{Diagnostic, DiagnosticKind, Staged};
pub use error::{Error, Result};
pub use metrics::{AggregateRecord, AnalysisResults, Dataset, NormalizedTable, RunRecord};
pub use pipeline::{Analysis, Pipeline, PipelineOutcome};
pub use report::ReportGenerator;
