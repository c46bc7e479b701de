//! @ai:module:intent Recoverable per-stage diagnostics
//! @ai:module:layer domain
//! @ai:module:public_api Diagnostic, DiagnosticKind, Staged
//! @ai:module:stateless true

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// @ai:intent Category of a recovered problem
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// Framework directory missing or holding no matching report files.
    DiscoveryMiss,
    /// Report file unreadable or not a JSON document.
    MalformedReport,
    /// Metric not resolvable in an otherwise valid report.
    MissingMetric,
}

impl DiagnosticKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiagnosticKind::DiscoveryMiss => "discovery_miss",
            DiagnosticKind::MalformedReport => "malformed_report",
            DiagnosticKind::MissingMetric => "missing_metric",
        }
    }
}

impl std::fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// @ai:intent A problem recovered locally by a pipeline stage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub framework: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metric: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub run: Option<usize>,
    pub message: String,
}

impl Diagnostic {
    /// @ai:intent Framework location missing or empty
    /// @ai:effects pure
    pub fn discovery_miss(framework: &str, message: impl Into<String>) -> Self {
        Self {
            kind: DiagnosticKind::DiscoveryMiss,
            framework: framework.to_string(),
            file: None,
            metric: None,
            run: None,
            message: message.into(),
        }
    }

    /// @ai:intent Report file rejected before extraction
    /// @ai:effects pure
    pub fn malformed_report(framework: &str, file: PathBuf, message: impl Into<String>) -> Self {
        Self {
            kind: DiagnosticKind::MalformedReport,
            framework: framework.to_string(),
            file: Some(file),
            metric: None,
            run: None,
            message: message.into(),
        }
    }

    /// @ai:intent Metric absent for one run
    /// @ai:effects pure
    pub fn missing_metric(framework: &str, run: usize, metric: &str) -> Self {
        Self {
            kind: DiagnosticKind::MissingMetric,
            framework: framework.to_string(),
            file: None,
            metric: Some(metric.to_string()),
            run: Some(run),
            message: format!("metric '{}' absent for {} run {}", metric, framework, run),
        }
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.kind, self.message)
    }
}

/// @ai:intent Output of a stage together with the problems it recovered from
#[derive(Debug, Clone)]
pub struct Staged<T> {
    pub output: T,
    pub diagnostics: Vec<Diagnostic>,
}

impl<T> Staged<T> {
    pub fn new(output: T, diagnostics: Vec<Diagnostic>) -> Self {
        Self {
            output,
            diagnostics,
        }
    }

    /// @ai:intent Count diagnostics of a given kind
    /// @ai:effects pure
    pub fn count(&self, kind: DiagnosticKind) -> usize {
        self.diagnostics.iter().filter(|d| d.kind == kind).count()
    }

    pub fn into_parts(self) -> (T, Vec<Diagnostic>) {
        (self.output, self.diagnostics)
    }
}
