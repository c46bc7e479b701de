//! @ai:module:intent Discover and parse per-framework Lighthouse JSON reports
//! @ai:module:layer infrastructure
//! @ai:module:public_api ReportLoader, ReportLoaderTrait
//! @ai:module:stateless true

use crate::corpus::{LoadedReport, LoadedReports, RawReport};
use crate::diagnostics::{Diagnostic, Staged};
use crate::error::{Error, Result};
use regex::Regex;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// @ai:intent Trait for loading report groups
pub trait ReportLoaderTrait: Send + Sync {
    /// @ai:intent Load every framework group under the results directory
    fn load(&self, results_dir: &Path, frameworks: &[String]) -> Staged<LoadedReports>;
}

/// @ai:intent Loads `<framework>/<framework>-run-<n>.<ext>` files
/// @ai:effects pure (stateless)
pub struct ReportLoader {
    extension: String,
}

impl ReportLoader {
    /// @ai:intent Create a loader for the given report file extension
    /// @ai:effects pure
    pub fn new(extension: &str) -> Self {
        Self {
            extension: extension.trim_start_matches('.').to_string(),
        }
    }

    fn file_pattern(&self, framework: &str) -> std::result::Result<Regex, regex::Error> {
        Regex::new(&format!(
            r"^{}-run-\d+\.{}$",
            regex::escape(framework),
            regex::escape(&self.extension)
        ))
    }

    /// @ai:intent Find matching report files, sorted by file name
    /// @ai:post unreadable directory entries become discovery diagnostics; symlinks are followed
    /// @ai:effects fs:read
    fn find_report_files(
        &self,
        framework_dir: &Path,
        framework: &str,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> std::result::Result<Vec<PathBuf>, regex::Error> {
        let pattern = self.file_pattern(framework)?;
        let mut files = Vec::new();

        let entries = WalkDir::new(framework_dir)
            .follow_links(true)
            .min_depth(1)
            .max_depth(1);

        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::warn!("Failed to read entry in {}: {}", framework_dir.display(), e);
                    diagnostics.push(Diagnostic::discovery_miss(
                        framework,
                        format!("failed to read entry in {}: {}", framework_dir.display(), e),
                    ));
                    continue;
                }
            };

            let matches = entry
                .file_name()
                .to_str()
                .map(|name| pattern.is_match(name))
                .unwrap_or(false);

            if entry.file_type().is_file() && matches {
                files.push(entry.into_path());
            }
        }

        files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
        Ok(files)
    }

    /// @ai:intent Parse a single report file
    /// @ai:post Ok only for a readable file holding a JSON object
    /// @ai:effects fs:read
    fn parse_report_file(path: &Path) -> Result<RawReport> {
        let content = std::fs::read_to_string(path)?;
        let document: serde_json::Value = serde_json::from_str(&content)?;

        if !document.is_object() {
            return Err(Error::InvalidReport(
                "top-level value is not a JSON object".to_string(),
            ));
        }

        Ok(RawReport::new(document))
    }

    /// @ai:intent Load one framework group, recovering from every per-file failure
    /// @ai:effects fs:read
    fn load_framework(
        &self,
        results_dir: &Path,
        framework: &str,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Vec<LoadedReport> {
        let framework_dir = results_dir.join(framework);

        if !framework_dir.is_dir() {
            tracing::warn!("Directory {} not found", framework_dir.display());
            diagnostics.push(Diagnostic::discovery_miss(
                framework,
                format!("directory {} not found", framework_dir.display()),
            ));
            return Vec::new();
        }

        let reported_before = diagnostics.len();
        let files = match self.find_report_files(&framework_dir, framework, diagnostics) {
            Ok(files) => files,
            Err(e) => {
                tracing::warn!("Invalid report file pattern for {}: {}", framework, e);
                diagnostics.push(Diagnostic::discovery_miss(
                    framework,
                    format!("invalid report file pattern: {}", e),
                ));
                return Vec::new();
            }
        };

        if files.is_empty() {
            if diagnostics.len() > reported_before {
                return Vec::new();
            }
            tracing::warn!("No report files found for {}", framework);
            diagnostics.push(Diagnostic::discovery_miss(
                framework,
                format!(
                    "no {}-run-*.{} files in {}",
                    framework,
                    self.extension,
                    framework_dir.display()
                ),
            ));
            return Vec::new();
        }

        let mut reports = Vec::with_capacity(files.len());

        for path in files {
            match Self::parse_report_file(&path) {
                Ok(report) => reports.push(LoadedReport { path, report }),
                Err(e) => {
                    let message = format!("skipped {}: {}", path.display(), e);
                    tracing::warn!("{}", message);
                    diagnostics.push(Diagnostic::malformed_report(framework, path, message));
                }
            }
        }

        tracing::info!("{} reports loaded for {}", reports.len(), framework);
        reports
    }
}

impl Default for ReportLoader {
    fn default() -> Self {
        Self::new("json")
    }
}

impl ReportLoaderTrait for ReportLoader {
    /// @ai:intent Load all framework groups; never fails, problems become diagnostics
    /// @ai:effects fs:read
    fn load(&self, results_dir: &Path, frameworks: &[String]) -> Staged<LoadedReports> {
        tracing::info!("Loading Lighthouse reports from {}", results_dir.display());

        let mut diagnostics = Vec::new();
        let mut loaded = LoadedReports::new();

        for framework in frameworks {
            let reports = self.load_framework(results_dir, framework, &mut diagnostics);
            loaded.insert(framework, reports);
        }

        Staged::new(loaded, diagnostics)
    }
}
