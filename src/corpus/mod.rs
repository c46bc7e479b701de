//! @ai:module:intent Raw Lighthouse report documents and their discovery on disk
//! @ai:module:layer infrastructure
//! @ai:module:public_api RawReport, LoadedReport, LoadedReports, ReportLoader, ReportLoaderTrait

pub mod loader;

pub use loader::{ReportLoader, ReportLoaderTrait};

use serde_json::Value;
use std::path::PathBuf;

/// @ai:intent Loosely structured report as produced upstream, never schema-checked
#[derive(Debug, Clone, PartialEq)]
pub struct RawReport(Value);

impl RawReport {
    pub fn new(document: Value) -> Self {
        Self(document)
    }

    pub fn document(&self) -> &Value {
        &self.0
    }
}

impl From<Value> for RawReport {
    fn from(document: Value) -> Self {
        Self(document)
    }
}

/// @ai:intent A parsed report and the file it came from
#[derive(Debug, Clone)]
pub struct LoadedReport {
    pub path: PathBuf,
    pub report: RawReport,
}

/// @ai:intent Reports per framework, in requested framework order and sorted file order
#[derive(Debug, Clone, Default)]
pub struct LoadedReports {
    groups: Vec<(String, Vec<LoadedReport>)>,
}

impl LoadedReports {
    pub fn new() -> Self {
        Self::default()
    }

    /// @ai:intent Append a framework group; an existing group of the same name is replaced
    /// @ai:effects state:write
    pub fn insert(&mut self, framework: &str, reports: Vec<LoadedReport>) {
        match self.groups.iter_mut().find(|(name, _)| name == framework) {
            Some((_, existing)) => *existing = reports,
            None => self.groups.push((framework.to_string(), reports)),
        }
    }

    pub fn get(&self, framework: &str) -> Option<&[LoadedReport]> {
        self.groups
            .iter()
            .find(|(name, _)| name == framework)
            .map(|(_, reports)| reports.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[LoadedReport])> {
        self.groups
            .iter()
            .map(|(name, reports)| (name.as_str(), reports.as_slice()))
    }

    pub fn frameworks(&self) -> Vec<String> {
        self.groups.iter().map(|(name, _)| name.clone()).collect()
    }

    /// Total number of reports across all frameworks.
    pub fn total(&self) -> usize {
        self.groups.iter().map(|(_, reports)| reports.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::path::PathBuf;

    fn report(name: &str) -> LoadedReport {
        LoadedReport {
            path: PathBuf::from(name),
            report: RawReport::new(json!({})),
        }
    }

    #[test]
    fn test_insert_replaces_existing_group_in_place() {
        let mut loaded = LoadedReports::new();
        loaded.insert("react", vec![report("a.json"), report("b.json")]);
        loaded.insert("vue", vec![report("c.json")]);
        loaded.insert("react", vec![report("d.json")]);

        assert_eq!(loaded.frameworks(), vec!["react", "vue"]);
        assert_eq!(loaded.get("react").unwrap().len(), 1);
        assert_eq!(loaded.get("react").unwrap()[0].path, PathBuf::from("d.json"));
        assert_eq!(loaded.total(), 2);
    }
}
