//! @ai:module:intent Rule-driven extraction of catalog metrics from a raw report
//! @ai:module:layer domain
//! @ai:module:public_api MetricExtractor, ExtractionSource
//! @ai:module:stateless true

use crate::catalog::{MetricCatalog, MetricDefinition};
use crate::corpus::RawReport;
use crate::metrics::types::MetricValues;

/// @ai:intent Which path of an extraction rule produced a value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionSource {
    Primary,
    Fallback,
}

/// @ai:intent Extracts one value-or-absent per catalog metric
/// @ai:effects pure
pub struct MetricExtractor;

impl MetricExtractor {
    pub fn new() -> Self {
        Self
    }

    /// @ai:intent Resolve one metric: primary path first, fallback only if primary yields no number
    /// @ai:post never panics on missing or oddly shaped fields
    /// @ai:effects pure
    pub fn resolve(
        &self,
        definition: &MetricDefinition,
        report: &RawReport,
    ) -> Option<(f64, ExtractionSource)> {
        let document = report.document();
        let rule = &definition.extract;

        if let Some(value) = rule.primary.resolve(document) {
            return Some((value, ExtractionSource::Primary));
        }

        rule.fallback
            .as_ref()
            .and_then(|path| path.resolve(document))
            .map(|value| (value, ExtractionSource::Fallback))
    }

    /// @ai:intent Extract every catalog metric from a report
    /// @ai:effects pure
    pub fn extract(&self, report: &RawReport, catalog: &MetricCatalog) -> MetricValues {
        catalog
            .iter()
            .map(|definition| {
                let value = self.resolve(definition, report).map(|(v, _)| v);
                (definition.key.clone(), value)
            })
            .collect()
    }
}

impl Default for MetricExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::LookupPath;
    use serde_json::json;

    fn report(value: serde_json::Value) -> RawReport {
        RawReport::new(value)
    }

    fn dcl_fallback() -> LookupPath {
        LookupPath::new(vec![])
            .key("audits")
            .key("metrics")
            .key("details")
            .key("items")
            .index(0)
            .key("observedDomContentLoaded")
    }

    #[test]
    fn test_primary_wins_over_fallback() {
        let definition = MetricDefinition::audit("dom-content-loaded", "DCL", "ms")
            .with_fallback(dcl_fallback());
        let doc = report(json!({
            "audits": {
                "dom-content-loaded": {"numericValue": 150.0},
                "metrics": {"details": {"items": [{"observedDomContentLoaded": 999.0}]}}
            }
        }));

        let resolved = MetricExtractor::new().resolve(&definition, &doc);
        assert_eq!(resolved, Some((150.0, ExtractionSource::Primary)));
    }

    #[test]
    fn test_fallback_used_when_primary_missing() {
        let definition = MetricDefinition::audit("dom-content-loaded", "DCL", "ms")
            .with_fallback(dcl_fallback());
        let doc = report(json!({
            "audits": {"metrics": {"details": {"items": [{"observedDomContentLoaded": 321}]}}}
        }));

        let resolved = MetricExtractor::new().resolve(&definition, &doc);
        assert_eq!(resolved, Some((321.0, ExtractionSource::Fallback)));
    }

    #[test]
    fn test_fallback_used_when_primary_not_numeric() {
        let definition = MetricDefinition::audit("dom-content-loaded", "DCL", "ms")
            .with_fallback(dcl_fallback());
        let doc = report(json!({
            "audits": {
                "dom-content-loaded": {"numericValue": "n/a"},
                "metrics": {"details": {"items": [{"observedDomContentLoaded": 42}]}}
            }
        }));

        let resolved = MetricExtractor::new().resolve(&definition, &doc);
        assert_eq!(resolved, Some((42.0, ExtractionSource::Fallback)));
    }

    #[test]
    fn test_absent_when_both_paths_missing() {
        let catalog = MetricCatalog::lighthouse();
        let doc = report(json!({"audits": {"metrics": {"details": {"items": []}}}}));

        let values = MetricExtractor::new().extract(&doc, &catalog);

        assert_eq!(values.len(), catalog.len());
        assert!(values.values().all(|v| v.is_none()));
    }

    #[test]
    fn test_extract_full_lighthouse_report() {
        let catalog = MetricCatalog::lighthouse();
        let doc = report(json!({
            "audits": {
                "first-contentful-paint": {"numericValue": 812.3, "score": 0.98},
                "speed-index": {"numericValue": 900},
                "bootup-time": {"score": 1},
                "metrics": {"details": {"items": [{"observedDomContentLoaded": 610}]}}
            }
        }));

        let values = MetricExtractor::new().extract(&doc, &catalog);

        assert_eq!(values["first-contentful-paint"], Some(812.3));
        assert_eq!(values["speed-index"], Some(900.0));
        assert_eq!(values["dom-content-loaded"], Some(610.0));
        assert_eq!(values["bootup-time"], None);
        assert_eq!(values["interactive"], None);
    }

    #[test]
    fn test_zero_is_a_value_not_absence() {
        let catalog = MetricCatalog::lighthouse();
        let doc = report(json!({"audits": {"total-blocking-time": {"numericValue": 0}}}));

        let values = MetricExtractor::new().extract(&doc, &catalog);
        assert_eq!(values["total-blocking-time"], Some(0.0));
    }

    #[test]
    fn test_extraction_is_deterministic() {
        let catalog = MetricCatalog::lighthouse();
        let doc = report(json!({"audits": {"interactive": {"numericValue": 1234.5}}}));
        let extractor = MetricExtractor::new();

        assert_eq!(extractor.extract(&doc, &catalog), extractor.extract(&doc, &catalog));
    }
}
