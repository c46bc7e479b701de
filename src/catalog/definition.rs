//! @ai:module:intent Metric definitions and the lookup paths that extract them
//! @ai:module:layer domain
//! @ai:module:public_api MetricDefinition, ExtractionRule, LookupPath, PathSegment
//! @ai:module:stateless true

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// @ai:intent One step into a JSON document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

impl std::fmt::Display for PathSegment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathSegment::Key(key) => write!(f, "{}", key),
            PathSegment::Index(index) => write!(f, "[{}]", index),
        }
    }
}

/// @ai:intent Ordered sequence of segments ending at a numeric value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupPath(Vec<PathSegment>);

impl LookupPath {
    pub fn new(segments: Vec<PathSegment>) -> Self {
        Self(segments)
    }

    /// @ai:intent Standard flat audit path: audits.<audit>.numericValue
    /// @ai:effects pure
    pub fn audit(audit: &str) -> Self {
        Self(vec![
            PathSegment::Key("audits".to_string()),
            PathSegment::Key(audit.to_string()),
            PathSegment::Key("numericValue".to_string()),
        ])
    }

    /// Appends a key segment.
    pub fn key(mut self, key: &str) -> Self {
        self.0.push(PathSegment::Key(key.to_string()));
        self
    }

    /// Appends an array index segment.
    pub fn index(mut self, index: usize) -> Self {
        self.0.push(PathSegment::Index(index));
        self
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.0
    }

    /// @ai:intent Walk the path and return the final value when it is a JSON number
    /// @ai:pre none, any document shape is accepted
    /// @ai:post Some only if every segment exists and the leaf is numeric
    /// @ai:effects pure
    pub fn resolve(&self, document: &Value) -> Option<f64> {
        let leaf = self.0.iter().try_fold(document, |node, segment| match segment {
            PathSegment::Key(key) => node.as_object()?.get(key),
            PathSegment::Index(index) => node.as_array()?.get(*index),
        })?;

        leaf.as_f64().filter(|v| v.is_finite())
    }
}

impl std::fmt::Display for LookupPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, segment) in self.0.iter().enumerate() {
            match segment {
                PathSegment::Index(_) => write!(f, "{}", segment)?,
                PathSegment::Key(_) if i == 0 => write!(f, "{}", segment)?,
                PathSegment::Key(_) => write!(f, ".{}", segment)?,
            }
        }
        Ok(())
    }
}

/// @ai:intent Primary path plus an optional fallback for values nested elsewhere
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionRule {
    pub primary: LookupPath,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback: Option<LookupPath>,
}

impl ExtractionRule {
    pub fn audit(audit: &str) -> Self {
        Self {
            primary: LookupPath::audit(audit),
            fallback: None,
        }
    }

    pub fn with_fallback(mut self, fallback: LookupPath) -> Self {
        self.fallback = Some(fallback);
        self
    }
}

/// @ai:intent Immutable description of one named performance metric
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricDefinition {
    pub key: String,
    pub display_name: String,
    pub unit: String,
    pub extract: ExtractionRule,
}

impl MetricDefinition {
    /// @ai:intent Define a metric read from a flat audit entry of the same name
    /// @ai:effects pure
    pub fn audit(key: &str, display_name: &str, unit: &str) -> Self {
        Self {
            key: key.to_string(),
            display_name: display_name.to_string(),
            unit: unit.to_string(),
            extract: ExtractionRule::audit(key),
        }
    }

    pub fn with_fallback(mut self, fallback: LookupPath) -> Self {
        self.extract = self.extract.with_fallback(fallback);
        self
    }

    /// File-name friendly form of the key, e.g. `speed_index`.
    pub fn file_stem(&self) -> String {
        self.key.replace('-', "_")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_resolve_flat_audit() {
        let doc = json!({"audits": {"speed-index": {"numericValue": 812.5}}});
        assert_eq!(LookupPath::audit("speed-index").resolve(&doc), Some(812.5));
    }

    #[test]
    fn test_resolve_through_array_index() {
        let doc = json!({
            "audits": {"metrics": {"details": {"items": [{"observedDomContentLoaded": 240}]}}}
        });
        let path = LookupPath::new(vec![])
            .key("audits")
            .key("metrics")
            .key("details")
            .key("items")
            .index(0)
            .key("observedDomContentLoaded");
        assert_eq!(path.resolve(&doc), Some(240.0));
    }

    #[test]
    fn test_resolve_rejects_non_numeric_leaf() {
        let doc = json!({"audits": {"interactive": {"numericValue": "fast"}}});
        assert_eq!(LookupPath::audit("interactive").resolve(&doc), None);

        let doc = json!({"audits": {"interactive": {"numericValue": null}}});
        assert_eq!(LookupPath::audit("interactive").resolve(&doc), None);
    }

    #[test]
    fn test_resolve_wrong_container_shape() {
        let doc = json!({"audits": ["not", "a", "map"]});
        assert_eq!(LookupPath::audit("interactive").resolve(&doc), None);

        let doc = json!({"items": {"0": 5}});
        let path = LookupPath::new(vec![]).key("items").index(0);
        assert_eq!(path.resolve(&doc), None);
    }

    #[test]
    fn test_display_path() {
        let path = LookupPath::new(vec![]).key("audits").key("items").index(0).key("x");
        assert_eq!(path.to_string(), "audits.items[0].x");
    }
}
