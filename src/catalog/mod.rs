//! @ai:module:intent Static registry of the metrics extracted from every report
//! @ai:module:layer domain
//! @ai:module:public_api MetricCatalog, MetricDefinition, ExtractionRule, LookupPath, PathSegment
//! @ai:module:stateless true

pub mod definition;

pub use definition::{ExtractionRule, LookupPath, MetricDefinition, PathSegment};

use crate::error::{Error, Result};
use std::collections::HashSet;

/// @ai:intent Ordered, read-only collection of metric definitions
#[derive(Debug, Clone)]
pub struct MetricCatalog {
    metrics: Vec<MetricDefinition>,
}

impl MetricCatalog {
    /// @ai:intent Build a catalog, rejecting duplicate keys
    /// @ai:effects pure
    pub fn new(metrics: Vec<MetricDefinition>) -> Result<Self> {
        let mut seen = HashSet::new();

        for metric in &metrics {
            if !seen.insert(metric.key.as_str()) {
                return Err(Error::Config(format!(
                    "duplicate metric key in catalog: {}",
                    metric.key
                )));
            }
        }

        Ok(Self { metrics })
    }

    /// @ai:intent Default catalog of Lighthouse performance audits
    /// @ai:effects pure
    pub fn lighthouse() -> Self {
        // DOM content loaded has no audit of its own; it lives in the metrics timeline.
        let dom_content_loaded = LookupPath::new(vec![])
            .key("audits")
            .key("metrics")
            .key("details")
            .key("items")
            .index(0)
            .key("observedDomContentLoaded");

        Self {
            metrics: vec![
                MetricDefinition::audit("first-contentful-paint", "First Contentful Paint (FCP)", "ms"),
                MetricDefinition::audit("largest-contentful-paint", "Largest Contentful Paint (LCP)", "ms"),
                MetricDefinition::audit("total-blocking-time", "Total Blocking Time (TBT)", "ms"),
                MetricDefinition::audit("server-response-time", "Time to First Byte (TTFB)", "ms"),
                MetricDefinition::audit("speed-index", "Speed Index (SI)", "ms"),
                MetricDefinition::audit("first-meaningful-paint", "First Meaningful Paint (FMP)", "ms"),
                MetricDefinition::audit("dom-content-loaded", "DOM Content Loaded (DCL)", "ms")
                    .with_fallback(dom_content_loaded),
                MetricDefinition::audit("interactive", "Time to Interactive (TTI)", "ms"),
                MetricDefinition::audit("max-potential-fid", "Max Potential FID", "ms"),
                MetricDefinition::audit("bootup-time", "JS Boot-up Time", "ms"),
            ],
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &MetricDefinition> {
        self.metrics.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.metrics.iter().map(|m| m.key.as_str())
    }

    pub fn get(&self, key: &str) -> Option<&MetricDefinition> {
        self.metrics.iter().find(|m| m.key == key)
    }

    pub fn len(&self) -> usize {
        self.metrics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.metrics.is_empty()
    }
}

impl Default for MetricCatalog {
    fn default() -> Self {
        Self::lighthouse()
    }
}
