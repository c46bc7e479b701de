//! @ai:module:intent Metric extraction, dataset assembly, aggregation and normalization
//! @ai:module:layer application
//! @ai:module:public_api MetricExtractor, DatasetBuilder, MetricsAggregator, ChartNormalizer, Dataset, RunRecord, AggregateRecord, NormalizedTable

pub mod aggregator;
pub mod dataset;
pub mod extractor;
pub mod normalizer;
pub mod types;

pub use aggregator::{MetricsAggregator, MetricsAggregatorTrait};
pub use dataset::DatasetBuilder;
pub use extractor::{ExtractionSource, MetricExtractor};
pub use normalizer::ChartNormalizer;
pub use types::{
    AggregateRecord, AnalysisResults, Dataset, MetricStats, MetricValues, NormalizedTable, RunRecord,
};
