//! benchie core: turn free-text benchmark logs into per-kernel-version datasets.
//!
//! ## Flow
//!
//! - **Schema**: static per-mode metric vocabularies ([`SchemaRegistry`])
//! - **Extract**: one log text to one [`LogRecord`] or an [`ExtractionFailure`]
//! - **Aggregate**: samples keyed by (kernel version, metric), reduced to means
//! - **Dataset**: ordered, immutable [`ReportDataset`] per mode for renderers
//!
//! [`Pipeline`] drives the whole batch and never touches the file system.

pub mod aggregate;
pub mod config;
pub mod dataset;
pub mod extract;
pub mod pipeline;
pub mod schema;

#[cfg(test)]
pub(crate) mod test_support;

pub use aggregate::{AggregationKey, Aggregator, MetricMean, PerVersionMeans};
pub use config::{Config, ConfigError, IgnoredConfig, ReportFormat};
pub use dataset::ReportDataset;
pub use extract::{ExtractionFailure, LogRecord, Sample, extract};
pub use pipeline::{LogInput, Pipeline, PipelineError, PipelineOutcome, SkippedLog};
pub use schema::{Mode, ModeSchema, SchemaRegistry, UnknownModeError};
