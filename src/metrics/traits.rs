//! Metric trait definition.

use super::MetricResult;
use crate::PreprocessedSequence;

/// Trait for scoring algorithms that consume an aligned sequence.
///
/// Metrics only read the sequence; it is shared between all metrics of a run.
pub trait Metric: Send + Sync {
    /// Display name, e.g. `"Count"`.
    fn name(&self) -> &'static str;

    /// Score one preprocessed sequence.
    fn eval_sequence(&self, data: &PreprocessedSequence) -> MetricResult;
}
