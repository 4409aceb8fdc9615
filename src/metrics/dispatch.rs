//! Enum-based metric dispatch.
//!
//! Metric names coming from user input are resolved once, at the boundary,
//! into `MetricKind`; everything past that point is statically dispatched.

use super::count::{Count, CountResult};
use super::traits::Metric;
use crate::{Error, PreprocessedSequence, Result};
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

/// All supported metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub enum MetricKind {
    Count,
}

impl MetricKind {
    /// Every supported metric, in canonical order.
    pub const ALL: [MetricKind; 1] = [MetricKind::Count];
}

impl FromStr for MetricKind {
    type Err = Error;

    /// Resolve a metric name, ignoring ASCII case.
    fn from_str(name: &str) -> Result<Self> {
        match name.to_ascii_lowercase().as_str() {
            "count" => Ok(MetricKind::Count),
            _ => Err(Error::UnknownMetric(name.to_string())),
        }
    }
}

impl TryFrom<String> for MetricKind {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Metric for MetricKind {
    #[inline]
    fn name(&self) -> &'static str {
        match self {
            MetricKind::Count => Count.name(),
        }
    }

    #[inline]
    fn eval_sequence(&self, data: &PreprocessedSequence) -> MetricResult {
        match self {
            MetricKind::Count => Count.eval_sequence(data),
        }
    }
}

/// Output of any supported metric.
#[derive(Debug, Clone, PartialEq)]
pub enum MetricResult {
    Count(CountResult),
}

impl MetricResult {
    /// Summary values as `(field, value)` pairs for an external printer.
    pub fn summary(&self) -> Vec<(&'static str, f64)> {
        match self {
            MetricResult::Count(result) => result.fields(),
        }
    }
}
