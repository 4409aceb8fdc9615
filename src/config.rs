//! Evaluation configuration.

use crate::metrics::MetricKind;
use crate::overlap::BoxFormat;
use crate::{Error, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Default IoU a ground truth / tracker pair must exceed to be accepted as a match.
pub const DEFAULT_MATCH_THRESHOLD: f64 = 0.5;

/// Configuration for preprocessing and metric evaluation.
///
/// Can be read from JSON; missing keys take their default values:
///
/// ```json
/// { "box_format": "xywh", "match_threshold": 0.5, "metrics": ["count"] }
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct EvalConfig {
    /// Layout of the four box columns in both input files.
    pub box_format: BoxFormat,

    /// Minimum IoU for an assigned pair to be kept in `FrameData::matches`.
    pub match_threshold: f64,

    /// Metrics to run, in order.
    pub metrics: Vec<MetricKind>,

    /// Name reported in results; defaults to the tracker file stem.
    pub tracker_name: Option<String>,
}

impl Default for EvalConfig {
    fn default() -> Self {
        Self {
            box_format: BoxFormat::Xywh,
            match_threshold: DEFAULT_MATCH_THRESHOLD,
            metrics: vec![MetricKind::Count],
            tracker_name: None,
        }
    }
}

impl EvalConfig {
    /// Create a configuration running the given metrics.
    pub fn new(metrics: Vec<MetricKind>) -> Self {
        Self {
            metrics,
            ..Self::default()
        }
    }

    /// Create configuration from metric names (case-insensitive).
    pub fn from_metric_names(names: &[&str]) -> Result<Self> {
        let metrics = names
            .iter()
            .map(|name| name.parse())
            .collect::<Result<Vec<MetricKind>>>()?;
        Ok(Self::new(metrics))
    }

    /// Parse and validate a JSON configuration.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| Error::InvalidConfig(format!("invalid config JSON: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON configuration file.
    pub fn from_json_file<P: AsRef<Path>>(file_path: P) -> Result<Self> {
        let path = file_path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            Error::IoError(std::io::Error::new(
                e.kind(),
                format!("failed to read config '{}': {}", path.display(), e),
            ))
        })?;
        Self::from_json_str(&content)
    }

    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.match_threshold) {
            return Err(Error::InvalidConfig(format!(
                "match_threshold must be in [0, 1], got {}",
                self.match_threshold
            )));
        }
        if self.metrics.is_empty() {
            return Err(Error::InvalidConfig(
                "at least one metric is required".to_string(),
            ));
        }
        Ok(())
    }
}
