//! End-to-end evaluation of a tracker file against a ground truth file.

use crate::config::EvalConfig;
use crate::data::FrameIndex;
use crate::metrics::{Metric, MetricKind, MetricResult};
use crate::preprocess::preprocess;
use crate::sequence::PreprocessedSequence;
use crate::Result;
use std::path::Path;

/// Results of one evaluation run.
#[derive(Debug, Clone)]
pub struct EvaluationResults {
    tracker_name: String,
    sequence: PreprocessedSequence,
    metrics: Vec<(MetricKind, MetricResult)>,
}

impl EvaluationResults {
    pub fn tracker_name(&self) -> &str {
        &self.tracker_name
    }

    /// The aligned data every metric was computed from.
    pub fn sequence(&self) -> &PreprocessedSequence {
        &self.sequence
    }

    /// Metric results in the configured order.
    pub fn metrics(&self) -> &[(MetricKind, MetricResult)] {
        &self.metrics
    }

    pub fn get(&self, kind: MetricKind) -> Option<&MetricResult> {
        self.metrics
            .iter()
            .find(|(k, _)| *k == kind)
            .map(|(_, result)| result)
    }
}

/// Run metrics on an already preprocessed sequence.
pub fn evaluate_sequence(
    sequence: &PreprocessedSequence,
    metrics: &[MetricKind],
) -> Vec<(MetricKind, MetricResult)> {
    metrics
        .iter()
        .map(|kind| {
            log::debug!("evaluating {}", kind);
            (*kind, kind.eval_sequence(sequence))
        })
        .collect()
}

/// Evaluate a tracker output file against a ground truth file.
///
/// # Arguments
/// * `gt_path` - Ground truth file (MOTChallenge format)
/// * `tracker_path` - Tracker output file (MOTChallenge format)
/// * `config` - Box format, match threshold, metrics and tracker name
pub fn evaluate_files<P1: AsRef<Path>, P2: AsRef<Path>>(
    gt_path: P1,
    tracker_path: P2,
    config: &EvalConfig,
) -> Result<EvaluationResults> {
    config.validate()?;
    let tracker_path = tracker_path.as_ref();

    let tracker_name = config.tracker_name.clone().unwrap_or_else(|| {
        tracker_path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "tracker".to_string())
    });

    let gt = FrameIndex::load(gt_path)?;
    let tracker = FrameIndex::load(tracker_path)?;
    let sequence = preprocess(&gt, &tracker, config)?;
    let metrics = evaluate_sequence(&sequence, &config.metrics);
    log::info!(
        "evaluated '{}' over {} timesteps",
        tracker_name,
        sequence.num_timesteps()
    );

    Ok(EvaluationResults {
        tracker_name,
        sequence,
        metrics,
    })
}
