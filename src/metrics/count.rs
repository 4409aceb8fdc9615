//! Count metric: sizes of the aligned sequence.

use super::{Metric, MetricResult};
use crate::PreprocessedSequence;

/// Counts tracker and ground truth detections, ids and frames.
#[derive(Debug, Clone, Copy, Default)]
pub struct Count;

/// Output of the [`Count`] metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CountResult {
    /// Tracker detections
    pub dets: usize,
    /// Ground truth detections kept after filtering
    pub gt_dets: usize,
    /// Tracker ids (one plus the largest id)
    pub ids: usize,
    /// Ground truth ids (one plus the largest id)
    pub gt_ids: usize,
    /// Number of timesteps
    pub frames: usize,
}

impl CountResult {
    /// Named values in display order.
    pub fn fields(&self) -> Vec<(&'static str, f64)> {
        vec![
            ("Dets", self.dets as f64),
            ("GT_Dets", self.gt_dets as f64),
            ("IDs", self.ids as f64),
            ("GT_IDs", self.gt_ids as f64),
            ("Frames", self.frames as f64),
        ]
    }
}

impl Metric for Count {
    fn name(&self) -> &'static str {
        "Count"
    }

    fn eval_sequence(&self, data: &PreprocessedSequence) -> MetricResult {
        MetricResult::Count(CountResult {
            dets: data.num_tracker_dets(),
            gt_dets: data.num_gt_dets(),
            ids: data.num_tracker_ids(),
            gt_ids: data.num_gt_ids(),
            frames: data.num_timesteps(),
        })
    }
}
