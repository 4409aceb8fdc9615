//! The aligned ground-truth / tracker structure handed to metrics.

use nalgebra::DMatrix;

/// A ground-truth / tracker pair accepted by optimal assignment.
///
/// Indices refer to rows of the filtered `gt_*` arrays and columns of the
/// `tracker_*` arrays of the same frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchedPair {
    pub gt_index: usize,
    pub tracker_index: usize,
    pub similarity: f64,
}

/// Per-timestep data for both sources.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameData {
    /// Ground truth object IDs
    pub gt_ids: Vec<i64>,
    /// Tracker object IDs
    pub tracker_ids: Vec<i64>,
    /// Ground truth boxes, shape (n, 4), `x, y, width, height`
    pub gt_boxes: DMatrix<f64>,
    /// Tracker boxes, shape (m, 4), `x, y, width, height`
    pub tracker_boxes: DMatrix<f64>,
    /// Tracker confidences (1.0 when the column is absent)
    pub tracker_confidences: Vec<f64>,
    /// IoU scores, shape (n, m)
    pub similarity: DMatrix<f64>,
    /// Accepted optimal-assignment pairs
    pub matches: Vec<MatchedPair>,
}

impl FrameData {
    /// A frame with no detections on either side.
    pub fn empty() -> Self {
        Self {
            gt_ids: Vec::new(),
            tracker_ids: Vec::new(),
            gt_boxes: DMatrix::zeros(0, 4),
            tracker_boxes: DMatrix::zeros(0, 4),
            tracker_confidences: Vec::new(),
            similarity: DMatrix::zeros(0, 0),
            matches: Vec::new(),
        }
    }

    pub fn num_gt(&self) -> usize {
        self.gt_ids.len()
    }

    pub fn num_tracker(&self) -> usize {
        self.tracker_ids.len()
    }
}

/// Aligned, filtered evaluation data for one sequence.
///
/// Built once by [`crate::preprocess`] and read-only afterwards. Timestep `t`
/// corresponds to file frame `t + 1`.
#[derive(Debug, Clone, PartialEq)]
pub struct PreprocessedSequence {
    frames: Vec<FrameData>,
    num_gt_dets: usize,
    num_tracker_dets: usize,
    num_gt_ids: usize,
    num_tracker_ids: usize,
}

impl PreprocessedSequence {
    /// Build a sequence from finished frames, reducing the global counters.
    pub fn from_frames(frames: Vec<FrameData>) -> Self {
        let init = Self {
            frames: Vec::new(),
            num_gt_dets: 0,
            num_tracker_dets: 0,
            num_gt_ids: 0,
            num_tracker_ids: 0,
        };

        let counters = frames.iter().fold(init, |acc, frame| Self {
            num_gt_dets: acc.num_gt_dets + frame.num_gt(),
            num_tracker_dets: acc.num_tracker_dets + frame.num_tracker(),
            num_gt_ids: acc.num_gt_ids.max(id_count(&frame.gt_ids)),
            num_tracker_ids: acc.num_tracker_ids.max(id_count(&frame.tracker_ids)),
            ..acc
        });

        Self { frames, ..counters }
    }

    /// Number of timesteps (largest frame number in either source).
    pub fn num_timesteps(&self) -> usize {
        self.frames.len()
    }

    pub fn frames(&self) -> &[FrameData] {
        &self.frames
    }

    pub fn frame(&self, t: usize) -> Option<&FrameData> {
        self.frames.get(t)
    }

    /// # Panics
    /// Panics if `t >= num_timesteps()`.
    pub fn gt_ids(&self, t: usize) -> &[i64] {
        &self.frames[t].gt_ids
    }

    /// # Panics
    /// Panics if `t >= num_timesteps()`.
    pub fn tracker_ids(&self, t: usize) -> &[i64] {
        &self.frames[t].tracker_ids
    }

    /// # Panics
    /// Panics if `t >= num_timesteps()`.
    pub fn gt_boxes(&self, t: usize) -> &DMatrix<f64> {
        &self.frames[t].gt_boxes
    }

    /// # Panics
    /// Panics if `t >= num_timesteps()`.
    pub fn tracker_boxes(&self, t: usize) -> &DMatrix<f64> {
        &self.frames[t].tracker_boxes
    }

    /// # Panics
    /// Panics if `t >= num_timesteps()`.
    pub fn similarity(&self, t: usize) -> &DMatrix<f64> {
        &self.frames[t].similarity
    }

    /// # Panics
    /// Panics if `t >= num_timesteps()`.
    pub fn matches(&self, t: usize) -> &[MatchedPair] {
        &self.frames[t].matches
    }

    /// Ground truth detections kept after filtering.
    pub fn num_gt_dets(&self) -> usize {
        self.num_gt_dets
    }

    pub fn num_tracker_dets(&self) -> usize {
        self.num_tracker_dets
    }

    /// One plus the largest ground truth id (ids are assumed dense and zero-based).
    pub fn num_gt_ids(&self) -> usize {
        self.num_gt_ids
    }

    /// One plus the largest tracker id (ids are assumed dense and zero-based).
    pub fn num_tracker_ids(&self) -> usize {
        self.num_tracker_ids
    }
}

fn id_count(ids: &[i64]) -> usize {
    ids.iter()
        .max()
        .map_or(0, |&max_id| usize::try_from(max_id.saturating_add(1)).unwrap_or(0))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(gt_ids: Vec<i64>, tracker_ids: Vec<i64>) -> FrameData {
        let n = gt_ids.len();
        let m = tracker_ids.len();
        FrameData {
            gt_ids,
            tracker_confidences: vec![1.0; m],
            tracker_ids,
            gt_boxes: DMatrix::zeros(n, 4),
            tracker_boxes: DMatrix::zeros(m, 4),
            similarity: DMatrix::zeros(n, m),
            matches: Vec::new(),
        }
    }

    #[test]
    fn test_empty_sequence() {
        let seq = PreprocessedSequence::from_frames(Vec::new());
        assert_eq!(seq.num_timesteps(), 0);
        assert_eq!(seq.num_gt_dets(), 0);
        assert_eq!(seq.num_tracker_dets(), 0);
        assert_eq!(seq.num_gt_ids(), 0);
        assert_eq!(seq.num_tracker_ids(), 0);
    }

    #[test]
    fn test_counters_reduce_over_frames() {
        let seq = PreprocessedSequence::from_frames(vec![
            frame(vec![0, 3], vec![10]),
            FrameData::empty(),
            frame(vec![1], vec![2, 4]),
        ]);

        assert_eq!(seq.num_timesteps(), 3);
        assert_eq!(seq.num_gt_dets(), 3);
        assert_eq!(seq.num_tracker_dets(), 3);
        assert_eq!(seq.num_gt_ids(), 4);
        assert_eq!(seq.num_tracker_ids(), 11);
        assert!(seq.gt_ids(1).is_empty());
        assert_eq!(seq.similarity(2).shape(), (1, 2));
    }

    #[test]
    fn test_negative_ids_do_not_count() {
        let seq = PreprocessedSequence::from_frames(vec![frame(vec![-5], vec![-1])]);
        assert_eq!(seq.num_gt_ids(), 0);
        assert_eq!(seq.num_tracker_ids(), 0);
        assert_eq!(seq.num_gt_dets(), 1);
    }
}
