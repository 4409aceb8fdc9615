//! Alignment of ground truth and tracker output into a `PreprocessedSequence`.
//!
//! For every frame `1..=num_timesteps` the rows of both sources are turned
//! into id vectors and box matrices, scored with IoU, matched with optimal
//! assignment and then stripped of ground truth rows whose validity flag is 0.
//! Frames are processed independently; global counters are reduced afterwards.

use nalgebra::DMatrix;

use crate::config::EvalConfig;
use crate::data::{FrameIndex, Record};
use crate::internal::scipy::linear_sum_assignment;
use crate::overlap::iou_matrix;
use crate::sequence::{FrameData, MatchedPair, PreprocessedSequence};
use crate::Result;

/// Column holding the object id.
const ID_COLUMN: usize = 1;
/// First of the four box columns.
const BOX_COLUMN: usize = 2;
/// Validity flag for ground truth, confidence for tracker output.
const EXTRA_COLUMN: usize = 6;

/// Align two frame-indexed sources into a single sequence.
///
/// `num_timesteps` is the largest frame number seen in either source; frames
/// absent from a source produce empty arrays for that side.
pub fn preprocess(
    gt: &FrameIndex,
    tracker: &FrameIndex,
    config: &EvalConfig,
) -> Result<PreprocessedSequence> {
    let num_timesteps = gt.max_frame().max(tracker.max_frame());

    let ignored = gt.num_unaligned_records() + tracker.num_unaligned_records();
    if ignored > 0 {
        log::warn!("ignoring {} rows with frame number < 1", ignored);
    }

    let frames = (1..=num_timesteps)
        .map(|frame| {
            let gt_rows = gt.get(frame).unwrap_or(&[]);
            let tracker_rows = tracker.get(frame).unwrap_or(&[]);
            log::trace!(
                "frame {}: {} gt rows, {} tracker rows",
                frame,
                gt_rows.len(),
                tracker_rows.len()
            );
            align_frame(gt_rows, tracker_rows, config)
        })
        .collect::<Result<Vec<FrameData>>>()?;

    let sequence = PreprocessedSequence::from_frames(frames);
    log::debug!(
        "preprocessed {} timesteps: {} gt dets ({} ids), {} tracker dets ({} ids)",
        sequence.num_timesteps(),
        sequence.num_gt_dets(),
        sequence.num_gt_ids(),
        sequence.num_tracker_dets(),
        sequence.num_tracker_ids()
    );
    Ok(sequence)
}

/// Build the aligned data of a single frame.
///
/// Depends only on the rows passed in, so frames can be processed in any
/// order (or in parallel) before being handed to
/// [`PreprocessedSequence::from_frames`].
pub fn align_frame(
    gt_rows: &[Record],
    tracker_rows: &[Record],
    config: &EvalConfig,
) -> Result<FrameData> {
    let gt_ids = extract_ids(gt_rows)?;
    let gt_boxes = extract_boxes(gt_rows)?;
    let gt_valid = gt_rows
        .iter()
        .map(|row| -> Result<bool> {
            match row.get(EXTRA_COLUMN) {
                Some(_) => Ok(row.integer(EXTRA_COLUMN)? != 0),
                None => Ok(true),
            }
        })
        .collect::<Result<Vec<bool>>>()?;

    let tracker_ids = extract_ids(tracker_rows)?;
    let tracker_boxes = extract_boxes(tracker_rows)?;
    let tracker_confidences = tracker_rows
        .iter()
        .map(|row| -> Result<f64> {
            match row.get(EXTRA_COLUMN) {
                Some(_) => row.number(EXTRA_COLUMN),
                None => Ok(1.0),
            }
        })
        .collect::<Result<Vec<f64>>>()?;

    let (similarity, matches) = if !gt_ids.is_empty() && !tracker_ids.is_empty() {
        let similarity = iou_matrix(&gt_boxes, &tracker_boxes, config.box_format)?;
        let matches = accepted_matches(&similarity, config.match_threshold);
        (similarity, matches)
    } else {
        (DMatrix::zeros(gt_ids.len(), tracker_ids.len()), Vec::new())
    };

    let frame = FrameData {
        gt_ids,
        tracker_ids,
        gt_boxes,
        tracker_boxes,
        tracker_confidences,
        similarity,
        matches,
    };
    Ok(remove_invalid_gt(frame, &gt_valid))
}

fn extract_ids(rows: &[Record]) -> Result<Vec<i64>> {
    rows.iter().map(|row| row.integer(ID_COLUMN)).collect()
}

fn extract_boxes(rows: &[Record]) -> Result<DMatrix<f64>> {
    let mut flat = Vec::with_capacity(rows.len() * 4);
    for row in rows {
        for column in BOX_COLUMN..BOX_COLUMN + 4 {
            flat.push(row.number(column)?);
        }
    }
    Ok(DMatrix::from_row_slice(rows.len(), 4, &flat))
}

/// Optimal one-to-one assignment maximizing total IoU, keeping pairs whose
/// IoU exceeds `threshold` (pairs numerically equal to it are kept).
pub fn accepted_matches(similarity: &DMatrix<f64>, threshold: f64) -> Vec<MatchedPair> {
    let cost: Vec<Vec<f64>> = similarity
        .row_iter()
        .map(|row| row.iter().map(|v| -v).collect())
        .collect();

    linear_sum_assignment(&cost, f64::INFINITY)
        .assignments
        .into_iter()
        .map(|a| MatchedPair {
            gt_index: a.row_idx,
            tracker_index: a.col_idx,
            similarity: similarity[(a.row_idx, a.col_idx)],
        })
        .filter(|pair| pair.similarity > threshold - f64::EPSILON)
        .collect()
}

/// Drop ground truth rows flagged invalid from ids, boxes, similarity rows
/// and matches. Tracker columns are never touched.
fn remove_invalid_gt(mut frame: FrameData, valid: &[bool]) -> FrameData {
    if valid.iter().all(|&v| v) {
        return frame;
    }

    let keep: Vec<usize> = (0..valid.len()).filter(|&i| valid[i]).collect();

    frame.gt_ids = keep.iter().map(|&i| frame.gt_ids[i]).collect();
    frame.gt_boxes = frame.gt_boxes.select_rows(keep.iter());
    if frame.similarity.nrows() > 0 {
        frame.similarity = frame.similarity.select_rows(keep.iter());
    }
    frame.matches = frame
        .matches
        .iter()
        .filter_map(|pair| {
            keep.iter()
                .position(|&i| i == pair.gt_index)
                .map(|gt_index| MatchedPair { gt_index, ..*pair })
        })
        .collect();

    frame
}
