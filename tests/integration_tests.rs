//! Integration tests for trackeval-rs.
//!
//! These tests exercise the full load → align → match → filter → metric flow
//! through the public API.

use std::io::{Cursor, Write};

use nalgebra::DMatrix;
use tempfile::NamedTempFile;
use trackeval_rs::data::load_records;
use trackeval_rs::{
    evaluate_files, evaluate_sequence, iou_matrix, preprocess, BoxFormat, Error, EvalConfig,
    FrameIndex, MetricKind, MetricResult, PreprocessedSequence,
};

fn index(input: &str) -> FrameIndex {
    FrameIndex::from_records(load_records(Cursor::new(input)).unwrap()).unwrap()
}

fn align(gt: &str, tracker: &str) -> PreprocessedSequence {
    preprocess(&index(gt), &index(tracker), &EvalConfig::default()).expect("valid input")
}

fn write_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{}", contents).unwrap();
    file
}

// =============================================================================
// Alignment invariants
// =============================================================================

#[test]
fn test_integration_shapes_are_consistent() {
    let gt = "1,0,0,0,10,10,1\n1,1,30,30,10,10,0\n3,1,5,5,10,10,1\n5,2,0,0,4,4,1\n";
    let tracker = "2,0,0,0,10,10,0.5\n3,0,5,5,10,10,0.5\n3,1,6,6,10,10,0.5\n";
    let seq = align(gt, tracker);

    assert_eq!(seq.num_timesteps(), 5);
    for t in 0..seq.num_timesteps() {
        let frame = seq.frame(t).unwrap();
        assert_eq!(frame.gt_ids.len(), frame.gt_boxes.nrows(), "t={}", t);
        assert_eq!(frame.gt_ids.len(), frame.similarity.nrows(), "t={}", t);
        assert_eq!(frame.tracker_ids.len(), frame.tracker_boxes.nrows(), "t={}", t);
        assert_eq!(frame.tracker_ids.len(), frame.similarity.ncols(), "t={}", t);
        assert_eq!(frame.tracker_ids.len(), frame.tracker_confidences.len(), "t={}", t);
        assert!(frame.similarity.iter().all(|v| (0.0..=1.0).contains(v)));
        for pair in &frame.matches {
            assert!(pair.gt_index < frame.gt_ids.len());
            assert!(pair.tracker_index < frame.tracker_ids.len());
        }
    }
}

#[test]
fn test_integration_invalid_gt_never_survives() {
    // Invalid gt rows overlap tracker boxes perfectly
    let gt = "1,4,0,0,10,10,0\n1,0,50,50,10,10,1\n2,4,0,0,10,10,0\n";
    let tracker = "1,0,0,0,10,10,1\n2,0,0,0,10,10,1\n";
    let seq = align(gt, tracker);

    for t in 0..seq.num_timesteps() {
        assert!(!seq.gt_ids(t).contains(&4), "t={}", t);
    }
    assert_eq!(seq.gt_ids(0), &[0]);
    assert_eq!(seq.similarity(0).shape(), (1, 1));
    assert_eq!(seq.similarity(1).shape(), (0, 1));
    assert_eq!(seq.num_gt_ids(), 1);
    assert_eq!(seq.num_gt_dets(), 1);
    assert_eq!(seq.num_tracker_dets(), 2);
}

#[test]
fn test_integration_num_ids_from_max_id() {
    let seq = align(
        "1,3,0,0,1,1\n2,7,0,0,1,1\n2,1,0,0,1,1\n",
        "1,0,0,0,1,1,1\n",
    );
    assert_eq!(seq.num_gt_ids(), 8);
    assert_eq!(seq.num_tracker_ids(), 1);
}

#[test]
fn test_integration_overlap_symmetry() {
    let a = DMatrix::from_row_slice(2, 4, &[0.0, 0.0, 10.0, 10.0, 3.0, 3.0, 4.0, 8.0]);
    let b = DMatrix::from_row_slice(3, 4, &[1.0, 1.0, 10.0, 10.0, 0.0, 0.0, 0.0, 5.0, 2.5, 9.0, 7.0, 1.0]);

    let ab = iou_matrix(&a, &b, BoxFormat::Xywh).unwrap();
    let ba = iou_matrix(&b, &a, BoxFormat::Xywh).unwrap();
    assert_eq!(ab, ba.transpose());
    // Zero-width box scores 0 against everything
    assert!(ab.column(1).iter().all(|&v| v == 0.0));
}

// =============================================================================
// File-based evaluation
// =============================================================================

#[test]
fn test_integration_evaluate_files_with_json_config() {
    let gt = write_file("1,0,0,0,10,10,1\n2,0,0,0,10,10,1\n2,1,40,40,10,10,1\n");
    let tracker = write_file("1,0,1,1,10,10,0.9\n2,0,1,1,10,10,0.9\n");
    let config = EvalConfig::from_json_str(
        r#"{"metrics": ["count"], "match_threshold": 0.5, "tracker_name": "sort"}"#,
    )
    .unwrap();

    let results = evaluate_files(gt.path(), tracker.path(), &config).unwrap();
    assert_eq!(results.tracker_name(), "sort");

    let summary = results.get(MetricKind::Count).unwrap().summary();
    assert_eq!(
        summary,
        vec![
            ("Dets", 2.0),
            ("GT_Dets", 3.0),
            ("IDs", 1.0),
            ("GT_IDs", 2.0),
            ("Frames", 2.0),
        ]
    );

    // IoU of a 1px shifted 10x10 box: 81 / 119
    let seq = results.sequence();
    assert!((seq.similarity(0)[(0, 0)] - 81.0 / 119.0).abs() < 1e-12);
    assert_eq!(seq.matches(1).len(), 1);
}

#[test]
fn test_integration_evaluate_sequence_runs_all_metrics() {
    let seq = align("1,0,0,0,10,10\n", "1,5,0,0,10,10,0.9\n");
    let results = evaluate_sequence(&seq, &MetricKind::ALL);

    assert_eq!(results.len(), MetricKind::ALL.len());
    match &results[0].1 {
        MetricResult::Count(count) => {
            assert_eq!(count.frames, 1);
            assert_eq!(count.ids, 6);
        }
    }
}

#[test]
fn test_integration_malformed_frame_fails_fast() {
    let gt = write_file("1,0,0,0,10,10\nx,0,0,0,10,10\n");
    let tracker = write_file("1,0,0,0,10,10,1\n");

    let result = evaluate_files(gt.path(), tracker.path(), &EvalConfig::default());
    assert!(matches!(result, Err(Error::Parse { line: 2, column: 0, .. })));
}

#[test]
fn test_integration_unknown_box_format_is_config_error() {
    let result = EvalConfig::from_json_str(r#"{"box_format": "ltrb"}"#);
    assert!(matches!(result, Err(Error::InvalidConfig(_))));
}
