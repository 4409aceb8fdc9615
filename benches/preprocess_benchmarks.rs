//! Preprocessing benchmarks using Criterion.
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use nalgebra::DMatrix;
use std::io::Cursor;

use trackeval_rs::data::load_records;
use trackeval_rs::{iou_matrix, preprocess, BoxFormat, EvalConfig, FrameIndex};

/// Synthetic MOTChallenge text with `objects` boxes drifting over `frames` frames.
fn create_sequence_text(frames: usize, objects: usize, offset: f64) -> String {
    let mut text = String::new();
    for frame in 1..=frames {
        for id in 0..objects {
            let x = (id * 60) as f64 + frame as f64 + offset;
            let y = (id * 30) as f64 + offset;
            text.push_str(&format!("{},{},{},{},50,50,1\n", frame, id, x, y));
        }
    }
    text
}

fn create_index(frames: usize, objects: usize, offset: f64) -> FrameIndex {
    let text = create_sequence_text(frames, objects, offset);
    FrameIndex::from_records(load_records(Cursor::new(text)).expect("valid text"))
        .expect("valid frames")
}

fn create_boxes(n: usize, offset: f64) -> DMatrix<f64> {
    let flat: Vec<f64> = (0..n)
        .flat_map(|i| {
            let x = (i * 40) as f64 + offset;
            [x, x / 2.0, 50.0, 50.0]
        })
        .collect();
    DMatrix::from_row_slice(n, 4, &flat)
}

fn benchmark_iou_matrix_100x100(c: &mut Criterion) {
    let a = create_boxes(100, 0.0);
    let b = create_boxes(100, 5.0);

    c.bench_function("iou_matrix_100x100", |bench| {
        bench.iter(|| iou_matrix(black_box(&a), black_box(&b), BoxFormat::Xywh))
    });
}

fn benchmark_preprocess_500_frames_20_objects(c: &mut Criterion) {
    let gt = create_index(500, 20, 0.0);
    let tracker = create_index(500, 20, 3.0);
    let config = EvalConfig::default();

    c.bench_function("preprocess_500_frames_20_objects", |bench| {
        bench.iter(|| preprocess(black_box(&gt), black_box(&tracker), &config))
    });
}

fn benchmark_load_records_10k_rows(c: &mut Criterion) {
    let text = create_sequence_text(500, 20, 0.0);

    c.bench_function("load_records_10k_rows", |bench| {
        bench.iter(|| load_records(Cursor::new(black_box(text.as_bytes()))))
    });
}

criterion_group!(
    benches,
    benchmark_iou_matrix_100x100,
    benchmark_preprocess_500_frames_20_objects,
    benchmark_load_records_10k_rows,
);
criterion_main!(benches);
