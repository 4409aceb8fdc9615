//! # TrackEval - MOTChallenge box evaluation core
//!
//! Aligns a ground-truth file and a tracker output file (MOTChallenge 2D box
//! format) into a single per-timestep structure that scoring metrics consume.
//!
//! ## Pipeline
//!
//! - Load comma-separated records with lenient numeric coercion
//! - Group rows by frame number
//! - Build per-frame id/box arrays for both sources
//! - Compute pairwise IoU and an optimal one-to-one assignment
//! - Drop ground-truth rows whose validity flag is zero
//! - Reduce per-frame results into global detection and id counters
//!
//! ## Example
//!
//! ```rust,ignore
//! use trackeval_rs::{evaluate_files, EvalConfig};
//!
//! let results = evaluate_files("gt/gt.txt", "trackers/MOT17-02.txt", &EvalConfig::default())?;
//! for (kind, result) in results.metrics() {
//!     println!("{}: {:?}", kind, result.summary());
//! }
//! ```

// Internal modules (ports of scipy)
pub(crate) mod internal;

// Public modules
pub mod config;
pub mod data;
pub mod evaluation;
pub mod metrics;
pub mod overlap;
pub mod preprocess;
pub mod sequence;

// Re-exports for convenience
pub use config::EvalConfig;
pub use data::{Field, FrameIndex, Record};
pub use evaluation::{evaluate_files, evaluate_sequence, EvaluationResults};
pub use metrics::{Metric, MetricKind, MetricResult};
pub use overlap::{iou_matrix, BoxFormat};
pub use preprocess::preprocess;
pub use sequence::{FrameData, MatchedPair, PreprocessedSequence};

// Error types
pub use crate::error::{Error, Result};

mod error {
    use thiserror::Error;

    /// Errors that can occur while loading and aligning evaluation data
    #[derive(Error, Debug)]
    pub enum Error {
        #[error("Invalid configuration: {0}")]
        InvalidConfig(String),

        #[error("Parse error at line {line}, column {column}: {reason}")]
        Parse {
            line: usize,
            column: usize,
            reason: String,
        },

        #[error("Invalid box shape: expected (n, 4), got ({rows}, {cols})")]
        InvalidBoxShape { rows: usize, cols: usize },

        #[error("Unknown metric: {0}")]
        UnknownMetric(String),

        #[error("IO error: {0}")]
        IoError(#[from] std::io::Error),
    }

    /// Result type for trackeval operations
    pub type Result<T> = std::result::Result<T, Error>;
}
