//! Grouping of records by frame number.

use super::record::{load_records_from_path, Record};
use crate::Result;
use std::collections::BTreeMap;
use std::path::Path;

/// Records of one source grouped by their frame number (column 0).
///
/// Rows keep file order within a frame; ordering by id is not guaranteed.
#[derive(Debug, Clone, Default)]
pub struct FrameIndex {
    frames: BTreeMap<i64, Vec<Record>>,
}

impl FrameIndex {
    /// Group records by frame number.
    ///
    /// Fails with a parse error if column 0 of any record is not an integer.
    pub fn from_records(records: Vec<Record>) -> Result<Self> {
        let mut frames: BTreeMap<i64, Vec<Record>> = BTreeMap::new();
        for record in records {
            let frame = record.integer(0)?;
            frames.entry(frame).or_default().push(record);
        }
        Ok(Self { frames })
    }

    /// Load and group a MOTChallenge text file.
    pub fn load<P: AsRef<Path>>(file_path: P) -> Result<Self> {
        Self::from_records(load_records_from_path(file_path)?)
    }

    /// Rows observed for `frame`, if any.
    pub fn get(&self, frame: i64) -> Option<&[Record]> {
        self.frames.get(&frame).map(|v| v.as_slice())
    }

    /// Largest frame number present, or 0 if there are no positive frames.
    pub fn max_frame(&self) -> i64 {
        self.frames
            .keys()
            .next_back()
            .copied()
            .unwrap_or(0)
            .max(0)
    }

    /// Number of distinct frames.
    pub fn num_frames(&self) -> usize {
        self.frames.len()
    }

    /// Total number of rows across all frames.
    pub fn num_records(&self) -> usize {
        self.frames.values().map(Vec::len).sum()
    }

    /// Rows whose frame number can never be aligned (frame < 1).
    pub fn num_unaligned_records(&self) -> usize {
        self.frames.range(..1).map(|(_, rows)| rows.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Iterate over `(frame, rows)` in ascending frame order.
    pub fn iter(&self) -> impl Iterator<Item = (i64, &[Record])> {
        self.frames.iter().map(|(k, v)| (*k, v.as_slice()))
    }
}
