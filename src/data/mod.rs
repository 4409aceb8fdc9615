//! MOTChallenge text file loading.
//!
//! - `Record` / `Field` - Typed rows with lenient numeric coercion
//! - `load_records` - Read comma-separated rows, skipping blanks and comments
//! - `FrameIndex` - Rows grouped by frame number

mod frame_index;
mod record;

pub use frame_index::FrameIndex;
pub use record::{load_records, load_records_from_path, Field, Record};
