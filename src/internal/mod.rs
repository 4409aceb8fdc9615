//! Internal modules ported from external libraries.
//!
//! These modules contain code adapted from:
//! - scipy: Optimal linear assignment

pub mod scipy;
