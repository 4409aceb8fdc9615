//! IoU (Intersection over Union) matrices between box sets.

use crate::{Error, Result};
use nalgebra::DMatrix;
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

/// Column layout of a box matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(try_from = "String")]
pub enum BoxFormat {
    /// `x, y, width, height` with `(x, y)` the top-left corner
    #[default]
    Xywh,
    /// `x0, y0, x1, y1` top-left and bottom-right corners
    X0y0x1y1,
}

impl FromStr for BoxFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "xywh" => Ok(BoxFormat::Xywh),
            "x0y0x1y1" => Ok(BoxFormat::X0y0x1y1),
            other => Err(Error::InvalidConfig(format!(
                "unsupported box format '{}', expected 'xywh' or 'x0y0x1y1'",
                other
            ))),
        }
    }
}

impl TryFrom<String> for BoxFormat {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl fmt::Display for BoxFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoxFormat::Xywh => write!(f, "xywh"),
            BoxFormat::X0y0x1y1 => write!(f, "x0y0x1y1"),
        }
    }
}

/// Convert a box matrix to corner form `[x0, y0, x1, y1]`.
pub fn to_corners(boxes: &DMatrix<f64>, format: BoxFormat) -> Result<DMatrix<f64>> {
    if boxes.ncols() != 4 {
        return Err(Error::InvalidBoxShape {
            rows: boxes.nrows(),
            cols: boxes.ncols(),
        });
    }

    let mut corners = boxes.clone();
    if format == BoxFormat::Xywh {
        for i in 0..corners.nrows() {
            corners[(i, 2)] += corners[(i, 0)];
            corners[(i, 3)] += corners[(i, 1)];
        }
    }
    Ok(corners)
}

fn areas(corners: &DMatrix<f64>) -> Vec<f64> {
    (0..corners.nrows())
        .map(|i| (corners[(i, 2)] - corners[(i, 0)]) * (corners[(i, 3)] - corners[(i, 1)]))
        .collect()
}

/// Compute the IoU matrix between two sets of bounding boxes.
///
/// # Arguments
/// * `reference` - First set of boxes, shape (n, 4)
/// * `candidates` - Second set of boxes, shape (m, 4)
/// * `format` - Column layout shared by both sets
///
/// # Returns
/// IoU matrix of shape (n, m) with entries in [0, 1].
///
/// Boxes whose area is not above `f64::EPSILON` intersect nothing, and pairs
/// whose union is not above `f64::EPSILON` score 0.
pub fn iou_matrix(
    reference: &DMatrix<f64>,
    candidates: &DMatrix<f64>,
    format: BoxFormat,
) -> Result<DMatrix<f64>> {
    let a = to_corners(reference, format)?;
    let b = to_corners(candidates, format)?;
    let n = a.nrows();
    let m = b.nrows();

    let mut result = DMatrix::zeros(n, m);
    if n == 0 || m == 0 {
        return Ok(result);
    }

    let eps = f64::EPSILON;
    let area_a = areas(&a);
    let area_b = areas(&b);

    for i in 0..n {
        for j in 0..m {
            let inter_w = (a[(i, 2)].min(b[(j, 2)]) - a[(i, 0)].max(b[(j, 0)])).max(0.0);
            let inter_h = (a[(i, 3)].min(b[(j, 3)]) - a[(i, 1)].max(b[(j, 1)])).max(0.0);
            let mut intersection = inter_w * inter_h;
            let mut union = area_a[i] + area_b[j] - intersection;

            if area_a[i] <= eps || area_b[j] <= eps {
                intersection = 0.0;
            }
            if union <= eps {
                intersection = 0.0;
                union = 1.0;
            }

            result[(i, j)] = intersection / union;
        }
    }

    Ok(result)
}
