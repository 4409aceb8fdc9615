//! SciPy optimization functions port.
//!
//! Ported from scipy.optimize.linear_sum_assignment (rectangular_lsap.cpp)
//! License: BSD 3-Clause (SciPy Developers)
#![allow(dead_code)]
#![allow(clippy::needless_range_loop)]

/// Represents a match between a row index and column index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Assignment {
    pub row_idx: usize,
    pub col_idx: usize,
}

/// Result of linear sum assignment.
#[derive(Debug, Clone)]
pub struct AssignmentResult {
    /// Valid assignments (row, col pairs), sorted by row
    pub assignments: Vec<Assignment>,
    /// Indices of rows that were not matched
    pub unmatched_rows: Vec<usize>,
    /// Indices of columns that were not matched
    pub unmatched_cols: Vec<usize>,
}

/// Solve the rectangular linear sum assignment problem.
///
/// Finds the one-to-one assignment of `min(rows, cols)` pairs that minimizes
/// the total cost. This is a port of scipy.optimize.linear_sum_assignment,
/// which uses a shortest augmenting path method (Jonker-Volgenant as described
/// by Crouse, 2016) with O(n^2 * m) worst-case complexity.
///
/// # Arguments
/// * `cost_matrix` - 2D cost matrix where cost[i][j] is the cost of assigning row i to column j
/// * `max_cost` - Maximum cost threshold; assignments with cost > max_cost are rejected
///
/// Non-finite costs are treated as forbidden pairs and never reported as
/// assignments.
pub fn linear_sum_assignment(cost_matrix: &[Vec<f64>], max_cost: f64) -> AssignmentResult {
    let num_rows = cost_matrix.len();
    let num_cols = cost_matrix.first().map_or(0, Vec::len);

    if num_rows == 0 || num_cols == 0 {
        return AssignmentResult {
            assignments: Vec::new(),
            unmatched_rows: (0..num_rows).collect(),
            unmatched_cols: (0..num_cols).collect(),
        };
    }

    // The solver needs rows <= cols
    let transpose = num_rows > num_cols;
    let cost = solver_costs(cost_matrix, transpose);
    let col4row = shortest_augmenting_path(&cost);

    let mut assignments: Vec<Assignment> = col4row
        .iter()
        .enumerate()
        .filter_map(|(r, c)| c.map(|c| if transpose { (c, r) } else { (r, c) }))
        .filter(|&(row, col)| {
            let value = cost_matrix[row][col];
            value.is_finite() && value <= max_cost
        })
        .map(|(row_idx, col_idx)| Assignment { row_idx, col_idx })
        .collect();
    assignments.sort_by_key(|a| a.row_idx);

    let mut matched_rows = vec![false; num_rows];
    let mut matched_cols = vec![false; num_cols];
    for a in &assignments {
        matched_rows[a.row_idx] = true;
        matched_cols[a.col_idx] = true;
    }

    let unmatched_rows: Vec<usize> = (0..num_rows).filter(|&i| !matched_rows[i]).collect();
    let unmatched_cols: Vec<usize> = (0..num_cols).filter(|&j| !matched_cols[j]).collect();

    AssignmentResult {
        assignments,
        unmatched_rows,
        unmatched_cols,
    }
}

/// Copy the cost matrix (optionally transposed), replacing non-finite entries
/// with a cost larger than any complete assignment of finite entries.
fn solver_costs(cost_matrix: &[Vec<f64>], transpose: bool) -> Vec<Vec<f64>> {
    let num_rows = cost_matrix.len();
    let num_cols = cost_matrix[0].len();

    let finite_max = cost_matrix
        .iter()
        .flatten()
        .filter(|c| c.is_finite())
        .fold(0.0_f64, |acc, c| acc.max(c.abs()));
    let forbidden = (finite_max + 1.0) * (num_rows + num_cols) as f64;

    let value = |i: usize, j: usize| {
        let c = cost_matrix[i][j];
        if c.is_finite() {
            c
        } else {
            forbidden
        }
    };

    if transpose {
        (0..num_cols)
            .map(|j| (0..num_rows).map(|i| value(i, j)).collect())
            .collect()
    } else {
        (0..num_rows)
            .map(|i| (0..num_cols).map(|j| value(i, j)).collect())
            .collect()
    }
}

/// Shortest augmenting path solver for a cost matrix with rows <= cols.
///
/// Returns a vector where result[i] = Some(j) means row i is assigned to column j.
fn shortest_augmenting_path(cost: &[Vec<f64>]) -> Vec<Option<usize>> {
    let nr = cost.len();
    let nc = cost[0].len();

    // Dual variables
    let mut u = vec![0.0; nr];
    let mut v = vec![0.0; nc];

    let mut shortest = vec![f64::INFINITY; nc];
    let mut path = vec![0usize; nc];
    let mut col4row: Vec<Option<usize>> = vec![None; nr];
    let mut row4col: Vec<Option<usize>> = vec![None; nc];
    let mut visited_rows = vec![false; nr];
    let mut visited_cols = vec![false; nc];
    let mut remaining = vec![0usize; nc];

    for cur_row in 0..nr {
        shortest.fill(f64::INFINITY);
        visited_rows.fill(false);
        visited_cols.fill(false);
        // Filled in reverse so ties prefer the lowest column index
        for (it, slot) in remaining.iter_mut().enumerate() {
            *slot = nc - it - 1;
        }
        let mut num_remaining = nc;
        let mut min_val = 0.0;
        let mut row = cur_row;

        let sink = loop {
            visited_rows[row] = true;

            let mut lowest = f64::INFINITY;
            let mut index = None;
            for it in 0..num_remaining {
                let j = remaining[it];
                let reduced = min_val + cost[row][j] - u[row] - v[j];
                if reduced < shortest[j] {
                    path[j] = row;
                    shortest[j] = reduced;
                }
                if shortest[j] < lowest || (shortest[j] == lowest && row4col[j].is_none()) {
                    lowest = shortest[j];
                    index = Some(it);
                }
            }

            min_val = lowest;
            let Some(index) = index else { break None };
            if !min_val.is_finite() {
                break None;
            }

            let j = remaining[index];
            visited_cols[j] = true;
            num_remaining -= 1;
            remaining[index] = remaining[num_remaining];

            match row4col[j] {
                None => break Some(j),
                Some(next_row) => row = next_row,
            }
        };

        let Some(sink) = sink else { continue };

        // Update dual variables
        u[cur_row] += min_val;
        for i in 0..nr {
            if visited_rows[i] && i != cur_row {
                if let Some(c) = col4row[i] {
                    u[i] += min_val - shortest[c];
                }
            }
        }
        for j in 0..nc {
            if visited_cols[j] {
                v[j] -= min_val - shortest[j];
            }
        }

        // Augment the previous solution along the path
        let mut j = sink;
        loop {
            let i = path[j];
            row4col[j] = Some(i);
            let previous = col4row[i].replace(j);
            if i == cur_row {
                break;
            }
            let Some(previous) = previous else { break };
            j = previous;
        }
    }

    col4row
}
