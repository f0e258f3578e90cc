//! Dense cumulative-cost matrix: the fill recurrence and path backtracking.

use std::ops::Index;

use crate::error::DistanceError;
use crate::path::{AlignmentPath, PathStep};
use crate::point::Point;
use crate::topology::PassType;

/// Filled `rows × cols` DTW cost matrix, stored row-major.
///
/// Row `i` corresponds to `from[i]`, column `j` to `to[j]`. The matrix
/// remembers the [`PassType`] it was filled with so that the optimal path
/// can be traced back with the same moves and tie-break.
#[derive(Debug, Clone, PartialEq)]
pub struct CostMatrix {
    rows: usize,
    cols: usize,
    pass: PassType,
    cells: Vec<Point>,
}

impl CostMatrix {
    /// Fill the matrix for `from × to`.
    ///
    /// Cells are computed in row-major order, so every predecessor of
    /// `(i, j)` is final before `(i, j)` is visited. `C(0, 0) = d(0, 0)`;
    /// every other cell adds its local distance to the cheapest predecessor,
    /// ties going to the earlier move of `pass`.
    ///
    /// Both sequences must be non-empty and dimensionally consistent; the
    /// aligner validates this before calling.
    pub(crate) fn fill<A, B, F>(
        from: &[A],
        to: &[B],
        distance: &F,
        pass: PassType,
    ) -> Result<Self, DistanceError>
    where
        A: AsRef<[f64]>,
        B: AsRef<[f64]>,
        F: Fn(&[f64], &[f64]) -> f64,
    {
        debug_assert!(!from.is_empty() && !to.is_empty());
        let rows = from.len();
        let cols = to.len();
        let mut cells: Vec<Point> = Vec::with_capacity(rows * cols);

        for (row, a) in from.iter().enumerate() {
            for (col, b) in to.iter().enumerate() {
                let local = distance(a.as_ref(), b.as_ref());
                if !local.is_finite() || local < 0.0 {
                    return Err(DistanceError::InvalidValue {
                        row,
                        col,
                        value: local,
                    });
                }

                let carried = best_predecessor(&cells, cols, pass, row, col)
                    .map_or(0.0, Point::accumulated_distance);
                cells.push(Point::new(row, col, local, local + carried));
            }
        }

        Ok(Self {
            rows,
            cols,
            pass,
            cells,
        })
    }

    /// Number of rows (length of the `from` sequence).
    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns (length of the `to` sequence).
    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Topology the matrix was filled with.
    #[must_use]
    pub fn pass_type(&self) -> PassType {
        self.pass
    }

    /// Return the cell at `(row, col)`, or `None` when out of bounds.
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> Option<&Point> {
        (row < self.rows && col < self.cols).then(|| &self.cells[row * self.cols + col])
    }

    /// Return all cells of row `row`.
    ///
    /// # Panics
    ///
    /// Panics if `row >= rows`.
    #[must_use]
    pub fn row(&self, row: usize) -> &[Point] {
        assert!(row < self.rows, "row index {row} out of bounds for matrix with {} rows", self.rows);
        &self.cells[row * self.cols..(row + 1) * self.cols]
    }

    /// Iterate all cells in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = &Point> + '_ {
        self.cells.iter()
    }

    /// The bottom-right cell `(rows - 1, cols - 1)`.
    #[must_use]
    pub fn final_point(&self) -> &Point {
        &self.cells[self.cells.len() - 1]
    }

    /// Accumulated distance of the final cell: the DTW distance.
    #[must_use]
    pub fn total_distance(&self) -> f64 {
        self.final_point().accumulated_distance()
    }

    /// Return the predecessor `(row, col)` was reached from, or `None` for
    /// the origin and for out-of-bounds coordinates.
    #[must_use]
    pub fn best_predecessor(&self, row: usize, col: usize) -> Option<&Point> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        best_predecessor(&self.cells, self.cols, self.pass, row, col)
    }

    /// Trace the lowest-cost path back from the final cell to the origin.
    ///
    /// Uses the same move order and tie-break as the fill, so the path is
    /// the one whose costs produced [`total_distance`](Self::total_distance).
    #[must_use]
    pub fn path(&self) -> AlignmentPath {
        let mut steps = Vec::with_capacity(self.rows + self.cols);
        let mut current = self.final_point();

        loop {
            steps.push(PathStep::from(current.coords()));
            match self.best_predecessor(current.row(), current.col()) {
                Some(prev) => current = prev,
                None => break,
            }
        }

        steps.reverse();
        AlignmentPath::new(steps)
    }
}

impl Index<(usize, usize)> for CostMatrix {
    type Output = Point;

    fn index(&self, (row, col): (usize, usize)) -> &Self::Output {
        assert!(row < self.rows, "row index {row} out of bounds for matrix with {} rows", self.rows);
        assert!(col < self.cols, "column index {col} out of bounds for matrix with {} columns", self.cols);
        &self.cells[row * self.cols + col]
    }
}

/// Cheapest already-filled predecessor of `(row, col)`; the first of equals wins.
fn best_predecessor(
    cells: &[Point],
    cols: usize,
    pass: PassType,
    row: usize,
    col: usize,
) -> Option<&Point> {
    pass.predecessors(row, col)
        .map(|(r, c)| &cells[r * cols + c])
        .reduce(|best, candidate| {
            if candidate.accumulated_distance() < best.accumulated_distance() {
                candidate
            } else {
                best
            }
        })
}
