//! Alignment path types.

use crate::topology::PassType;

/// A single step of an alignment path: `from[row]` is matched with `to[col]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PathStep {
    /// Index in the `from` sequence.
    pub row: usize,
    /// Index in the `to` sequence.
    pub col: usize,
}

impl From<(usize, usize)> for PathStep {
    fn from((row, col): (usize, usize)) -> Self {
        Self { row, col }
    }
}

impl From<PathStep> for (usize, usize) {
    fn from(step: PathStep) -> Self {
        (step.row, step.col)
    }
}

/// Lowest-cost alignment path, ordered from `(0, 0)` to the last cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlignmentPath(Vec<PathStep>);

impl AlignmentPath {
    pub(crate) fn new(steps: Vec<PathStep>) -> Self {
        Self(steps)
    }

    /// Return the steps as a slice.
    #[must_use]
    pub fn steps(&self) -> &[PathStep] {
        &self.0
    }

    /// Return the number of steps.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Return true if the path has no steps. Never the case for a path
    /// produced by an aligner.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// First step, normally `(0, 0)`.
    #[must_use]
    pub fn start(&self) -> Option<PathStep> {
        self.0.first().copied()
    }

    /// Last step, normally the bottom-right cell of the matrix.
    #[must_use]
    pub fn end(&self) -> Option<PathStep> {
        self.0.last().copied()
    }

    /// Iterate the steps as `(row, col)` tuples.
    pub fn pairs(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.0.iter().map(|s| (s.row, s.col))
    }

    /// Check the path against a `rows × cols` grid under `pass`.
    ///
    /// A valid path starts at `(0, 0)`, ends at `(rows - 1, cols - 1)` and
    /// every step is a legal move of the topology.
    #[must_use]
    pub fn is_valid_for(&self, pass: PassType, rows: usize, cols: usize) -> bool {
        if rows == 0 || cols == 0 {
            return false;
        }
        let (Some(start), Some(end)) = (self.start(), self.end()) else {
            return false;
        };
        start == PathStep::from((0, 0))
            && end == PathStep::from((rows - 1, cols - 1))
            && self
                .0
                .windows(2)
                .all(|w| pass.allows(w[0].into(), w[1].into()))
    }
}

impl<'a> IntoIterator for &'a AlignmentPath {
    type Item = &'a PathStep;
    type IntoIter = std::slice::Iter<'a, PathStep>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
