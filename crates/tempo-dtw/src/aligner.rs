//! Stateful DTW aligner.

use std::fmt;

use tracing::{debug, instrument};

use crate::error::DtwError;
use crate::matrix::CostMatrix;
use crate::metric::{self, DistanceFn};
use crate::path::AlignmentPath;
use crate::point::Point;
use crate::sequence::validate_pair;
use crate::topology::PassType;

/// Dynamic Time Warping aligner.
///
/// Holds a per-frame distance function, a [`PassType`], and the cost matrix
/// of the most recent successful [`compute_distance`](Self::compute_distance).
/// Until such a call succeeds, or after any failed call or reconfiguration,
/// the result accessors return [`DtwError::NotComputed`].
///
/// One aligner serves one computation at a time; `compute_distance` takes
/// `&mut self`. For parallel work give each task its own aligner, as
/// [`PairwiseConfig`](crate::PairwiseConfig) does.
///
/// ```
/// use tempo_dtw::{Aligner, PassType};
///
/// let mut aligner = Aligner::euclidean(PassType::Neighbors);
/// let from = [[0.0], [1.0], [2.0]];
/// let to = [[0.0], [2.0]];
/// assert_eq!(aligner.compute_distance(&from, &to).unwrap(), 1.0);
/// assert_eq!(aligner.path().unwrap().len(), 3);
/// ```
#[derive(Clone)]
pub struct Aligner<F = DistanceFn> {
    distance: F,
    pass: PassType,
    matrix: Option<CostMatrix>,
}

impl Aligner<DistanceFn> {
    /// Create an aligner using [`metric::euclidean`] between feature vectors.
    #[must_use]
    pub fn euclidean(pass: PassType) -> Self {
        Self::new(metric::euclidean, pass)
    }
}

impl Default for Aligner<DistanceFn> {
    /// Euclidean distance with [`PassType::Neighbors`].
    fn default() -> Self {
        Self::euclidean(PassType::default())
    }
}

impl<F> Aligner<F>
where
    F: Fn(&[f64], &[f64]) -> f64,
{
    /// Create an aligner from a distance function and a pass topology.
    ///
    /// `distance` is called once per matrix cell with `from[i]` and `to[j]`.
    /// It must be deterministic and return a finite, non-negative value.
    #[must_use]
    pub fn new(distance: F, pass: PassType) -> Self {
        Self {
            distance,
            pass,
            matrix: None,
        }
    }

    /// Replace the pass topology.
    #[must_use]
    pub fn with_pass_type(mut self, pass: PassType) -> Self {
        self.set_pass_type(pass);
        self
    }

    /// Replace the pass topology, discarding any computed matrix.
    pub fn set_pass_type(&mut self, pass: PassType) {
        self.pass = pass;
        self.matrix = None;
    }

    /// Replace the distance function, discarding any computed matrix.
    pub fn set_distance(&mut self, distance: F) {
        self.distance = distance;
        self.matrix = None;
    }

    /// Return the configured pass topology.
    #[must_use]
    pub fn pass_type(&self) -> PassType {
        self.pass
    }

    /// Return true if a matrix from a successful computation is held.
    #[must_use]
    pub fn is_filled(&self) -> bool {
        self.matrix.is_some()
    }

    /// Compute the DTW distance between `from` and `to`.
    ///
    /// Fills the full `|from| × |to|` cost matrix, in O(|from| · |to|) time
    /// and space, and returns the accumulated cost of its bottom-right cell.
    /// The matrix stays available through [`points`](Self::points),
    /// [`final_point`](Self::final_point) and [`path`](Self::path) until the
    /// next call.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`DtwError::InvalidInput`] | Either sequence is empty, has an empty or ragged feature vector, disagrees with the other on dimensionality, or contains a non-finite value |
    /// | [`DtwError::Distance`] | The distance function returned a negative or non-finite value |
    ///
    /// On error any previous matrix is gone and the aligner is unfilled.
    #[instrument(skip(self, from, to), fields(rows = from.len(), cols = to.len(), pass = ?self.pass))]
    pub fn compute_distance<A, B>(&mut self, from: &[A], to: &[B]) -> Result<f64, DtwError>
    where
        A: AsRef<[f64]>,
        B: AsRef<[f64]>,
    {
        self.matrix = None;
        let dimension = validate_pair(from, to)?;

        let matrix = CostMatrix::fill(from, to, &self.distance, self.pass)?;
        let total = matrix.total_distance();
        debug!(dimension, total, "cost matrix filled");

        self.matrix = Some(matrix);
        Ok(total)
    }

    /// Return the filled cost matrix.
    ///
    /// # Errors
    ///
    /// [`DtwError::NotComputed`] if no computation has succeeded since the
    /// last failure or reconfiguration.
    pub fn points(&self) -> Result<&CostMatrix, DtwError> {
        self.matrix.as_ref().ok_or(DtwError::NotComputed)
    }

    /// Return the bottom-right cell of the filled matrix.
    ///
    /// # Errors
    ///
    /// [`DtwError::NotComputed`] under the same condition as [`points`](Self::points).
    pub fn final_point(&self) -> Result<Point, DtwError> {
        self.points().map(|m| *m.final_point())
    }

    /// Backtrack the lowest-cost path through the filled matrix.
    ///
    /// # Errors
    ///
    /// [`DtwError::NotComputed`] under the same condition as [`points`](Self::points).
    pub fn path(&self) -> Result<AlignmentPath, DtwError> {
        self.points().map(CostMatrix::path)
    }

    /// Drop the filled matrix, returning it if there was one.
    pub fn take_points(&mut self) -> Option<CostMatrix> {
        self.matrix.take()
    }
}

impl<F> fmt::Debug for Aligner<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Aligner")
            .field("pass", &self.pass)
            .field("matrix", &self.matrix.as_ref().map(|m| (m.rows(), m.cols())))
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{DistanceError, InputError, Side};
    use crate::metric::manhattan;

    fn scalars(values: &[f64]) -> Vec<Vec<f64>> {
        values.iter().map(|&v| vec![v]).collect()
    }

    #[test]
    fn fresh_aligner_is_unfilled() {
        let aligner: Aligner = Aligner::default();
        assert!(!aligner.is_filled());
        assert_eq!(aligner.final_point(), Err(DtwError::NotComputed));
        assert_eq!(aligner.points().unwrap_err(), DtwError::NotComputed);
        assert_eq!(aligner.path(), Err(DtwError::NotComputed));
    }

    #[test]
    fn empty_from_is_invalid_input() {
        let mut aligner = Aligner::euclidean(PassType::Neighbors);
        let empty: Vec<Vec<f64>> = vec![];
        let err = aligner.compute_distance(&empty, &[[1.0]]).unwrap_err();
        assert_eq!(
            err,
            DtwError::InvalidInput {
                side: Side::From,
                source: InputError::EmptySequence
            }
        );
        assert!(!aligner.is_filled());
    }

    #[test]
    fn single_cells_equal_local_distance() {
        let mut aligner = Aligner::euclidean(PassType::Neighbors);
        let d = aligner.compute_distance(&[[0.0, 0.0]], &[[3.0, 4.0]]).unwrap();
        assert!((d - 5.0).abs() < 1e-12);

        let final_point = aligner.final_point().unwrap();
        assert_eq!(final_point.coords(), (0, 0));
        assert_eq!(final_point.local_distance(), final_point.accumulated_distance());
        assert_eq!(aligner.path().unwrap().pairs().collect::<Vec<_>>(), vec![(0, 0)]);
    }

    #[test]
    fn failed_call_clears_previous_result() {
        let mut aligner = Aligner::new(manhattan, PassType::Neighbors);
        aligner.compute_distance(&scalars(&[1.0, 2.0]), &scalars(&[1.0])).unwrap();
        assert!(aligner.is_filled());

        let err = aligner
            .compute_distance(&scalars(&[1.0]), &[vec![1.0, 2.0]])
            .unwrap_err();
        assert!(matches!(
            err,
            DtwError::InvalidInput {
                side: Side::To,
                source: InputError::DimensionMismatch { .. }
            }
        ));
        assert_eq!(aligner.final_point(), Err(DtwError::NotComputed));
    }

    #[test]
    fn distance_function_failure_propagates() {
        let mut aligner = Aligner::new(|_: &[f64], _: &[f64]| -1.0, PassType::Neighbors);
        let err = aligner.compute_distance(&[[1.0]], &[[2.0]]).unwrap_err();
        assert_eq!(
            err,
            DtwError::Distance(DistanceError::InvalidValue {
                row: 0,
                col: 0,
                value: -1.0
            })
        );
        assert!(!aligner.is_filled());
    }

    #[test]
    fn reconfiguring_discards_matrix() {
        let mut aligner = Aligner::new(manhattan as DistanceFn, PassType::Neighbors);
        aligner.compute_distance(&[[1.0]], &[[2.0]]).unwrap();
        aligner.set_pass_type(PassType::Diagonals);
        assert!(!aligner.is_filled());
        assert_eq!(aligner.pass_type(), PassType::Diagonals);

        aligner.compute_distance(&[[1.0]], &[[2.0]]).unwrap();
        aligner.set_distance(metric::chebyshev);
        assert!(!aligner.is_filled());
    }

    #[test]
    fn recompute_replaces_matrix() {
        let mut aligner = Aligner::new(manhattan, PassType::Neighbors);
        aligner.compute_distance(&scalars(&[1.0, 2.0, 3.0]), &scalars(&[1.0])).unwrap();
        aligner.compute_distance(&scalars(&[5.0]), &scalars(&[1.0, 2.0])).unwrap();

        let m = aligner.points().unwrap();
        assert_eq!((m.rows(), m.cols()), (1, 2));
        assert_eq!(aligner.final_point().unwrap().accumulated_distance(), 7.0);
    }

    #[test]
    fn take_points_leaves_aligner_unfilled() {
        let mut aligner = Aligner::new(manhattan, PassType::Neighbors);
        aligner.compute_distance(&[[1.0]], &[[2.0]]).unwrap();
        let m = aligner.take_points().unwrap();
        assert_eq!(m.total_distance(), 1.0);
        assert!(!aligner.is_filled());
    }

    #[test]
    fn debug_shows_pass_and_shape() {
        let mut aligner = Aligner::euclidean(PassType::Diagonals);
        aligner.compute_distance(&[[1.0], [2.0]], &[[2.0]]).unwrap();
        let text = format!("{aligner:?}");
        assert!(text.contains("Diagonals"));
        assert!(text.contains("Some((2, 1))"));
    }
}
