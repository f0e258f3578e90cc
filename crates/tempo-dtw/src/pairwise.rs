//! Batch DTW comparison of many sequences.

use rayon::prelude::*;
use tracing::{info, instrument};

use crate::aligner::Aligner;
use crate::error::DtwError;
use crate::sequence::FeatureSequence;
use crate::topology::PassType;

/// Configuration for all-pairs DTW comparison.
///
/// Each pair is aligned on a rayon worker with its own [`Aligner`]; the
/// distance function is shared by reference and must therefore be `Sync`.
///
/// # Defaults
///
/// | Parameter | Default |
/// |-----------|---------|
/// | `pass`    | [`PassType::Neighbors`] |
#[derive(Debug, Clone)]
pub struct PairwiseConfig<F> {
    distance: F,
    pass: PassType,
}

impl<F> PairwiseConfig<F>
where
    F: Fn(&[f64], &[f64]) -> f64 + Sync,
{
    /// Create a configuration with the given per-frame distance function.
    #[must_use]
    pub fn new(distance: F) -> Self {
        Self {
            distance,
            pass: PassType::default(),
        }
    }

    /// Set the pass topology used for every pair.
    #[must_use]
    pub fn with_pass_type(mut self, pass: PassType) -> Self {
        self.pass = pass;
        self
    }

    /// Return the pass topology.
    #[must_use]
    pub fn pass_type(&self) -> PassType {
        self.pass
    }

    /// Compute DTW distances for every unordered pair of `sequences`.
    ///
    /// Entry `(i, j)` with `i > j` holds the distance from `sequences[i]` to
    /// `sequences[j]`.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`DtwError::InvalidInput`] | Two sequences differ in dimensionality |
    /// | [`DtwError::Distance`] | The distance function returned a negative or non-finite value |
    #[instrument(skip(self, sequences), fields(n = sequences.len(), pass = ?self.pass))]
    pub fn compute(&self, sequences: &[FeatureSequence]) -> Result<PairwiseDistances, DtwError> {
        let n = sequences.len();
        let total_pairs = n * n.saturating_sub(1) / 2;

        let distances = (0..total_pairs)
            .into_par_iter()
            .map(|flat_idx| {
                let (i, j) = pair_from_flat(flat_idx);
                Aligner::new(&self.distance, self.pass)
                    .compute_distance(sequences[i].frames(), sequences[j].frames())
            })
            .collect::<Result<Vec<f64>, DtwError>>()?;

        info!(pairs = total_pairs, "pairwise distances computed");
        Ok(PairwiseDistances { n, data: distances })
    }
}

/// Map a flat lower-triangle index `i*(i-1)/2 + j` back to `(i, j)`, `i > j`.
fn pair_from_flat(flat_idx: usize) -> (usize, usize) {
    let mut i = ((1.0 + (1.0 + 8.0 * flat_idx as f64).sqrt()) / 2.0).floor() as usize;
    // Guard against the float estimate landing one row off for large indices.
    while i * (i - 1) / 2 > flat_idx {
        i -= 1;
    }
    while (i + 1) * i / 2 <= flat_idx {
        i += 1;
    }
    (i, flat_idx - i * (i - 1) / 2)
}

/// Symmetric DTW distances between `n` sequences, stored as a lower triangle.
#[derive(Debug, Clone, PartialEq)]
pub struct PairwiseDistances {
    n: usize,
    data: Vec<f64>,
}

impl PairwiseDistances {
    /// Return the number of sequences compared.
    #[must_use]
    pub fn len(&self) -> usize {
        self.n
    }

    /// Return true if no sequences were compared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// Return the distance between sequences `i` and `j`; zero when `i == j`.
    ///
    /// # Panics
    ///
    /// Panics if `i >= n` or `j >= n`.
    #[must_use]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        assert!(i < self.n, "row index {i} out of bounds for {} sequences", self.n);
        assert!(j < self.n, "column index {j} out of bounds for {} sequences", self.n);
        if i == j {
            return 0.0;
        }
        let (row, col) = if i > j { (i, j) } else { (j, i) };
        self.data[row * (row - 1) / 2 + col]
    }

    /// Iterate `(i, j, distance)` over all pairs with `i > j`.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, f64)> + '_ {
        (1..self.n).flat_map(move |i| (0..i).map(move |j| (i, j, self.data[i * (i - 1) / 2 + j])))
    }

    /// Distances from sequence `i` to every sequence, itself included.
    #[must_use]
    pub fn row(&self, i: usize) -> Vec<f64> {
        (0..self.n).map(|j| self.get(i, j)).collect()
    }

    /// The closest other sequence to `i` and its distance. `None` when there
    /// is only one sequence. Ties resolve to the lower index.
    #[must_use]
    pub fn nearest(&self, i: usize) -> Option<(usize, f64)> {
        (0..self.n)
            .filter(|&j| j != i)
            .map(|j| (j, self.get(i, j)))
            .min_by(|a, b| a.1.total_cmp(&b.1))
    }
}
