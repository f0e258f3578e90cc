//! Error types for sequence validation, DTW alignment and metric construction.

use std::fmt;

/// Which of the two aligned sequences an input error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    /// The sequence indexed by matrix rows.
    From,
    /// The sequence indexed by matrix columns.
    To,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::From => f.write_str("`from`"),
            Self::To => f.write_str("`to`"),
        }
    }
}

/// Reasons a sequence of feature vectors is rejected.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InputError {
    /// Returned when the sequence contains no feature vectors.
    #[error("sequence must be non-empty")]
    EmptySequence,

    /// Returned when a feature vector has zero components.
    #[error("feature vector at index {index} is empty")]
    EmptyFeatureVector {
        /// Position of the empty feature vector.
        index: usize,
    },

    /// Returned when a feature vector's dimensionality differs from the first one seen.
    #[error("feature vector at index {index} has {got} components, expected {expected}")]
    DimensionMismatch {
        /// Position of the offending feature vector.
        index: usize,
        /// Dimensionality established by the first feature vector.
        expected: usize,
        /// Dimensionality of the offending feature vector.
        got: usize,
    },

    /// Returned when a component is NaN or infinite.
    #[error("non-finite value at feature vector {index}, component {component}")]
    NonFiniteValue {
        /// Position of the feature vector.
        index: usize,
        /// Position of the component inside the feature vector.
        component: usize,
    },
}

/// The caller-supplied distance function broke its contract.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DistanceError {
    /// Returned when the distance function yields a negative or non-finite value.
    #[error("distance function returned {value} for cell ({row}, {col}); expected a finite non-negative value")]
    InvalidValue {
        /// Row (index into `from`) of the cell being filled.
        row: usize,
        /// Column (index into `to`) of the cell being filled.
        col: usize,
        /// The value that was returned.
        value: f64,
    },
}

/// Errors from DTW alignment.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DtwError {
    /// One of the input sequences failed validation.
    #[error("invalid {side} sequence: {source}")]
    InvalidInput {
        /// Which sequence was rejected.
        side: Side,
        /// What was wrong with it.
        source: InputError,
    },

    /// The distance function misbehaved while the matrix was being filled.
    #[error(transparent)]
    Distance(#[from] DistanceError),

    /// Returned by result accessors before a successful `compute_distance`.
    #[error("no alignment has been computed")]
    NotComputed,
}

impl DtwError {
    pub(crate) fn input(side: Side, source: InputError) -> Self {
        Self::InvalidInput { side, source }
    }
}

/// Errors from constructing a parametrized metric.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MetricError {
    /// Returned when a Minkowski order is below 1 or not finite.
    #[error("Minkowski order must be a finite value >= 1, got {p}")]
    InvalidOrder {
        /// The rejected order.
        p: f64,
    },
}
