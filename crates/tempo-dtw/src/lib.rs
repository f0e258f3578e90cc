//! Dynamic Time Warping alignment of feature-vector sequences.
//!
//! Pure math library, zero I/O. An [`Aligner`] fills the full cumulative-cost
//! matrix between two sequences of feature vectors under a chosen
//! [`PassType`], reports the DTW distance, and can backtrack the lowest-cost
//! [`AlignmentPath`]. [`PairwiseConfig`] compares many sequences in parallel.

mod aligner;
mod error;
mod matrix;
pub mod metric;
mod pairwise;
mod path;
mod point;
mod sequence;
mod topology;

pub use aligner::Aligner;
pub use error::{DistanceError, DtwError, InputError, MetricError, Side};
pub use matrix::CostMatrix;
pub use metric::DistanceFn;
pub use pairwise::{PairwiseConfig, PairwiseDistances};
pub use path::{AlignmentPath, PathStep};
pub use point::Point;
pub use sequence::FeatureSequence;
pub use topology::PassType;
