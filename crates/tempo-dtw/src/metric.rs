//! Per-frame distance functions.
//!
//! Any `Fn(&[f64], &[f64]) -> f64` can drive an [`Aligner`](crate::Aligner);
//! these are the common choices. All of them assume both slices have the same
//! length, which the aligner checks before the first call.

use crate::error::MetricError;

/// Plain function pointer form of a distance function. The default type
/// parameter of [`Aligner`](crate::Aligner).
pub type DistanceFn = fn(&[f64], &[f64]) -> f64;

/// Euclidean (L2) distance.
#[must_use]
pub fn euclidean(a: &[f64], b: &[f64]) -> f64 {
    squared_euclidean(a, b).sqrt()
}

/// Squared Euclidean distance. Cheaper than [`euclidean`] and gives the
/// classic sum-of-squares DTW cost.
#[must_use]
pub fn squared_euclidean(a: &[f64], b: &[f64]) -> f64 {
    debug_assert_eq!(a.len(), b.len());
    a.iter().zip(b).map(|(x, y)| (x - y).powi(2)).sum()
}

/// Manhattan (L1) distance.
#[must_use]
pub fn manhattan(a: &[f64], b: &[f64]) -> f64 {
    debug_assert_eq!(a.len(), b.len());
    a.iter().zip(b).map(|(x, y)| (x - y).abs()).sum()
}

/// Chebyshev (L∞) distance: the largest per-component difference.
#[must_use]
pub fn chebyshev(a: &[f64], b: &[f64]) -> f64 {
    debug_assert_eq!(a.len(), b.len());
    a.iter()
        .zip(b)
        .map(|(x, y)| (x - y).abs())
        .fold(0.0, f64::max)
}

/// Cosine distance `1 - cos θ`, clamped to `[0, 2]`.
///
/// A zero vector has no direction: two zero vectors are at distance 0, a zero
/// vector and any other vector at distance 1.
#[must_use]
pub fn cosine(a: &[f64], b: &[f64]) -> f64 {
    debug_assert_eq!(a.len(), b.len());
    let mut dot = 0.0;
    let mut norm_a = 0.0;
    let mut norm_b = 0.0;
    for (x, y) in a.iter().zip(b) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }
    match (norm_a == 0.0, norm_b == 0.0) {
        (true, true) => 0.0,
        (true, false) | (false, true) => 1.0,
        (false, false) => (1.0 - dot / (norm_a * norm_b).sqrt()).clamp(0.0, 2.0),
    }
}

/// Build a Minkowski distance of order `p`.
///
/// `p = 1` is Manhattan and `p = 2` Euclidean.
///
/// # Errors
///
/// | Variant | Condition |
/// |---|---|
/// | [`MetricError::InvalidOrder`] | `p < 1` or `p` is not finite |
pub fn minkowski(p: f64) -> Result<impl Fn(&[f64], &[f64]) -> f64 + Copy + Send + Sync, MetricError> {
    if !p.is_finite() || p < 1.0 {
        return Err(MetricError::InvalidOrder { p });
    }
    Ok(move |a: &[f64], b: &[f64]| {
        debug_assert_eq!(a.len(), b.len());
        a.iter()
            .zip(b)
            .map(|(x, y)| (x - y).abs().powf(p))
            .sum::<f64>()
            .powf(p.recip())
    })
}
