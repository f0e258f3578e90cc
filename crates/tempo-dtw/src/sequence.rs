//! Feature-vector sequences and their validation.

use std::ops::Index;

use crate::error::{DtwError, InputError, Side};

/// Owned, validated sequence of feature vectors.
///
/// Guaranteed non-empty, with every feature vector non-empty, of the same
/// dimensionality, and made of finite values.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureSequence {
    frames: Vec<Vec<f64>>,
    dimension: usize,
}

impl FeatureSequence {
    /// Create a new sequence, validating its shape and values.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`InputError::EmptySequence`] | `frames` is empty |
    /// | [`InputError::EmptyFeatureVector`] | A feature vector has no components |
    /// | [`InputError::DimensionMismatch`] | Feature vectors differ in length |
    /// | [`InputError::NonFiniteValue`] | Any value is NaN or infinite |
    pub fn new(frames: Vec<Vec<f64>>) -> Result<Self, InputError> {
        let dimension = check_frames(&frames, None)?;
        Ok(Self { frames, dimension })
    }

    /// Wrap a scalar series, one single-component feature vector per sample.
    ///
    /// # Errors
    ///
    /// Same conditions as [`FeatureSequence::new`].
    pub fn from_scalars(values: Vec<f64>) -> Result<Self, InputError> {
        Self::new(values.into_iter().map(|v| vec![v]).collect())
    }

    /// Return the feature vectors.
    #[must_use]
    pub fn frames(&self) -> &[Vec<f64>] {
        &self.frames
    }

    /// Return the number of components in every feature vector.
    #[must_use]
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Return the number of feature vectors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Always `false` for a constructed sequence; present for the
    /// `len_without_is_empty` convention.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Consume and return the feature vectors.
    #[must_use]
    pub fn into_inner(self) -> Vec<Vec<f64>> {
        self.frames
    }
}

impl Index<usize> for FeatureSequence {
    type Output = [f64];

    fn index(&self, index: usize) -> &Self::Output {
        &self.frames[index]
    }
}

impl AsRef<[Vec<f64>]> for FeatureSequence {
    fn as_ref(&self) -> &[Vec<f64>] {
        &self.frames
    }
}

impl TryFrom<Vec<Vec<f64>>> for FeatureSequence {
    type Error = InputError;

    fn try_from(frames: Vec<Vec<f64>>) -> Result<Self, Self::Error> {
        Self::new(frames)
    }
}

/// Validate both sides of an alignment and return their shared dimensionality.
///
/// The first feature vector of `from` fixes the dimensionality that every
/// other vector, on either side, must match.
pub(crate) fn validate_pair<A, B>(from: &[A], to: &[B]) -> Result<usize, DtwError>
where
    A: AsRef<[f64]>,
    B: AsRef<[f64]>,
{
    let dimension = check_frames(from, None).map_err(|e| DtwError::input(Side::From, e))?;
    check_frames(to, Some(dimension)).map_err(|e| DtwError::input(Side::To, e))?;
    Ok(dimension)
}

fn check_frames<V: AsRef<[f64]>>(frames: &[V], expected: Option<usize>) -> Result<usize, InputError> {
    let first = frames.first().ok_or(InputError::EmptySequence)?;
    let dimension = expected.unwrap_or(first.as_ref().len());

    for (index, frame) in frames.iter().enumerate() {
        let frame = frame.as_ref();
        if frame.is_empty() {
            return Err(InputError::EmptyFeatureVector { index });
        }
        if frame.len() != dimension {
            return Err(InputError::DimensionMismatch {
                index,
                expected: dimension,
                got: frame.len(),
            });
        }
        if let Some(component) = frame.iter().position(|v| !v.is_finite()) {
            return Err(InputError::NonFiniteValue { index, component });
        }
    }

    Ok(dimension)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_sequence() {
        let result = FeatureSequence::new(vec![]);
        assert!(matches!(result, Err(InputError::EmptySequence)));
    }

    #[test]
    fn rejects_empty_feature_vector() {
        let result = FeatureSequence::new(vec![vec![1.0], vec![]]);
        assert!(matches!(result, Err(InputError::EmptyFeatureVector { index: 1 })));
    }

    #[test]
    fn rejects_ragged_dimensions() {
        let result = FeatureSequence::new(vec![vec![1.0, 2.0], vec![3.0, 4.0], vec![5.0]]);
        assert!(matches!(
            result,
            Err(InputError::DimensionMismatch { index: 2, expected: 2, got: 1 })
        ));
    }

    #[test]
    fn rejects_nan_and_infinity() {
        let nan = FeatureSequence::new(vec![vec![1.0, f64::NAN]]);
        assert!(matches!(nan, Err(InputError::NonFiniteValue { index: 0, component: 1 })));

        let inf = FeatureSequence::from_scalars(vec![0.0, f64::NEG_INFINITY]);
        assert!(matches!(inf, Err(InputError::NonFiniteValue { index: 1, component: 0 })));
    }

    #[test]
    fn accepts_valid_sequence() {
        let seq = FeatureSequence::new(vec![vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
        assert_eq!(seq.len(), 2);
        assert_eq!(seq.dimension(), 2);
        assert_eq!(&seq[1], &[3.0, 4.0]);
    }

    #[test]
    fn from_scalars_makes_one_dimensional_frames() {
        let seq = FeatureSequence::from_scalars(vec![1.0, 2.0, 3.0]).unwrap();
        assert_eq!(seq.dimension(), 1);
        assert_eq!(seq.frames(), &[vec![1.0], vec![2.0], vec![3.0]]);
    }

    #[test]
    fn validate_pair_reports_side() {
        let empty: Vec<Vec<f64>> = vec![];
        let one = vec![vec![1.0]];

        let err = validate_pair(&empty, &one).unwrap_err();
        assert_eq!(err, DtwError::input(Side::From, InputError::EmptySequence));

        let err = validate_pair(&one, &empty).unwrap_err();
        assert_eq!(err, DtwError::input(Side::To, InputError::EmptySequence));
    }

    #[test]
    fn validate_pair_checks_dimension_across_sides() {
        let from = vec![vec![1.0, 2.0]];
        let to = vec![vec![1.0, 2.0], vec![3.0]];
        let err = validate_pair(&from, &to).unwrap_err();
        assert_eq!(
            err,
            DtwError::input(Side::To, InputError::DimensionMismatch { index: 1, expected: 2, got: 1 })
        );

        let to = vec![vec![1.0, 2.0, 3.0]];
        let err = validate_pair(&from, &to).unwrap_err();
        assert_eq!(
            err,
            DtwError::input(Side::To, InputError::DimensionMismatch { index: 0, expected: 2, got: 3 })
        );
    }
}
