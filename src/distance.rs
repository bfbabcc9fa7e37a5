//! Euclidean distance between feature vectors.

use num_traits::{AsPrimitive, Float};

use crate::error::InvalidInput;

/// Calculates the Euclidean distance between two feature vectors.
///
/// The result is accumulated in `f64` whatever the feature type is.
/// Vectors of different lengths are rejected with
/// [`InvalidInput::DimensionMismatch`]; two empty vectors are at distance 0.
pub fn euclidean_distance<F>(a: &[F], b: &[F]) -> Result<f64, InvalidInput>
where
    F: Float + AsPrimitive<f64>,
{
    if a.len() != b.len() {
        return Err(InvalidInput::DimensionMismatch {
            expected: a.len(),
            found: b.len(),
            index: None,
        });
    }
    Ok(squared_sum(a, b).sqrt())
}

/// Sum of squared per-index differences. Callers check the lengths.
fn squared_sum<F>(a: &[F], b: &[F]) -> f64
where
    F: Float + AsPrimitive<f64>,
{
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| {
            let diff: f64 = (*x - *y).as_();
            diff * diff
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_euclidean_distance() {
        let vec_a = vec![1.0, 2.0, 3.0];
        let vec_b = vec![4.0, 5.0, 6.0];
        let epsilon = 1e-9;

        // sqrt((1-4)^2 + (2-5)^2 + (3-6)^2) = sqrt(27)
        let dist = euclidean_distance(&vec_a, &vec_b).unwrap();
        let expected = (27.0_f64).sqrt();
        assert!((dist - expected).abs() < epsilon, "Expected {}, got {}", expected, dist);

        // 3-4-5 triangle
        let dist = euclidean_distance(&[0.0, 0.0], &[3.0, 4.0]).unwrap();
        assert!((dist - 5.0).abs() < epsilon, "Expected 5.0, got {}", dist);
    }

    #[test]
    fn test_euclidean_distance_f32_features() {
        let dist = euclidean_distance(&[1.0_f32, 1.0], &[4.0_f32, 5.0]).unwrap();
        assert!((dist - 5.0).abs() < 1e-6);
    }

    #[test]
    fn test_empty_vectors() {
        let empty_vec: Vec<f64> = vec![];
        assert_eq!(euclidean_distance(&empty_vec, &empty_vec), Ok(0.0));
    }

    #[test]
    fn test_length_mismatch_is_rejected() {
        // The longer second argument must not be silently truncated.
        let err = euclidean_distance(&[1.0, 2.0], &[1.0, 2.0, 3.0]).unwrap_err();
        assert_eq!(err, InvalidInput::DimensionMismatch { expected: 2, found: 3, index: None });

        // A shorter second argument must not be indexed out of range.
        let err = euclidean_distance(&[1.0, 2.0, 3.0], &[1.0]).unwrap_err();
        assert_eq!(err, InvalidInput::DimensionMismatch { expected: 3, found: 1, index: None });
    }
}
