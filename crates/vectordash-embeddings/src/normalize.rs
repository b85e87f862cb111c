//! Vector arithmetic on embeddings.

use crate::{EmbeddingError, EmbeddingResult};

/// Euclidean norm (magnitude) of a vector. Zero for an empty slice.
pub fn norm(vector: &[f32]) -> f32 {
    vector.iter().map(|x| x * x).sum::<f32>().sqrt()
}

/// Compute dot product between two vectors.
pub fn dot_product(a: &[f32], b: &[f32]) -> EmbeddingResult<f32> {
    check_dimensions(a, b)?;
    Ok(a.iter().zip(b.iter()).map(|(x, y)| x * y).sum())
}

/// Compute cosine similarity between two vectors.
///
/// Vectors of different length are rejected. If either vector has zero
/// magnitude the similarity is `0.0`, so two zero vectors are unrelated to
/// each other as well. Rounding may push the result marginally past
/// `[-1, 1]`; it is returned unclamped.
///
/// ```rust
/// use vectordash_embeddings::cosine_similarity;
///
/// let sim = cosine_similarity(&[1.0, 0.0], &[-1.0, 0.0]).unwrap();
/// assert!((sim + 1.0).abs() < 1e-6);
/// ```
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> EmbeddingResult<f32> {
    check_dimensions(a, b)?;

    let mut dot = 0.0f32;
    let mut sum_a = 0.0f32;
    let mut sum_b = 0.0f32;
    for (x, y) in a.iter().zip(b.iter()) {
        dot += x * y;
        sum_a += x * x;
        sum_b += y * y;
    }

    let norm_a = sum_a.sqrt();
    let norm_b = sum_b.sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return Ok(0.0);
    }

    Ok(dot / (norm_a * norm_b))
}

fn check_dimensions(a: &[f32], b: &[f32]) -> EmbeddingResult<()> {
    if a.len() != b.len() {
        return Err(EmbeddingError::DimensionMismatch {
            expected: a.len(),
            got: b.len(),
        });
    }
    Ok(())
}
