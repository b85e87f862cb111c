//! Similarity classification and side-by-side comparison.
//!
//! A cosine score is bucketed into one of five bands. The thresholds are
//! checked from the top down with strict `>`, and the first match wins, so
//! a score of exactly `0.9` is "closely related", not "near-duplicate".

use crate::{cosine_similarity, EmbeddingResult};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of dimensions shown in a comparison chart by default.
pub const DEFAULT_CHART_DIMENSIONS: usize = 10;

/// Qualitative bucket for a cosine similarity score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SimilarityBand {
    /// Score above 0.9.
    NearDuplicate,
    /// Score above 0.75.
    CloselyRelated,
    /// Score above 0.5.
    SomeCommonThemes,
    /// Score above 0.3.
    LooselyRelated,
    /// Everything else, NaN included.
    Unrelated,
}

impl SimilarityBand {
    /// Classify a score.
    pub fn from_score(score: f32) -> Self {
        if score > 0.9 {
            SimilarityBand::NearDuplicate
        } else if score > 0.75 {
            SimilarityBand::CloselyRelated
        } else if score > 0.5 {
            SimilarityBand::SomeCommonThemes
        } else if score > 0.3 {
            SimilarityBand::LooselyRelated
        } else {
            SimilarityBand::Unrelated
        }
    }

    /// Short label.
    pub fn label(&self) -> &'static str {
        match self {
            SimilarityBand::NearDuplicate => "near-duplicate",
            SimilarityBand::CloselyRelated => "closely related",
            SimilarityBand::SomeCommonThemes => "some common themes",
            SimilarityBand::LooselyRelated => "loosely related",
            SimilarityBand::Unrelated => "unrelated",
        }
    }

    /// One-sentence explanation for display next to a score.
    pub fn description(&self) -> &'static str {
        match self {
            SimilarityBand::NearDuplicate => {
                "These items are extremely similar and likely contain the same core information."
            }
            SimilarityBand::CloselyRelated => {
                "These items are very closely related and cover similar topics."
            }
            SimilarityBand::SomeCommonThemes => {
                "These items share some common themes but have distinct differences."
            }
            SimilarityBand::LooselyRelated => {
                "These items are somewhat related but mostly different."
            }
            SimilarityBand::Unrelated => {
                "These items have little in common and appear to be unrelated."
            }
        }
    }
}

impl fmt::Display for SimilarityBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Outcome of comparing two embeddings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimilarityReport {
    /// Raw cosine similarity, unclamped.
    pub score: f32,
    /// Band the score falls into.
    pub band: SimilarityBand,
}

impl SimilarityReport {
    /// Compare two vectors of equal dimension.
    pub fn compute(a: &[f32], b: &[f32]) -> EmbeddingResult<Self> {
        Ok(Self::from_score(cosine_similarity(a, b)?))
    }

    /// Wrap an already computed score.
    pub fn from_score(score: f32) -> Self {
        Self {
            score,
            band: SimilarityBand::from_score(score),
        }
    }

    /// Score as a percentage, clamped to `[-100, 100]`.
    pub fn percent(&self) -> f32 {
        self.score.clamp(-1.0, 1.0) * 100.0
    }
}

impl fmt::Display for SimilarityReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}% ({})", self.percent(), self.band)
    }
}

/// Values of two embeddings at one dimension.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DimensionPair {
    pub dimension: usize,
    pub a: f32,
    pub b: f32,
}

/// Pick `count` distinct dimensions out of `dimensions`, sorted ascending.
///
/// The same seed always yields the same selection. When `count` exceeds
/// `dimensions` every dimension is returned.
pub fn sample_dimensions(dimensions: usize, count: usize, seed: u64) -> Vec<usize> {
    let amount = count.min(dimensions);
    let mut rng = StdRng::seed_from_u64(seed);
    let mut picked = rand::seq::index::sample(&mut rng, dimensions, amount).into_vec();
    picked.sort_unstable();
    picked
}

/// Read the given dimensions out of two embeddings.
///
/// Dimensions past the end of the shorter vector are skipped.
pub fn compare_dimensions(a: &[f32], b: &[f32], dimensions: &[usize]) -> Vec<DimensionPair> {
    dimensions
        .iter()
        .filter_map(|&dimension| {
            Some(DimensionPair {
                dimension,
                a: *a.get(dimension)?,
                b: *b.get(dimension)?,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::EmbeddingError;

    #[test]
    fn test_band_thresholds_are_strict() {
        assert_eq!(SimilarityBand::from_score(0.95), SimilarityBand::NearDuplicate);
        assert_eq!(SimilarityBand::from_score(0.9), SimilarityBand::CloselyRelated);
        assert_eq!(SimilarityBand::from_score(0.76), SimilarityBand::CloselyRelated);
        assert_eq!(SimilarityBand::from_score(0.75), SimilarityBand::SomeCommonThemes);
        assert_eq!(SimilarityBand::from_score(0.5), SimilarityBand::LooselyRelated);
        assert_eq!(SimilarityBand::from_score(0.31), SimilarityBand::LooselyRelated);
        assert_eq!(SimilarityBand::from_score(0.3), SimilarityBand::Unrelated);
        assert_eq!(SimilarityBand::from_score(-1.0), SimilarityBand::Unrelated);
        assert_eq!(SimilarityBand::from_score(f32::NAN), SimilarityBand::Unrelated);
    }

    #[test]
    fn test_report_percent_clamps_drift() {
        let report = SimilarityReport::from_score(1.000_001);
        assert_eq!(report.band, SimilarityBand::NearDuplicate);
        assert_eq!(report.percent(), 100.0);
        assert_eq!(report.to_string(), "100.00% (near-duplicate)");
    }

    #[test]
    fn test_report_compute() {
        let report = SimilarityReport::compute(&[1.0, 0.0], &[1.0, 0.0]).unwrap();
        assert_eq!(report.band, SimilarityBand::NearDuplicate);

        let err = SimilarityReport::compute(&[1.0], &[1.0, 0.0]).unwrap_err();
        assert!(matches!(err, EmbeddingError::DimensionMismatch { .. }));
    }

    #[test]
    fn test_sample_dimensions_is_seeded() {
        let first = sample_dimensions(384, DEFAULT_CHART_DIMENSIONS, 7);
        let second = sample_dimensions(384, DEFAULT_CHART_DIMENSIONS, 7);
        assert_eq!(first, second);
        assert_eq!(first.len(), DEFAULT_CHART_DIMENSIONS);
        assert!(first.windows(2).all(|w| w[0] < w[1]));
        assert!(first.iter().all(|&d| d < 384));
    }

    #[test]
    fn test_sample_dimensions_small_vectors() {
        assert_eq!(sample_dimensions(3, 10, 1), vec![0, 1, 2]);
        assert!(sample_dimensions(0, 10, 1).is_empty());
    }

    #[test]
    fn test_compare_dimensions_skips_out_of_range() {
        let a = [0.1, 0.2, 0.3];
        let b = [0.4, 0.5];
        let pairs = compare_dimensions(&a, &b, &[0, 2]);
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].dimension, 0);
        assert_eq!(pairs[0].b, 0.4);
    }
}
