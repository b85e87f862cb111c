//! Property tests for vector math and fixed-size chunking.

use proptest::prelude::*;
use vectordash_embeddings::{chunk, cosine_similarity, norm, ChunkConfig, Chunker, EmbeddingError};

fn arb_vector(dim: usize) -> impl Strategy<Value = Vec<f32>> {
    proptest::collection::vec(-10.0f32..10.0f32, dim)
}

/// Two vectors of the same random dimension.
fn arb_pair() -> impl Strategy<Value = (Vec<f32>, Vec<f32>)> {
    (1usize..64).prop_flat_map(|dim| (arb_vector(dim), arb_vector(dim)))
}

/// Text plus a valid (size, overlap).
fn arb_chunk_input() -> impl Strategy<Value = (String, usize, usize)> {
    ("[a-zé ü\n]{0,200}", 1usize..40).prop_flat_map(|(text, size)| (Just(text), Just(size), 0..size))
}

mod prop_vector_math {
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        #[test]
        fn norm_is_non_negative(v in proptest::collection::vec(-100.0f32..100.0f32, 0..128)) {
            prop_assert!(norm(&v) >= 0.0);
        }

        #[test]
        fn self_similarity_is_one(v in arb_vector(32)) {
            prop_assume!(norm(&v) > 1e-3);
            let sim = cosine_similarity(&v, &v).unwrap();
            prop_assert!((sim - 1.0).abs() < 1e-4, "sim = {}", sim);
        }

        #[test]
        fn similarity_is_symmetric((a, b) in arb_pair()) {
            let ab = cosine_similarity(&a, &b).unwrap();
            let ba = cosine_similarity(&b, &a).unwrap();
            prop_assert!((ab - ba).abs() < 1e-6);
        }

        #[test]
        fn similarity_stays_near_unit_range((a, b) in arb_pair()) {
            let sim = cosine_similarity(&a, &b).unwrap();
            prop_assert!((-1.0001..=1.0001).contains(&sim), "sim = {}", sim);
        }

        #[test]
        fn unequal_lengths_are_rejected(a in arb_vector(3), b in arb_vector(4)) {
            prop_assert_eq!(
                cosine_similarity(&a, &b),
                Err(EmbeddingError::DimensionMismatch { expected: 3, got: 4 })
            );
        }
    }
}

mod prop_fixed_chunking {
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        #[test]
        fn fragment_count_matches_walk((text, size, overlap) in arb_chunk_input()) {
            let len = text.chars().count();
            let fragments = chunk(&text, size, overlap).unwrap();
            let expected = if len == 0 { 0 } else { len.div_ceil(size - overlap) };
            prop_assert_eq!(fragments.len(), expected);
        }

        #[test]
        fn fragments_are_bounded_and_share_overlap((text, size, overlap) in arb_chunk_input()) {
            let chunker = Chunker::fixed(size, overlap).unwrap();
            let fragments = chunker.fragments(&text);
            let len = text.chars().count();

            for fragment in &fragments {
                prop_assert!(fragment.len() <= size);
                prop_assert_eq!(fragment.text.chars().count(), fragment.len());
                prop_assert_eq!(fragment.start, fragment.index * (size - overlap));
            }
            for pair in fragments.windows(2) {
                let expected = overlap.min(pair[0].end - pair[1].start);
                prop_assert_eq!(pair[1].overlap, expected);
            }
            if let Some(last) = fragments.last() {
                prop_assert_eq!(last.end, len);
            }
        }

        #[test]
        fn chunking_is_deterministic((text, size, overlap) in arb_chunk_input()) {
            prop_assert_eq!(chunk(&text, size, overlap).unwrap(), chunk(&text, size, overlap).unwrap());
        }

        #[test]
        fn overlap_at_or_above_size_is_rejected(size in 1usize..50, extra in 0usize..10) {
            let result = ChunkConfig::new(size, size + extra);
            prop_assert!(matches!(result, Err(EmbeddingError::InvalidConfig(_))));
        }
    }
}

#[test]
fn literal_chunk_boundaries() {
    assert_eq!(
        chunk("abcdefghij", 4, 1).unwrap(),
        vec!["abcd", "defg", "ghij", "j"]
    );
}

#[test]
fn literal_cosine_cases() {
    assert_eq!(cosine_similarity(&[1.0, 0.0, 0.0], &[0.0, 1.0, 0.0]).unwrap(), 0.0);
    assert_eq!(cosine_similarity(&[1.0, 0.0], &[-1.0, 0.0]).unwrap(), -1.0);
}
