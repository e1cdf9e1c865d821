//! Vocabulary Layout - identity of a fitted feature space
//!
//! A feature vector only means something against the vocabulary that
//! produced it. The layout hash ties vectors, IDF weights and classifier
//! weights to one ordered term list.
//!
//! ## Rules
//! 1. Any change to term order or membership changes the hash
//! 2. Artifact format changes bump `ARTIFACT_FORMAT_VERSION`

use crc32fast::Hasher;

use crate::constants::ARTIFACT_FORMAT_VERSION;
use crate::error::ModelError;

/// CRC32 over the format version and the ordered terms
pub fn vocabulary_hash<'a, I>(terms: I) -> u32
where
    I: IntoIterator<Item = &'a str>,
{
    let mut hasher = Hasher::new();
    hasher.update(&[ARTIFACT_FORMAT_VERSION]);

    for term in terms {
        hasher.update(term.as_bytes());
        // Separator so ["ab", "c"] and ["a", "bc"] differ
        hasher.update(&[0]);
    }

    hasher.finalize()
}

/// Check that a vector built for `actual` can be scored by a model built for `expected`
pub fn validate_layout(expected: u32, actual: u32) -> Result<(), ModelError> {
    if expected != actual {
        return Err(ModelError::LayoutMismatch { expected, actual });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_is_stable() {
        let a = vocabulary_hash(["coffee", "gas", "gas station"]);
        let b = vocabulary_hash(["coffee", "gas", "gas station"]);
        assert_eq!(a, b);
    }

    #[test]
    fn test_hash_depends_on_order() {
        let a = vocabulary_hash(["coffee", "gas"]);
        let b = vocabulary_hash(["gas", "coffee"]);
        assert_ne!(a, b);
    }

    #[test]
    fn test_hash_separates_terms() {
        assert_ne!(vocabulary_hash(["ab", "c"]), vocabulary_hash(["a", "bc"]));
    }

    #[test]
    fn test_validate_layout_mismatch() {
        match validate_layout(1, 2) {
            Err(ModelError::LayoutMismatch { expected, actual }) => {
                assert_eq!(expected, 1);
                assert_eq!(actual, 2);
            }
            _ => panic!("Expected LayoutMismatch error"),
        }
        assert!(validate_layout(7, 7).is_ok());
    }
}
