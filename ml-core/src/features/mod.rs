//! Features Module - text to TF-IDF vectors
//!
//! - `text` cleans descriptions and extracts unigram/bigram terms
//! - `vectorizer` fits the vocabulary and transforms text
//! - `vector` holds the resulting vectors and matrices
//! - `layout` hashes a vocabulary so mismatched vectors are rejected

pub mod layout;
pub mod text;
pub mod vector;
pub mod vectorizer;

#[cfg(test)]
mod tests;

// Re-export common types
pub use layout::{validate_layout, vocabulary_hash};
pub use text::{clean_text, extract_terms, tokenize};
pub use vector::{FeatureMatrix, FeatureVector};
pub use vectorizer::{TfidfVectorizer, VectorizerConfig};
