//! Vectorizer tests over a small statement corpus

use super::vectorizer::{TfidfVectorizer, VectorizerConfig};
use crate::error::TrainingError;

fn corpus() -> Vec<&'static str> {
    vec![
        "Walmart Grocery Store",
        "Kroger Grocery Market",
        "Shell Gas Station",
        "Chevron Gas Station",
        "Netflix Streaming",
        "Spotify Premium Streaming",
    ]
}

fn fitted() -> TfidfVectorizer {
    TfidfVectorizer::fit(VectorizerConfig::default(), &corpus()).unwrap()
}

#[test]
fn test_transform_is_deterministic() {
    let v = fitted();
    let a = v.transform("Shell Gas Station #442");
    let b = v.transform("Shell Gas Station #442");
    assert_eq!(a, b);
    assert_eq!(a.len(), v.len());
}

#[test]
fn test_vocabulary_contains_bigrams() {
    let v = fitted();
    assert!(v.term_index("gas station").is_some());
    assert!(v.term_index("walmart grocery").is_some());
    assert!(v.term_index("walmart").is_some());
}

#[test]
fn test_indices_follow_term_order() {
    let v = fitted();
    let terms: Vec<&str> = v.terms().collect();
    let mut sorted = terms.clone();
    sorted.sort();
    assert_eq!(terms, sorted);
    for (i, term) in terms.iter().enumerate() {
        assert_eq!(v.term_index(term), Some(i));
    }
}

#[test]
fn test_unknown_terms_are_ignored() {
    let v = fitted();
    let vector = v.transform("Totally Unseen Merchant");
    assert!(vector.is_zero());
}

#[test]
fn test_empty_description_is_zero_vector() {
    let v = fitted();
    assert!(v.transform("").is_zero());
    assert!(v.transform("   \t ").is_zero());
    assert!(v.transform("POS 1234").is_zero());
}

#[test]
fn test_values_are_non_negative_and_normalized() {
    let v = fitted();
    let vector = v.transform("Walmart Grocery Store Grocery");
    assert!(vector.values.iter().all(|&x| x >= 0.0));
    let norm = vector.values.dot(&vector.values).sqrt();
    assert!((norm - 1.0).abs() < 1e-9);
}

#[test]
fn test_raw_weights_without_normalization() {
    let config = VectorizerConfig {
        normalize: false,
        ..Default::default()
    };
    let v = TfidfVectorizer::fit(config, &corpus()).unwrap();
    let vector = v.transform("grocery grocery");
    let index = v.term_index("grocery").unwrap();
    // term frequency x idf
    let expected = 2.0 * v.idf("grocery").unwrap();
    assert!((vector.values[index] - expected).abs() < 1e-12);
    assert_eq!(vector.nnz(), 1);
}

#[test]
fn test_smooth_idf_values() {
    let v = fitted();
    // 6 documents, "grocery" in 2, "walmart" in 1
    let grocery = v.idf("grocery").unwrap();
    let walmart = v.idf("walmart").unwrap();
    assert!((grocery - ((7.0f64 / 3.0).ln() + 1.0)).abs() < 1e-12);
    assert!((walmart - ((7.0f64 / 2.0).ln() + 1.0)).abs() < 1e-12);
    assert!(walmart > grocery);
}

#[test]
fn test_max_features_caps_vocabulary() {
    let config = VectorizerConfig {
        max_features: 3,
        ..Default::default()
    };
    let v = TfidfVectorizer::fit(config, &corpus()).unwrap();
    assert_eq!(v.len(), 3);
}

#[test]
fn test_max_features_keeps_most_important_terms() {
    // "coffee" appears 3 times in one document: highest tf x idf
    let docs = ["coffee coffee coffee", "tea", "juice"];
    let config = VectorizerConfig {
        max_features: 1,
        max_df: 1.0,
        ..Default::default()
    };
    let v = TfidfVectorizer::fit(config, &docs).unwrap();
    assert_eq!(v.terms().collect::<Vec<_>>(), vec!["coffee"]);
}

#[test]
fn test_min_df_drops_rare_terms() {
    let config = VectorizerConfig {
        min_df: 2,
        ..Default::default()
    };
    let v = TfidfVectorizer::fit(config, &corpus()).unwrap();
    assert!(v.term_index("grocery").is_some());
    assert!(v.term_index("walmart").is_none());
}

#[test]
fn test_max_df_drops_ubiquitous_terms() {
    let docs = ["store alpha", "store beta", "store gamma"];
    let v = TfidfVectorizer::fit(VectorizerConfig::default(), &docs).unwrap();
    assert!(v.term_index("store").is_none());
    assert!(v.term_index("alpha").is_some());
}

#[test]
fn test_empty_vocabulary_is_an_error() {
    let docs = ["1234", "#### ..."];
    let result = TfidfVectorizer::fit(VectorizerConfig::default(), &docs);
    assert!(matches!(result, Err(TrainingError::EmptyVocabulary)));
}

#[test]
fn test_empty_corpus_is_an_error() {
    let docs: [&str; 0] = [];
    let result = TfidfVectorizer::fit(VectorizerConfig::default(), &docs);
    assert!(matches!(result, Err(TrainingError::EmptyCorpus)));
}

#[test]
fn test_batch_rows_match_single_transform() {
    let v = fitted();
    let texts = ["Kroger Grocery", "", "Netflix Streaming"];
    let matrix = v.transform_batch(&texts);
    assert_eq!(matrix.rows(), 3);
    for (i, text) in texts.iter().enumerate() {
        assert_eq!(matrix.row(i).unwrap(), v.transform(text));
    }
}

#[test]
fn test_serde_round_trip_preserves_layout() {
    let v = fitted();
    let json = serde_json::to_string(&v).unwrap();
    let back: TfidfVectorizer = serde_json::from_str(&json).unwrap();
    assert_eq!(back.layout_hash(), v.layout_hash());
    assert_eq!(back, v);
}

#[test]
fn test_reject_misaligned_idf() {
    let v = fitted();
    let mut json: serde_json::Value = serde_json::to_value(&v).unwrap();
    json["idf"].as_array_mut().unwrap().pop();
    let result: Result<TfidfVectorizer, _> = serde_json::from_value(json);
    assert!(result.is_err());
}
