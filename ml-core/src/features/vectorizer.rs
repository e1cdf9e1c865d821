//! TF-IDF Vectorizer
//!
//! Fitting picks the vocabulary: terms are filtered by document frequency,
//! ranked by corpus importance (summed term frequency x IDF) and the top
//! `max_features` are kept. Indices follow lexicographic term order so the
//! layout is reproducible from the term set alone.
//!
//! Transforming maps text onto that fixed vocabulary. Unknown terms are
//! ignored, so an empty or fully unknown description yields the zero vector.

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};

use ndarray::{Array1, Array2, ArrayViewMut1};
use serde::{Deserialize, Serialize};

use super::layout::vocabulary_hash;
use super::text::extract_terms;
use super::vector::{FeatureMatrix, FeatureVector};
use crate::constants::{DEFAULT_MAX_DF, DEFAULT_MAX_FEATURES, DEFAULT_MIN_DF, DEFAULT_NGRAM_MAX};
use crate::error::{ModelError, TrainingError, TrainingResult};

/// Vectorizer hyperparameters, stored in the artifact alongside the vocabulary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VectorizerConfig {
    /// Vocabulary size cap
    pub max_features: usize,
    /// Minimum document frequency (absolute count)
    pub min_df: usize,
    /// Maximum document frequency (fraction of documents)
    pub max_df: f64,
    /// Longest n-gram
    pub ngram_max: usize,
    /// L2-normalize each vector
    pub normalize: bool,
}

impl Default for VectorizerConfig {
    fn default() -> Self {
        Self {
            max_features: DEFAULT_MAX_FEATURES,
            min_df: DEFAULT_MIN_DF,
            max_df: DEFAULT_MAX_DF,
            ngram_max: DEFAULT_NGRAM_MAX,
            normalize: true,
        }
    }
}

impl VectorizerConfig {
    pub fn validate(&self) -> TrainingResult<()> {
        if self.max_features == 0 {
            return Err(TrainingError::InvalidConfig("max_features must be at least 1".into()));
        }
        if !(self.max_df > 0.0 && self.max_df <= 1.0) {
            return Err(TrainingError::InvalidConfig(format!(
                "max_df must be in (0, 1], got {}",
                self.max_df
            )));
        }
        if self.ngram_max == 0 {
            return Err(TrainingError::InvalidConfig("ngram_max must be at least 1".into()));
        }
        Ok(())
    }
}

/// Serialized form; converted through `TryFrom` so every loaded vectorizer is checked
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VectorizerParts {
    pub config: VectorizerConfig,
    pub vocabulary: BTreeMap<String, usize>,
    pub idf: Vec<f64>,
}

/// Fitted TF-IDF vectorizer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "VectorizerParts", into = "VectorizerParts")]
pub struct TfidfVectorizer {
    config: VectorizerConfig,
    vocabulary: BTreeMap<String, usize>,
    idf: Array1<f64>,
    layout_hash: u32,
}

impl TryFrom<VectorizerParts> for TfidfVectorizer {
    type Error = ModelError;

    fn try_from(parts: VectorizerParts) -> Result<Self, Self::Error> {
        let VectorizerParts { config, vocabulary, idf } = parts;

        if vocabulary.is_empty() {
            return Err(ModelError::Corrupt("vectorizer vocabulary is empty".into()));
        }
        if idf.len() != vocabulary.len() {
            return Err(ModelError::Corrupt(format!(
                "idf has {} weights for {} terms",
                idf.len(),
                vocabulary.len()
            )));
        }
        // Indices must be 0..n in lexicographic term order
        for (expected, (term, &index)) in vocabulary.iter().enumerate() {
            if index != expected {
                return Err(ModelError::Corrupt(format!(
                    "term '{}' has index {}, expected {}",
                    term, index, expected
                )));
            }
        }
        if let Some(bad) = idf.iter().find(|w| !w.is_finite() || **w <= 0.0) {
            return Err(ModelError::Corrupt(format!("invalid idf weight {}", bad)));
        }

        let layout_hash = vocabulary_hash(vocabulary.keys().map(String::as_str));

        Ok(Self {
            config,
            vocabulary,
            idf: Array1::from(idf),
            layout_hash,
        })
    }
}

impl From<TfidfVectorizer> for VectorizerParts {
    fn from(v: TfidfVectorizer) -> Self {
        Self {
            config: v.config,
            vocabulary: v.vocabulary,
            idf: v.idf.to_vec(),
        }
    }
}

impl TfidfVectorizer {
    /// Learn vocabulary and IDF weights from a corpus
    pub fn fit<S: AsRef<str>>(config: VectorizerConfig, documents: &[S]) -> TrainingResult<Self> {
        config.validate()?;
        if documents.is_empty() {
            return Err(TrainingError::EmptyCorpus);
        }

        let n_docs = documents.len();
        let mut doc_freq: HashMap<String, usize> = HashMap::new();
        let mut term_freq: HashMap<String, usize> = HashMap::new();

        for doc in documents {
            let mut counts: HashMap<String, usize> = HashMap::new();
            for term in extract_terms(doc.as_ref(), config.ngram_max) {
                *counts.entry(term).or_insert(0) += 1;
            }
            for (term, count) in counts {
                *doc_freq.entry(term.clone()).or_insert(0) += 1;
                *term_freq.entry(term).or_insert(0) += count;
            }
        }

        let max_doc_count = config.max_df * n_docs as f64;
        let mut ranked: Vec<(String, f64, f64)> = doc_freq
            .into_iter()
            .filter(|(_, df)| *df >= config.min_df && (*df as f64) <= max_doc_count)
            .map(|(term, df)| {
                let idf = smooth_idf(n_docs, df);
                let importance = term_freq.get(&term).copied().unwrap_or(0) as f64 * idf;
                (term, importance, idf)
            })
            .collect();

        ranked.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.0.cmp(&b.0))
        });
        ranked.truncate(config.max_features);

        if ranked.is_empty() {
            return Err(TrainingError::EmptyVocabulary);
        }

        let by_term: BTreeMap<String, f64> = ranked
            .into_iter()
            .map(|(term, _, idf)| (term, idf))
            .collect();

        let parts = VectorizerParts {
            config,
            idf: by_term.values().copied().collect(),
            vocabulary: by_term
                .into_keys()
                .enumerate()
                .map(|(index, term)| (term, index))
                .collect(),
        };

        log::debug!("Fitted vocabulary of {} terms over {} documents", parts.idf.len(), n_docs);

        Ok(Self::try_from(parts)?)
    }

    /// Map one description onto the vocabulary
    pub fn transform(&self, text: &str) -> FeatureVector {
        let mut vector = FeatureVector::zeros(self.layout_hash, self.len());
        self.fill_row(text, vector.values.view_mut());
        vector
    }

    /// Map a batch of descriptions in one pass; row i corresponds to input i
    pub fn transform_batch<S: AsRef<str>>(&self, texts: &[S]) -> FeatureMatrix {
        let mut values = Array2::zeros((texts.len(), self.len()));
        for (text, row) in texts.iter().zip(values.rows_mut()) {
            self.fill_row(text.as_ref(), row);
        }
        FeatureMatrix {
            layout_hash: self.layout_hash,
            values,
        }
    }

    fn fill_row(&self, text: &str, mut row: ArrayViewMut1<'_, f64>) {
        for term in extract_terms(text, self.config.ngram_max) {
            if let Some(&index) = self.vocabulary.get(&term) {
                row[index] += 1.0;
            }
        }

        row *= &self.idf;

        if self.config.normalize {
            let norm = row.dot(&row).sqrt();
            if norm > 0.0 {
                row /= norm;
            }
        }
    }

    pub fn len(&self) -> usize {
        self.vocabulary.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vocabulary.is_empty()
    }

    pub fn config(&self) -> &VectorizerConfig {
        &self.config
    }

    pub fn layout_hash(&self) -> u32 {
        self.layout_hash
    }

    /// Terms in index order
    pub fn terms(&self) -> impl Iterator<Item = &str> {
        self.vocabulary.keys().map(String::as_str)
    }

    pub fn term_index(&self, term: &str) -> Option<usize> {
        self.vocabulary.get(term).copied()
    }

    pub fn idf(&self, term: &str) -> Option<f64> {
        self.term_index(term).map(|i| self.idf[i])
    }
}

/// ln((1 + n) / (1 + df)) + 1
fn smooth_idf(n_docs: usize, df: usize) -> f64 {
    ((1.0 + n_docs as f64) / (1.0 + df as f64)).ln() + 1.0
}
