//! Training Module - corpus to model artifact
//!
//! # Pipeline
//! 1. Validate the corpus (two or more categories, minimum examples each)
//! 2. Stratified train/test split; falls back to the full corpus when a
//!    category is too small to split
//! 3. Fit the TF-IDF vectorizer on the training descriptions
//! 4. Fit one balanced logistic model per category
//! 5. Evaluate on the held-out split and bundle everything into a `ModelArtifact`

pub mod dataset;
pub mod evaluate;
pub mod optimizer;
#[cfg(test)]
mod tests;

use crate::category::Category;
use crate::constants::{DEFAULT_MIN_EXAMPLES_PER_CATEGORY, DEFAULT_RANDOM_SEED, DEFAULT_TEST_SIZE};
use crate::error::{TrainingError, TrainingResult};
use crate::features::{TfidfVectorizer, VectorizerConfig};
use crate::model::{Categorizer, LinearClassifier, ModelArtifact, TrainingSummary};
use crate::transaction::TrainingExample;

pub use dataset::{from_reader, load_csv, stratified_split, validate_corpus, Split};
pub use evaluate::{ClassMetrics, EvaluationReport};
pub use optimizer::ClassifierConfig;

#[derive(Debug, Clone, PartialEq)]
pub struct TrainingConfig {
    pub vectorizer: VectorizerConfig,
    pub classifier: ClassifierConfig,
    /// Held-out fraction; 0 trains on everything without evaluation
    pub test_size: f64,
    pub seed: u64,
    pub min_examples_per_category: usize,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            vectorizer: VectorizerConfig::default(),
            classifier: ClassifierConfig::default(),
            test_size: DEFAULT_TEST_SIZE,
            seed: DEFAULT_RANDOM_SEED,
            min_examples_per_category: DEFAULT_MIN_EXAMPLES_PER_CATEGORY,
        }
    }
}

impl TrainingConfig {
    pub fn validate(&self) -> TrainingResult<()> {
        self.vectorizer.validate()?;
        if !(0.0..1.0).contains(&self.test_size) {
            return Err(TrainingError::InvalidConfig(format!(
                "test_size must be in [0, 1), got {}",
                self.test_size
            )));
        }
        if !(self.classifier.l2_penalty >= 0.0 && self.classifier.l2_penalty.is_finite()) {
            return Err(TrainingError::InvalidConfig("l2_penalty must be finite and >= 0".into()));
        }
        if !(self.classifier.tol > 0.0) {
            return Err(TrainingError::InvalidConfig("tol must be > 0".into()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct TrainingOutcome {
    pub artifact: ModelArtifact,
    /// On the held-out split, or on the training set when no split was made
    pub evaluation: EvaluationReport,
}

pub struct Trainer {
    config: TrainingConfig,
}

impl Trainer {
    pub fn new(config: TrainingConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TrainingConfig {
        &self.config
    }

    /// Split, fit and evaluate
    pub fn train(&self, examples: &[TrainingExample]) -> TrainingResult<TrainingOutcome> {
        self.config.validate()?;
        let counts = validate_corpus(examples, self.config.min_examples_per_category)?;
        log::info!(
            "Training on {} examples across {} categories",
            examples.len(),
            counts.len()
        );

        let split = if self.config.test_size > 0.0 {
            let split = stratified_split(examples, self.config.test_size, self.config.seed);
            if split.is_none() {
                log::warn!("Stratified split not possible, training and evaluating on the full corpus");
            }
            split
        } else {
            None
        };

        let (train, test) = match &split {
            Some(s) => (s.train.as_slice(), s.test.as_slice()),
            None => (examples, &[][..]),
        };

        let mut artifact = self.fit_examples(train, test.len())?;
        let categorizer = Categorizer::new(artifact.clone())?;

        // Without a split the training set doubles as the evaluation set
        let eval_set = if test.is_empty() { train } else { test };
        let evaluation = evaluate_categorizer(&categorizer, eval_set);
        log::info!("Evaluation accuracy {:.3} on {} examples", evaluation.accuracy, eval_set.len());

        if !test.is_empty() {
            artifact.training.holdout_accuracy = Some(evaluation.accuracy);
        }

        Ok(TrainingOutcome { artifact, evaluation })
    }

    /// Fit on every example, no evaluation
    pub fn fit(&self, examples: &[TrainingExample]) -> TrainingResult<ModelArtifact> {
        self.config.validate()?;
        validate_corpus(examples, self.config.min_examples_per_category)?;
        self.fit_examples(examples, 0)
    }

    fn fit_examples(&self, examples: &[TrainingExample], test_samples: usize) -> TrainingResult<ModelArtifact> {
        let descriptions: Vec<&str> = examples.iter().map(|e| e.description.as_str()).collect();
        let vectorizer = TfidfVectorizer::fit(self.config.vectorizer.clone(), &descriptions)?;
        let features = vectorizer.transform_batch(&descriptions);

        let mut labels: Vec<Category> = examples.iter().map(|e| e.category).collect();
        labels.sort();
        labels.dedup();
        if labels.len() < 2 {
            return Err(TrainingError::TooFewCategories(labels.len()));
        }

        let y: Vec<usize> = examples
            .iter()
            .map(|e| labels.iter().position(|&l| l == e.category).unwrap_or(0))
            .collect();

        log::info!(
            "Fitting {} category models over {} features",
            labels.len(),
            vectorizer.len()
        );
        let fit = optimizer::fit_one_vs_rest(&features.values, &y, labels.len(), &self.config.classifier);
        if !fit.converged {
            log::warn!(
                "Classifier did not converge within {} iterations, keeping best weights",
                self.config.classifier.max_iter
            );
        }

        let classifier = LinearClassifier::new(labels, fit.weights, fit.intercepts, vectorizer.layout_hash())?;
        let summary = TrainingSummary {
            train_samples: examples.len(),
            test_samples,
            iterations: fit.iterations,
            converged: fit.converged,
            final_loss: fit.mean_loss,
            holdout_accuracy: None,
        };

        Ok(ModelArtifact::new(vectorizer, classifier, summary)?)
    }
}

/// Score a labelled set with a loaded model
pub fn evaluate_categorizer(categorizer: &Categorizer, examples: &[TrainingExample]) -> EvaluationReport {
    let descriptions: Vec<&str> = examples.iter().map(|e| e.description.as_str()).collect();
    let predicted: Vec<Category> = categorizer
        .predict_batch(&descriptions)
        .into_iter()
        .map(|p| p.category)
        .collect();
    let actual: Vec<Category> = examples.iter().map(|e| e.category).collect();

    EvaluationReport::compute(categorizer.categories(), &actual, &predicted)
}
