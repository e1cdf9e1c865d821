//! One-vs-rest linear classifier
//!
//! One logistic model per category. Each yields `sigmoid(w_k . x + b_k)`;
//! the per-category probabilities are normalized to sum to 1 and the
//! largest one is the prediction.

use ndarray::{Array1, Array2, Axis};
use serde::{Deserialize, Serialize};

use crate::category::Category;
use crate::error::{ModelError, ModelResult};
use crate::features::{validate_layout, FeatureMatrix, FeatureVector};

/// Probability assigned to one category
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CategoryProbability {
    pub category: Category,
    pub probability: f64,
}

/// Classifier output for one description
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub category: Category,
    /// Probability of `category`, in [0, 1]
    pub confidence: f64,
    /// Full distribution in label order; sums to 1
    pub distribution: Vec<CategoryProbability>,
}

impl Prediction {
    pub fn is_confident(&self, threshold: f64) -> bool {
        self.confidence >= threshold
    }
}

/// Serialized form of [`LinearClassifier`]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifierParts {
    pub labels: Vec<Category>,
    pub weights: Vec<Vec<f64>>,
    pub intercepts: Vec<f64>,
    pub layout_hash: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ClassifierParts", into = "ClassifierParts")]
pub struct LinearClassifier {
    labels: Vec<Category>,
    /// labels x features
    weights: Array2<f64>,
    intercepts: Array1<f64>,
    layout_hash: u32,
}

impl LinearClassifier {
    pub fn new(
        labels: Vec<Category>,
        weights: Array2<f64>,
        intercepts: Array1<f64>,
        layout_hash: u32,
    ) -> ModelResult<Self> {
        if labels.len() < 2 {
            return Err(ModelError::Corrupt(format!(
                "classifier needs at least 2 labels, got {}",
                labels.len()
            )));
        }
        let mut unique = labels.clone();
        unique.sort();
        unique.dedup();
        if unique.len() != labels.len() {
            return Err(ModelError::Corrupt("duplicate classifier labels".into()));
        }
        if weights.nrows() != labels.len() || intercepts.len() != labels.len() {
            return Err(ModelError::Corrupt(format!(
                "{} labels but {} weight rows and {} intercepts",
                labels.len(),
                weights.nrows(),
                intercepts.len()
            )));
        }
        if weights.ncols() == 0 {
            return Err(ModelError::Corrupt("classifier has no features".into()));
        }
        if weights.iter().chain(intercepts.iter()).any(|v| !v.is_finite()) {
            return Err(ModelError::Corrupt("non-finite classifier weight".into()));
        }

        Ok(Self {
            labels,
            weights,
            intercepts,
            layout_hash,
        })
    }

    pub fn labels(&self) -> &[Category] {
        &self.labels
    }

    pub fn n_features(&self) -> usize {
        self.weights.ncols()
    }

    pub fn layout_hash(&self) -> u32 {
        self.layout_hash
    }

    pub fn weights(&self) -> &Array2<f64> {
        &self.weights
    }

    pub fn intercepts(&self) -> &Array1<f64> {
        &self.intercepts
    }

    fn check(&self, layout_hash: u32, width: usize) -> ModelResult<()> {
        validate_layout(self.layout_hash, layout_hash)?;
        if width != self.n_features() {
            return Err(ModelError::DimensionMismatch {
                expected: self.n_features(),
                actual: width,
            });
        }
        Ok(())
    }

    /// Raw per-category scores, one row per input
    pub fn decision_function(&self, x: &FeatureMatrix) -> ModelResult<Array2<f64>> {
        self.check(x.layout_hash, x.values.ncols())?;
        Ok(self.scores(&x.values))
    }

    /// Normalized per-category probabilities, one row per input
    pub fn predict_proba(&self, x: &FeatureMatrix) -> ModelResult<Array2<f64>> {
        self.check(x.layout_hash, x.values.ncols())?;
        Ok(self.probabilities(&x.values))
    }

    pub fn predict(&self, x: &FeatureVector) -> ModelResult<Prediction> {
        let matrix = FeatureMatrix::from(x.clone());
        let mut predictions = self.predict_batch(&matrix)?;
        predictions
            .pop()
            .ok_or_else(|| ModelError::Corrupt("empty prediction batch".into()))
    }

    /// One prediction per row, in row order
    pub fn predict_batch(&self, x: &FeatureMatrix) -> ModelResult<Vec<Prediction>> {
        self.check(x.layout_hash, x.values.ncols())?;
        Ok(self.predict_rows(&x.values))
    }

    /// Caller guarantees the matrix was built for this classifier's layout
    pub(crate) fn predict_rows(&self, x: &Array2<f64>) -> Vec<Prediction> {
        self.probabilities(x)
            .rows()
            .into_iter()
            .map(|row| {
                let (best, confidence) = row
                    .iter()
                    .copied()
                    .enumerate()
                    .fold((0, f64::NEG_INFINITY), |acc, (i, p)| if p > acc.1 { (i, p) } else { acc });

                Prediction {
                    category: self.labels[best],
                    confidence,
                    distribution: self
                        .labels
                        .iter()
                        .zip(row.iter())
                        .map(|(&category, &probability)| CategoryProbability { category, probability })
                        .collect(),
                }
            })
            .collect()
    }

    fn scores(&self, x: &Array2<f64>) -> Array2<f64> {
        x.dot(&self.weights.t()) + &self.intercepts
    }

    fn probabilities(&self, x: &Array2<f64>) -> Array2<f64> {
        let mut probs = self.scores(x).mapv_into(sigmoid);
        let uniform = 1.0 / self.labels.len() as f64;

        for mut row in probs.axis_iter_mut(Axis(0)) {
            let total = row.sum();
            if total > 0.0 {
                row /= total;
            } else {
                // every sigmoid underflowed
                row.fill(uniform);
            }
        }
        probs
    }
}

impl TryFrom<ClassifierParts> for LinearClassifier {
    type Error = ModelError;

    fn try_from(parts: ClassifierParts) -> Result<Self, Self::Error> {
        let rows = parts.weights.len();
        let cols = parts.weights.first().map(Vec::len).unwrap_or(0);
        if parts.weights.iter().any(|r| r.len() != cols) {
            return Err(ModelError::Corrupt("ragged classifier weights".into()));
        }
        let flat: Vec<f64> = parts.weights.into_iter().flatten().collect();
        let weights = Array2::from_shape_vec((rows, cols), flat)
            .map_err(|e| ModelError::Corrupt(format!("classifier weights: {}", e)))?;

        Self::new(parts.labels, weights, Array1::from(parts.intercepts), parts.layout_hash)
    }
}

impl From<LinearClassifier> for ClassifierParts {
    fn from(c: LinearClassifier) -> Self {
        Self {
            weights: c.weights.rows().into_iter().map(|r| r.to_vec()).collect(),
            intercepts: c.intercepts.to_vec(),
            labels: c.labels,
            layout_hash: c.layout_hash,
        }
    }
}

/// Logistic function, stable for large |z|
pub(crate) fn sigmoid(z: f64) -> f64 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1.0 + e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn toy() -> LinearClassifier {
        LinearClassifier::new(
            vec![Category::Food, Category::Bills, Category::Travel],
            array![[4.0, 0.0], [0.0, 4.0], [-1.0, -1.0]],
            array![-1.0, -1.0, 0.0],
            99,
        )
        .unwrap()
    }

    #[test]
    fn test_sigmoid_bounds() {
        assert!((sigmoid(0.0) - 0.5).abs() < 1e-12);
        assert!(sigmoid(800.0) <= 1.0);
        assert!(sigmoid(-800.0) >= 0.0);
        assert!(sigmoid(3.0) > sigmoid(2.0));
    }

    #[test]
    fn test_probabilities_sum_to_one() {
        let c = toy();
        let x = FeatureMatrix {
            layout_hash: 99,
            values: array![[1.0, 0.0], [0.0, 1.0], [0.0, 0.0]],
        };
        let probs = c.predict_proba(&x).unwrap();
        for row in probs.rows() {
            assert!((row.sum() - 1.0).abs() < 1e-9);
            assert!(row.iter().all(|&p| (0.0..=1.0).contains(&p)));
        }
    }

    #[test]
    fn test_argmax_prediction() {
        let c = toy();
        let x = FeatureMatrix {
            layout_hash: 99,
            values: array![[1.0, 0.0], [0.0, 1.0]],
        };
        let predictions = c.predict_batch(&x).unwrap();
        assert_eq!(predictions[0].category, Category::Food);
        assert_eq!(predictions[1].category, Category::Bills);
        let total: f64 = predictions[0].distribution.iter().map(|p| p.probability).sum();
        assert!((total - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_vector_falls_back_to_intercepts() {
        let c = toy();
        let v = FeatureVector::zeros(99, 2);
        let prediction = c.predict(&v).unwrap();
        // Travel has the largest intercept
        assert_eq!(prediction.category, Category::Travel);
        assert!(prediction.confidence < 0.5);
    }

    #[test]
    fn test_reject_foreign_layout() {
        let c = toy();
        let v = FeatureVector::zeros(100, 2);
        assert!(matches!(c.predict(&v), Err(ModelError::LayoutMismatch { .. })));
    }

    #[test]
    fn test_reject_wrong_width() {
        let c = toy();
        let v = FeatureVector::zeros(99, 3);
        assert!(matches!(c.predict(&v), Err(ModelError::DimensionMismatch { expected: 2, actual: 3 })));
    }

    #[test]
    fn test_reject_malformed_parts() {
        let parts = ClassifierParts {
            labels: vec![Category::Food, Category::Bills],
            weights: vec![vec![1.0, 2.0], vec![1.0]],
            intercepts: vec![0.0, 0.0],
            layout_hash: 1,
        };
        assert!(LinearClassifier::try_from(parts).is_err());

        let parts = ClassifierParts {
            labels: vec![Category::Food, Category::Food],
            weights: vec![vec![1.0], vec![1.0]],
            intercepts: vec![0.0, 0.0],
            layout_hash: 1,
        };
        assert!(LinearClassifier::try_from(parts).is_err());
    }

    #[test]
    fn test_serde_round_trip() {
        let c = toy();
        let json = serde_json::to_string(&c).unwrap();
        let back: LinearClassifier = serde_json::from_str(&json).unwrap();
        assert_eq!(back, c);
    }
}
