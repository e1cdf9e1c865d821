//! Feature Vector - TF-IDF representation of one description
//!
//! Length always equals the vocabulary size of the vectorizer that built it.
//! The layout hash travels with the values so a classifier can refuse
//! vectors from a different vocabulary.

use ndarray::{Array1, Array2, ArrayView1, Axis};

/// Non-negative TF-IDF weights over a fitted vocabulary
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector {
    /// Hash of the vocabulary layout the values are ordered by
    pub layout_hash: u32,
    /// One weight per vocabulary term
    pub values: Array1<f64>,
}

impl FeatureVector {
    /// Zeroed vector of the given width
    pub fn zeros(layout_hash: u32, len: usize) -> Self {
        Self {
            layout_hash,
            values: Array1::zeros(len),
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// True when no vocabulary term was present
    pub fn is_zero(&self) -> bool {
        self.values.iter().all(|&v| v == 0.0)
    }

    pub fn view(&self) -> ArrayView1<'_, f64> {
        self.values.view()
    }

    /// Number of non-zero entries
    pub fn nnz(&self) -> usize {
        self.values.iter().filter(|&&v| v != 0.0).count()
    }
}

/// Row-per-description matrix produced by a batch transform
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureMatrix {
    pub layout_hash: u32,
    pub values: Array2<f64>,
}

impl FeatureMatrix {
    pub fn rows(&self) -> usize {
        self.values.nrows()
    }

    /// Copy row `i` out as a standalone vector
    pub fn row(&self, i: usize) -> Option<FeatureVector> {
        if i >= self.rows() {
            return None;
        }
        Some(FeatureVector {
            layout_hash: self.layout_hash,
            values: self.values.row(i).to_owned(),
        })
    }
}

impl From<FeatureVector> for FeatureMatrix {
    fn from(vector: FeatureVector) -> Self {
        Self {
            layout_hash: vector.layout_hash,
            values: vector.values.insert_axis(Axis(0)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_zeros() {
        let v = FeatureVector::zeros(42, 8);
        assert_eq!(v.len(), 8);
        assert!(v.is_zero());
        assert_eq!(v.nnz(), 0);
    }

    #[test]
    fn test_matrix_from_vector() {
        let v = FeatureVector {
            layout_hash: 3,
            values: array![0.0, 0.5, 0.5],
        };
        let m: FeatureMatrix = v.clone().into();
        assert_eq!(m.rows(), 1);
        assert_eq!(m.row(0), Some(v));
        assert_eq!(m.row(1), None);
    }
}
