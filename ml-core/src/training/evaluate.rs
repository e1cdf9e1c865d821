//! Held-out evaluation: accuracy, per-category precision/recall/F1, confusion matrix

use std::fmt;

use serde::Serialize;

use crate::category::Category;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassMetrics {
    pub category: Category,
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    /// True examples of this category
    pub support: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvaluationReport {
    pub accuracy: f64,
    pub classes: Vec<ClassMetrics>,
    /// `confusion[actual][predicted]`, indexed like `labels`
    pub confusion: Vec<Vec<usize>>,
    pub labels: Vec<Category>,
}

impl EvaluationReport {
    /// Compare predictions against truth; categories outside `labels` are ignored
    pub fn compute(labels: &[Category], actual: &[Category], predicted: &[Category]) -> Self {
        let k = labels.len();
        let index = |c: &Category| labels.iter().position(|l| l == c);

        let mut confusion = vec![vec![0usize; k]; k];
        let mut correct = 0usize;
        let mut total = 0usize;

        for (a, p) in actual.iter().zip(predicted) {
            total += 1;
            if a == p {
                correct += 1;
            }
            if let (Some(ai), Some(pi)) = (index(a), index(p)) {
                confusion[ai][pi] += 1;
            }
        }

        let classes = labels
            .iter()
            .enumerate()
            .map(|(i, &category)| {
                let tp = confusion[i][i] as f64;
                let predicted_as: usize = confusion.iter().map(|row| row[i]).sum();
                let support: usize = confusion[i].iter().sum();

                let precision = ratio(tp, predicted_as as f64);
                let recall = ratio(tp, support as f64);
                let f1 = ratio(2.0 * precision * recall, precision + recall);

                ClassMetrics {
                    category,
                    precision,
                    recall,
                    f1,
                    support,
                }
            })
            .collect();

        Self {
            accuracy: ratio(correct as f64, total as f64),
            classes,
            confusion,
            labels: labels.to_vec(),
        }
    }

    /// Unweighted mean F1 over categories with support
    pub fn macro_f1(&self) -> f64 {
        let supported: Vec<f64> = self.classes.iter().filter(|c| c.support > 0).map(|c| c.f1).collect();
        ratio(supported.iter().sum(), supported.len() as f64)
    }
}

fn ratio(num: f64, den: f64) -> f64 {
    if den > 0.0 {
        num / den
    } else {
        0.0
    }
}

impl fmt::Display for EvaluationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:<16}{:>10}{:>10}{:>10}{:>10}", "category", "precision", "recall", "f1", "support")?;
        for c in &self.classes {
            writeln!(
                f,
                "{:<16}{:>10.3}{:>10.3}{:>10.3}{:>10}",
                c.category.as_str(),
                c.precision,
                c.recall,
                c.f1,
                c.support
            )?;
        }
        writeln!(f)?;
        writeln!(f, "accuracy {:.3}, macro f1 {:.3}", self.accuracy, self.macro_f1())
    }
}
