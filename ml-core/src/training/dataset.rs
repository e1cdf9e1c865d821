//! Training corpus loading and splitting
//!
//! CSV columns: `date, description, amount, type, category`. Only
//! `description` and `category` are read; other columns may be absent.

use std::collections::BTreeMap;
use std::io;
use std::path::Path;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::Deserialize;

use crate::category::Category;
use crate::error::{TrainingError, TrainingResult};
use crate::transaction::TrainingExample;

#[derive(Debug, Deserialize)]
struct CsvRecord {
    description: String,
    category: String,
}

pub fn load_csv(path: &Path) -> TrainingResult<Vec<TrainingExample>> {
    let reader = csv::Reader::from_path(path)?;
    read_examples(reader)
}

pub fn from_reader<R: io::Read>(reader: R) -> TrainingResult<Vec<TrainingExample>> {
    read_examples(csv::Reader::from_reader(reader))
}

fn read_examples<R: io::Read>(mut reader: csv::Reader<R>) -> TrainingResult<Vec<TrainingExample>> {
    let mut examples = Vec::new();

    for (i, row) in reader.deserialize::<CsvRecord>().enumerate() {
        let record = row?;
        let description = record.description.trim();
        if description.is_empty() {
            log::warn!("Skipping record {} with empty description", i + 1);
            continue;
        }

        let category: Category = record.category.parse().map_err(|_| TrainingError::UnknownCategory {
            label: record.category.clone(),
            record: i + 1,
        })?;

        examples.push(TrainingExample::new(description, category));
    }

    Ok(examples)
}

/// Count examples per category and enforce the corpus minimums
pub fn validate_corpus(
    examples: &[TrainingExample],
    min_per_category: usize,
) -> TrainingResult<BTreeMap<Category, usize>> {
    if examples.is_empty() {
        return Err(TrainingError::EmptyCorpus);
    }

    let mut counts = BTreeMap::new();
    for example in examples {
        *counts.entry(example.category).or_insert(0) += 1;
    }

    if counts.len() < 2 {
        return Err(TrainingError::TooFewCategories(counts.len()));
    }

    if let Some((category, &count)) = counts.iter().find(|(_, &count)| count < min_per_category) {
        return Err(TrainingError::InsufficientExamples {
            category: category.to_string(),
            count,
            required: min_per_category,
        });
    }

    Ok(counts)
}

/// Train/test partition
#[derive(Debug, Clone)]
pub struct Split {
    pub train: Vec<TrainingExample>,
    pub test: Vec<TrainingExample>,
}

/// Per-category shuffled split with `round(n_c · test_size)` (at least one)
/// test examples per category.
///
/// Returns `None` when a category is too small to appear on both sides or
/// `test_size` is outside (0, 1).
pub fn stratified_split(examples: &[TrainingExample], test_size: f64, seed: u64) -> Option<Split> {
    if !(test_size > 0.0 && test_size < 1.0) {
        return None;
    }

    let mut by_category: BTreeMap<Category, Vec<&TrainingExample>> = BTreeMap::new();
    for example in examples {
        by_category.entry(example.category).or_default().push(example);
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let mut train = Vec::new();
    let mut test = Vec::new();

    for (category, mut group) in by_category {
        let n_test = ((group.len() as f64 * test_size).round() as usize).max(1);
        if n_test >= group.len() {
            log::debug!("Category {} has {} examples, too few to stratify", category, group.len());
            return None;
        }

        group.shuffle(&mut rng);
        let (held_out, kept) = group.split_at(n_test);
        test.extend(held_out.iter().map(|e| (*e).clone()));
        train.extend(kept.iter().map(|e| (*e).clone()));
    }

    Some(Split { train, test })
}
