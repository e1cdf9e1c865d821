//! Z-score anomaly scorer
//!
//! Each batch member is compared against its category group, or the whole
//! population when the category group is too small. The member itself is
//! left out of its comparison statistics, so one extreme amount cannot
//! inflate the spread it is measured against. A departure from an otherwise
//! flat group (a spike over a fixed recurring charge) scores 1.

use std::cmp::Ordering;
use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::stats::GroupStats;
use crate::constants::{DEFAULT_MIN_GROUP_SIZE, DEFAULT_SCORE_SCALE, DEFAULT_Z_THRESHOLD};
use crate::transaction::AmountRecord;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnomalyConfig {
    /// |z| strictly above this is flagged
    pub z_threshold: f64,
    /// Members a group needs, counting the scored transaction
    pub min_group_size: usize,
    /// |z| at which the score saturates at 1
    pub score_scale: f64,
    /// Cap flags at `max(1, floor(n * fraction))` of the batch
    pub max_flag_fraction: Option<f64>,
}

impl Default for AnomalyConfig {
    fn default() -> Self {
        Self {
            z_threshold: DEFAULT_Z_THRESHOLD,
            min_group_size: DEFAULT_MIN_GROUP_SIZE,
            score_scale: DEFAULT_SCORE_SCALE,
            max_flag_fraction: None,
        }
    }
}

/// One flagged batch member
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnomalyFlag {
    /// Position in the submitted batch
    pub index: usize,
    /// Severity in [0, 1]
    pub score: f64,
    pub reason: String,
}

/// Which population a transaction was compared against
#[derive(Debug, Clone, Copy, PartialEq)]
enum Baseline<'a> {
    Category(&'a str),
    Global,
}

#[derive(Debug, Clone, Default)]
pub struct AnomalyScorer {
    config: AnomalyConfig,
}

impl AnomalyScorer {
    pub fn new(config: AnomalyConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AnomalyConfig {
        &self.config
    }

    /// Flag unusual amounts in `batch`.
    ///
    /// `history` contributes to the group statistics but is never flagged;
    /// flag indices always refer to `batch`. Result is ordered by score
    /// descending, then index.
    pub fn score(&self, batch: &[AmountRecord], history: &[AmountRecord]) -> Vec<AnomalyFlag> {
        let mut global = GroupStats::new();
        let mut groups: HashMap<&str, GroupStats> = HashMap::new();

        for record in batch.iter().chain(history) {
            if !record.amount.is_finite() {
                continue;
            }
            global.push(record.amount);
            if let Some(key) = category_key(record) {
                groups.entry(key).or_default().push(record.amount);
            }
        }

        let min_size = self.config.min_group_size.max(2);
        let mut flags = Vec::new();

        for (index, record) in batch.iter().enumerate() {
            let amount = record.amount;
            if !amount.is_finite() {
                log::debug!("Skipping non-finite amount at index {}", index);
                continue;
            }

            let group = category_key(record)
                .and_then(|key| groups.get(key).map(|stats| (Baseline::Category(key), stats)))
                .filter(|(_, stats)| stats.count() >= min_size)
                .or_else(|| (global.count() >= min_size).then_some((Baseline::Global, &global)));

            let Some((baseline, stats)) = group else {
                continue;
            };
            let Some(others) = stats.without(amount) else {
                continue;
            };

            let z = others.deviation(amount);
            if z.abs() <= self.config.z_threshold {
                continue;
            }

            flags.push(AnomalyFlag {
                index,
                score: (z.abs() / self.config.score_scale).min(1.0),
                reason: describe(amount, z, others.mean(), baseline),
            });
        }

        flags.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.index.cmp(&b.index))
        });

        if let Some(fraction) = self.config.max_flag_fraction {
            let cap = ((batch.len() as f64 * fraction).floor() as usize).max(1);
            flags.truncate(cap);
        }

        flags
    }
}

fn category_key(record: &AmountRecord) -> Option<&str> {
    let key = record.category.trim();
    (!key.is_empty()).then_some(key)
}

fn describe(amount: f64, z: f64, typical: f64, baseline: Baseline<'_>) -> String {
    let direction = if z > 0.0 { "high" } else { "low" };
    match baseline {
        Baseline::Category(category) => format!(
            "Unusually {} amount (${:.2}) for {} category (typical: ${:.2})",
            direction, amount, category, typical
        ),
        Baseline::Global => format!(
            "Unusually {} amount (${:.2}) compared to all transactions (typical: ${:.2})",
            direction, amount, typical
        ),
    }
}
