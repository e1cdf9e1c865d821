//! Running mean / variance (Welford) with single-element removal

use crate::constants::VARIANCE_EPSILON;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GroupStats {
    count: usize,
    mean: f64,
    /// Sum of squared deviations from the mean
    m2: f64,
}

impl GroupStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_values<I: IntoIterator<Item = f64>>(values: I) -> Self {
        let mut stats = Self::new();
        for x in values {
            stats.push(x);
        }
        stats
    }

    pub fn push(&mut self, x: f64) {
        self.count += 1;
        let diff = x - self.mean;
        self.mean += diff / self.count as f64;
        self.m2 += diff * (x - self.mean);
    }

    /// Statistics of the group with one occurrence of `x` taken out.
    /// `x` must be a member of the group.
    pub fn without(&self, x: f64) -> Option<Self> {
        if self.count < 2 {
            return None;
        }
        let count = self.count - 1;
        let mean = (self.mean * self.count as f64 - x) / count as f64;
        let m2 = (self.m2 - (x - self.mean) * (x - mean)).max(0.0);
        Some(Self { count, mean, m2 })
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// Sample variance (n - 1 denominator)
    pub fn variance(&self) -> Option<f64> {
        if self.count < 2 {
            return None;
        }
        Some(self.m2 / (self.count - 1) as f64)
    }

    pub fn std_dev(&self) -> Option<f64> {
        self.variance().map(f64::sqrt)
    }

    /// Standard score of `x`; 0 when the spread is (numerically) zero or undefined
    pub fn z_score(&self, x: f64) -> f64 {
        match self.std_dev() {
            Some(std) if std > VARIANCE_EPSILON => (x - self.mean) / std,
            _ => 0.0,
        }
    }

    /// Like [`z_score`](Self::z_score), except that any departure from a
    /// group with zero spread is infinitely far out.
    pub fn deviation(&self, x: f64) -> f64 {
        let diff = x - self.mean;
        match self.std_dev() {
            Some(std) if std <= VARIANCE_EPSILON && diff.abs() > VARIANCE_EPSILON => {
                f64::INFINITY.copysign(diff)
            }
            _ => self.z_score(x),
        }
    }
}
