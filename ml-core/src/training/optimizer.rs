//! Logistic regression by full-batch gradient descent
//!
//! Minimizes the sample-weighted mean log-loss plus `λ/2·‖w‖²` (intercept
//! unpenalized). The objective is smooth with Lipschitz constant at most
//! `¼·max‖x̃‖² + λ`, where x̃ is a row with a 1 appended for the intercept,
//! so a fixed step of `1/L` decreases it monotonically.

use ndarray::{Array1, Array2, ArrayView1, Zip};

use crate::constants::{DEFAULT_L2_PENALTY, DEFAULT_MAX_ITER, DEFAULT_TOLERANCE};
use crate::model::classifier::sigmoid;

/// Optimizer settings shared by every per-category model
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifierConfig {
    pub max_iter: usize,
    /// Stop once every gradient component is below this
    pub tol: f64,
    pub l2_penalty: f64,
    /// Weight samples by `n / (K · n_c)`
    pub balanced: bool,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            max_iter: DEFAULT_MAX_ITER,
            tol: DEFAULT_TOLERANCE,
            l2_penalty: DEFAULT_L2_PENALTY,
            balanced: true,
        }
    }
}

/// Result of fitting one binary model
#[derive(Debug, Clone)]
pub struct BinaryFit {
    pub weights: Array1<f64>,
    pub intercept: f64,
    pub iterations: usize,
    pub converged: bool,
    pub loss: f64,
}

/// Result of fitting one model per class
#[derive(Debug, Clone)]
pub struct OvrFit {
    /// classes x features
    pub weights: Array2<f64>,
    pub intercepts: Array1<f64>,
    pub iterations: usize,
    pub converged: bool,
    pub mean_loss: f64,
}

/// `n / (K · n_c)` per sample, or all ones
pub fn sample_weights(y: &[usize], n_classes: usize, balanced: bool) -> Array1<f64> {
    if !balanced {
        return Array1::ones(y.len());
    }

    let mut counts = vec![0usize; n_classes];
    for &c in y {
        counts[c] += 1;
    }

    let n = y.len() as f64;
    let k = n_classes as f64;
    y.iter().map(|&c| n / (k * counts[c] as f64)).collect()
}

/// Fit one binary model per class; `y[i]` is the class index of row `i`
pub fn fit_one_vs_rest(
    x: &Array2<f64>,
    y: &[usize],
    n_classes: usize,
    config: &ClassifierConfig,
) -> OvrFit {
    let weights_per_sample = sample_weights(y, n_classes, config.balanced);

    let mut weights = Array2::zeros((n_classes, x.ncols()));
    let mut intercepts = Array1::zeros(n_classes);
    let mut iterations = 0;
    let mut converged = true;
    let mut total_loss = 0.0;

    for class in 0..n_classes {
        let target: Array1<f64> = y.iter().map(|&c| if c == class { 1.0 } else { 0.0 }).collect();
        let fit = fit_binary(x, &target, &weights_per_sample, config);

        log::debug!(
            "Class {} fitted: {} iterations, loss {:.5}, converged={}",
            class,
            fit.iterations,
            fit.loss,
            fit.converged
        );

        weights.row_mut(class).assign(&fit.weights);
        intercepts[class] = fit.intercept;
        iterations = iterations.max(fit.iterations);
        converged &= fit.converged;
        total_loss += fit.loss;
    }

    OvrFit {
        weights,
        intercepts,
        iterations,
        converged,
        mean_loss: total_loss / n_classes.max(1) as f64,
    }
}

/// Fit `P(y=1|x) = σ(w·x + b)`; returns the lowest-objective iterate seen
pub fn fit_binary(
    x: &Array2<f64>,
    y: &Array1<f64>,
    sample_weight: &Array1<f64>,
    config: &ClassifierConfig,
) -> BinaryFit {
    let total_weight = sample_weight.sum();
    let lambda = config.l2_penalty;

    let max_sq_norm = x
        .rows()
        .into_iter()
        .map(|row| row.dot(&row) + 1.0)
        .fold(1.0, f64::max);
    let step = 1.0 / (0.25 * max_sq_norm + lambda);

    let mut w = Array1::<f64>::zeros(x.ncols());
    let mut b = 0.0;

    let mut best = (f64::INFINITY, w.clone(), b);
    let mut iterations = 0;
    let mut converged = false;

    loop {
        let z = x.dot(&w) + b;

        let loss = weighted_log_loss(z.view(), y.view(), sample_weight.view()) / total_weight
            + 0.5 * lambda * w.dot(&w);
        if loss < best.0 {
            best = (loss, w.clone(), b);
        }

        // d(loss)/dz_i = s_i (σ(z_i) - y_i) / Σs
        let mut residual = z.mapv(sigmoid);
        Zip::from(&mut residual)
            .and(y)
            .and(sample_weight)
            .for_each(|r, &yi, &si| *r = si * (*r - yi) / total_weight);

        let grad_w = x.t().dot(&residual) + lambda * &w;
        let grad_b = residual.sum();

        let max_grad = grad_w.iter().fold(grad_b.abs(), |m, g| m.max(g.abs()));
        if max_grad < config.tol {
            converged = true;
            break;
        }
        if iterations >= config.max_iter {
            break;
        }

        w.scaled_add(-step, &grad_w);
        b -= step * grad_b;
        iterations += 1;
    }

    let (loss, weights, intercept) = best;
    BinaryFit {
        weights,
        intercept,
        iterations,
        converged,
        loss,
    }
}

/// Σ s_i (softplus(z_i) - y_i z_i)
fn weighted_log_loss(z: ArrayView1<'_, f64>, y: ArrayView1<'_, f64>, s: ArrayView1<'_, f64>) -> f64 {
    Zip::from(z)
        .and(y)
        .and(s)
        .fold(0.0, |acc, &zi, &yi, &si| acc + si * (softplus(zi) - yi * zi))
}

/// ln(1 + e^z) without overflow
fn softplus(z: f64) -> f64 {
    z.max(0.0) + (-z.abs()).exp().ln_1p()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn config() -> ClassifierConfig {
        ClassifierConfig {
            max_iter: 2000,
            tol: 1e-6,
            l2_penalty: 1e-3,
            balanced: true,
        }
    }

    #[test]
    fn test_softplus_matches_naive() {
        for z in [-5.0, -0.5, 0.0, 0.5, 5.0] {
            let naive = (1.0 + f64::exp(z)).ln();
            assert!((softplus(z) - naive).abs() < 1e-12);
        }
        assert!(softplus(1000.0).is_finite());
    }

    #[test]
    fn test_balanced_weights() {
        let w = sample_weights(&[0, 0, 0, 1], 2, true);
        // 4 / (2 * 3) and 4 / (2 * 1)
        assert!((w[0] - 4.0 / 6.0).abs() < 1e-12);
        assert!((w[3] - 2.0).abs() < 1e-12);
        // each class carries equal total weight
        assert!((w[0] * 3.0 - w[3]).abs() < 1e-12);

        assert_eq!(sample_weights(&[0, 1], 2, false), array![1.0, 1.0]);
    }

    #[test]
    fn test_separable_binary_problem() {
        let x = array![[1.0, 0.0], [0.9, 0.1], [0.0, 1.0], [0.1, 0.9]];
        let y = array![1.0, 1.0, 0.0, 0.0];
        let s = Array1::ones(4);

        let fit = fit_binary(&x, &y, &s, &config());
        assert!(fit.weights[0] > fit.weights[1]);

        let z = x.dot(&fit.weights) + fit.intercept;
        assert!(sigmoid(z[0]) > 0.5);
        assert!(sigmoid(z[2]) < 0.5);
    }

    #[test]
    fn test_loss_decreases_from_start() {
        let x = array![[1.0, 0.0], [0.0, 1.0]];
        let y = array![1.0, 0.0];
        let s = Array1::ones(2);

        let fit = fit_binary(&x, &y, &s, &config());
        // objective at w = 0, b = 0 is ln 2
        assert!(fit.loss < std::f64::consts::LN_2);
    }

    #[test]
    fn test_iteration_cap_is_not_fatal() {
        let x = array![[1.0, 0.0], [0.0, 1.0]];
        let y = array![1.0, 0.0];
        let s = Array1::ones(2);
        let capped = ClassifierConfig {
            max_iter: 3,
            tol: 1e-12,
            ..config()
        };

        let fit = fit_binary(&x, &y, &s, &capped);
        assert!(!fit.converged);
        assert_eq!(fit.iterations, 3);
        assert!(fit.weights.iter().all(|w| w.is_finite()));
    }

    #[test]
    fn test_one_vs_rest_shapes() {
        let x = array![[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]];
        let fit = fit_one_vs_rest(&x, &[0, 1, 2], 3, &config());
        assert_eq!(fit.weights.dim(), (3, 3));
        assert_eq!(fit.intercepts.len(), 3);
        for class in 0..3 {
            // each class model leans on its own feature
            let row = fit.weights.row(class);
            let own = row[class];
            assert!(row.iter().enumerate().all(|(j, &w)| j == class || w < own));
        }
    }
}
