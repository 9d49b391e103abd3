//! Multinomial logistic regression over sparse feature vectors.

use std::collections::BTreeSet;

use log::debug;

use crate::config::ClassifierConfig;
use crate::error::{IntentBotError, Result};
use crate::ml::intent_classifier::types::SparseVector;

/// Loss plateaus shorter than this many steps do not stop fitting.
const STALL_ROUNDS: usize = 5;

fn fill_scores(weights: &[Vec<f64>], intercepts: &[f64], sample: &SparseVector, out: &mut [f64]) {
    for ((score, weights), intercept) in out.iter_mut().zip(weights).zip(intercepts) {
        *score = sample.dot(weights) + intercept;
    }
}

/// Multinomial (softmax) logistic regression with an L2 penalty.
///
/// Fitting minimises `C * Σ cross_entropy + ½‖W‖²` (intercepts are not
/// penalised) with accelerated full-batch gradient descent and adaptive
/// momentum restart, starting from zero weights, so the fitted model is
/// fully deterministic. It stops once the largest gradient component falls
/// below the tolerance, or once the relative change in loss has stayed below
/// it for several consecutive steps. Classes are kept in sorted order
/// and ties in the decision score resolve to the first class.
#[derive(Debug, Clone)]
pub struct LogisticRegression {
    /// Inverse regularization strength.
    regularization: f64,
    /// Upper bound on gradient steps.
    max_iterations: usize,
    /// Stop once the largest gradient component falls below this.
    tolerance: f64,
    /// Gradient step size.
    learning_rate: f64,
    /// Sorted class labels.
    classes: Vec<String>,
    /// Weights per class, dense over the feature space.
    weights: Vec<Vec<f64>>,
    /// Intercept per class.
    intercepts: Vec<f64>,
    /// Gradient steps taken by the last fit.
    iterations: usize,
}

impl Default for LogisticRegression {
    fn default() -> Self {
        Self::from_config(&ClassifierConfig::default())
    }
}

impl LogisticRegression {
    /// Create an unfitted model using the solver settings of `config`.
    pub fn from_config(config: &ClassifierConfig) -> Self {
        Self {
            regularization: config.regularization,
            max_iterations: config.max_iterations,
            tolerance: config.tolerance,
            learning_rate: config.learning_rate,
            classes: Vec::new(),
            weights: Vec::new(),
            intercepts: Vec::new(),
            iterations: 0,
        }
    }

    /// Fit the model on `samples` labelled by `labels` in a space of
    /// `n_features` dimensions.
    pub fn fit(
        &mut self,
        samples: &[SparseVector],
        labels: &[String],
        n_features: usize,
    ) -> Result<()> {
        if samples.is_empty() {
            return Err(IntentBotError::classification(
                "Training samples cannot be empty",
            ));
        }
        if samples.len() != labels.len() {
            return Err(IntentBotError::classification(format!(
                "Got {} samples but {} labels",
                samples.len(),
                labels.len()
            )));
        }

        let classes: Vec<String> = labels
            .iter()
            .cloned()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let targets: Vec<usize> = labels
            .iter()
            .map(|label| classes.binary_search(label).unwrap_or(0))
            .collect();

        let n_classes = classes.len();
        self.classes = classes;
        self.weights = vec![vec![0.0; n_features]; n_classes];
        self.intercepts = vec![0.0; n_classes];
        self.iterations = 0;

        // A lone class is the only possible answer; nothing to fit.
        if n_classes == 1 {
            return Ok(());
        }

        let n = samples.len() as f64;
        let penalty = 1.0 / (self.regularization * n);
        // Samples are L2-normalised, so the data term has a 1-Lipschitz
        // gradient (features plus intercept); longer steps can diverge.
        let step = self.learning_rate.min(1.0 / (1.0 + penalty));

        let mut lookahead = self.weights.clone();
        let mut lookahead_intercepts = self.intercepts.clone();
        let mut previous = self.weights.clone();
        let mut previous_intercepts = self.intercepts.clone();
        let mut weight_grad = vec![vec![0.0; n_features]; n_classes];
        let mut intercept_grad = vec![0.0; n_classes];
        let mut scores = vec![0.0; n_classes];

        let mut momentum = 1.0_f64;
        let mut previous_loss: Option<f64> = None;
        let mut stalled = 0;
        let mut loss = 0.0;

        for iteration in 0..self.max_iterations {
            // Data term at the look-ahead point, touching only non-zero features.
            loss = 0.0;
            for (sample, &target) in samples.iter().zip(&targets) {
                fill_scores(&lookahead, &lookahead_intercepts, sample, &mut scores);
                let max = scores.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
                let total: f64 = scores.iter().map(|s| (s - max).exp()).sum();
                loss += (max + total.ln() - scores[target]) / n;

                for (class, &score) in scores.iter().enumerate() {
                    let probability = (score - max).exp() / total;
                    let residual =
                        (probability - if class == target { 1.0 } else { 0.0 }) / n;
                    intercept_grad[class] += residual;
                    for &(idx, value) in sample.entries() {
                        if idx < n_features {
                            weight_grad[class][idx] += residual * value;
                        }
                    }
                }
            }

            // Penalty, gradient step and restart test in a single dense pass.
            let mut largest: f64 = 0.0;
            let mut progress = 0.0;
            let mut squared_norm = 0.0;
            for class in 0..n_classes {
                for idx in 0..n_features {
                    let y = lookahead[class][idx];
                    let grad = weight_grad[class][idx] + penalty * y;
                    let next = y - step * grad;
                    largest = largest.max(grad.abs());
                    progress += grad * (next - self.weights[class][idx]);
                    squared_norm += y * y;
                    previous[class][idx] = self.weights[class][idx];
                    self.weights[class][idx] = next;
                    weight_grad[class][idx] = 0.0;
                }

                let grad = intercept_grad[class];
                let next = lookahead_intercepts[class] - step * grad;
                largest = largest.max(grad.abs());
                progress += grad * (next - self.intercepts[class]);
                previous_intercepts[class] = self.intercepts[class];
                self.intercepts[class] = next;
                intercept_grad[class] = 0.0;
            }
            loss += 0.5 * penalty * squared_norm;
            self.iterations = iteration + 1;

            if largest < self.tolerance {
                break;
            }

            stalled = match previous_loss {
                Some(prev)
                    if (prev - loss).abs()
                        <= self.tolerance * prev.abs().max(loss.abs()).max(1.0) =>
                {
                    stalled + 1
                }
                _ => 0,
            };
            if stalled >= STALL_ROUNDS {
                break;
            }
            previous_loss = Some(loss);

            // Momentum restarts whenever the step moved against the gradient.
            if progress > 0.0 {
                momentum = 1.0;
            }
            let next_momentum = (1.0 + (1.0 + 4.0 * momentum * momentum).sqrt()) / 2.0;
            let beta = (momentum - 1.0) / next_momentum;
            momentum = next_momentum;

            for class in 0..n_classes {
                for idx in 0..n_features {
                    let w = self.weights[class][idx];
                    lookahead[class][idx] = w + beta * (w - previous[class][idx]);
                }
                let b = self.intercepts[class];
                lookahead_intercepts[class] = b + beta * (b - previous_intercepts[class]);
            }
        }

        debug!(
            "logistic regression fitted: {} classes, {} features, {} iterations, loss {:.6}",
            n_classes, n_features, self.iterations, loss
        );

        Ok(())
    }

    /// Raw decision score per class.
    pub fn decision_function(&self, sample: &SparseVector) -> Vec<f64> {
        let mut scores = vec![0.0; self.classes.len()];
        fill_scores(&self.weights, &self.intercepts, sample, &mut scores);
        scores
    }

    /// Class probabilities (softmax of the decision scores), in class order.
    pub fn probabilities(&self, sample: &SparseVector) -> Vec<f64> {
        let scores = self.decision_function(sample);
        let max = scores.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        let exps: Vec<f64> = scores.iter().map(|s| (s - max).exp()).collect();
        let total: f64 = exps.iter().sum();
        exps.into_iter().map(|e| e / total).collect()
    }

    /// Predict the best class for `sample`.
    pub fn predict(&self, sample: &SparseVector) -> Result<&str> {
        if self.classes.is_empty() {
            return Err(IntentBotError::classification("Model has not been fitted"));
        }

        let scores = self.decision_function(sample);
        let mut best = 0;
        for (class, score) in scores.iter().enumerate() {
            if *score > scores[best] {
                best = class;
            }
        }

        Ok(&self.classes[best])
    }

    /// Sorted class labels seen during fitting.
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// Gradient steps taken by the last fit.
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Check if the model has been fitted.
    pub fn is_fitted(&self) -> bool {
        !self.classes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn one_hot(idx: usize) -> SparseVector {
        SparseVector::from_entries(vec![(idx, 1.0)])
    }

    #[test]
    fn test_separable_classes() {
        let samples = vec![one_hot(0), one_hot(1), one_hot(2), one_hot(3)];
        let labels: Vec<String> = ["b", "b", "a", "a"].iter().map(|s| s.to_string()).collect();

        let mut model = LogisticRegression::default();
        model.fit(&samples, &labels, 4).unwrap();

        assert_eq!(model.classes(), &["a".to_string(), "b".to_string()]);
        assert_eq!(model.predict(&one_hot(0)).unwrap(), "b");
        assert_eq!(model.predict(&one_hot(3)).unwrap(), "a");
        assert!(model.iterations() > 0);

        let probabilities = model.probabilities(&one_hot(0));
        assert!((probabilities.iter().sum::<f64>() - 1.0).abs() < 1e-9);
        assert!(probabilities[1] > probabilities[0]);
    }

    #[test]
    fn test_many_classes_converge_early() {
        let samples: Vec<SparseVector> = (0..30).map(one_hot).collect();
        let labels: Vec<String> = (0..30).map(|i| format!("tag{}", i / 3)).collect();

        let mut model = LogisticRegression::default();
        model.fit(&samples, &labels, 30).unwrap();

        assert_eq!(model.classes().len(), 10);
        assert!(model.iterations() < ClassifierConfig::default().max_iterations);
        for (sample, label) in samples.iter().zip(&labels) {
            assert_eq!(model.predict(sample).unwrap(), label);
        }
    }

    #[test]
    fn test_single_class() {
        let samples = vec![one_hot(0), one_hot(1)];
        let labels = vec!["greeting".to_string(), "greeting".to_string()];

        let mut model = LogisticRegression::default();
        model.fit(&samples, &labels, 2).unwrap();

        assert_eq!(model.iterations(), 0);
        assert_eq!(model.predict(&one_hot(1)).unwrap(), "greeting");
    }

    #[test]
    fn test_unfitted_model() {
        let model = LogisticRegression::default();
        assert!(!model.is_fitted());
        assert!(model.predict(&one_hot(0)).is_err());
    }

    #[test]
    fn test_mismatched_input() {
        let mut model = LogisticRegression::default();
        assert!(model.fit(&[], &[], 0).is_err());
        assert!(model.fit(&[one_hot(0)], &[], 1).is_err());
    }
}
