//! Binary classifiers for the risk decision.
//!
//! The [`Classifier`] trait is the seam between training/inference and the
//! algorithm. [`LogisticRegression`] is the shipped implementation: z-score
//! standardized inputs, optional balanced class weights, and full-batch
//! gradient descent over a fixed iteration budget, so the same data always
//! yields the same model.

use serde::{Deserialize, Serialize};

use crate::config::TrainingConfig;
use crate::error::{Result, RiskModelError};

/// A binary classifier producing the probability of the positive class.
pub trait Classifier: Send + Sync {
    /// Fit the model to rows of features and their labels.
    ///
    /// # Errors
    ///
    /// Returns [`RiskModelError::InvalidData`] if the rows are empty, ragged,
    /// mismatched with the labels, or contain a single class.
    fn fit(&mut self, x: &[Vec<f64>], y: &[bool]) -> Result<()>;

    /// Probability in `[0, 1]` that `row` belongs to the positive class.
    ///
    /// # Errors
    ///
    /// Returns [`RiskModelError::NotFitted`] before [`fit`](Self::fit) succeeds,
    /// or [`RiskModelError::InvalidInput`] if the row has the wrong width.
    fn predict_proba(&self, row: &[f64]) -> Result<f64>;

    /// Whether [`fit`](Self::fit) has completed.
    fn is_fitted(&self) -> bool;
}

/// Per-feature z-score standardization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardScaler {
    means: Vec<f64>,
    stds: Vec<f64>,
}

impl StandardScaler {
    /// Compute the mean and population standard deviation of each column.
    ///
    /// Constant columns get a unit scale so they map to zero.
    pub fn fit(x: &[Vec<f64>]) -> Self {
        let n_features = x.first().map_or(0, Vec::len);
        let n = x.len() as f64;

        let means: Vec<f64> = (0..n_features)
            .map(|j| x.iter().map(|row| row[j]).sum::<f64>() / n)
            .collect();
        let stds = (0..n_features)
            .map(|j| {
                let var = x.iter().map(|row| (row[j] - means[j]).powi(2)).sum::<f64>() / n;
                let std = var.sqrt();
                if std > f64::EPSILON { std } else { 1.0 }
            })
            .collect();

        Self { means, stds }
    }

    pub fn n_features(&self) -> usize {
        self.means.len()
    }

    pub fn transform(&self, row: &[f64]) -> Vec<f64> {
        row.iter()
            .zip(self.means.iter().zip(&self.stds))
            .map(|(v, (mean, std))| (v - mean) / std)
            .collect()
    }
}

/// Fitted parameters of a [`LogisticRegression`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct FittedParams {
    scaler: StandardScaler,
    coefficients: Vec<f64>,
    intercept: f64,
}

/// Logistic regression trained by gradient descent.
///
/// # Example
///
/// ```
/// use risk_model::{Classifier, LogisticRegression};
///
/// let x = vec![vec![0.0], vec![1.0], vec![9.0], vec![10.0]];
/// let y = vec![false, false, true, true];
///
/// let mut model = LogisticRegression::new();
/// model.fit(&x, &y).unwrap();
/// assert!(model.predict_proba(&[10.0]).unwrap() > 0.5);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogisticRegression {
    learning_rate: f64,
    max_iter: usize,
    balanced: bool,
    params: Option<FittedParams>,
}

impl Default for LogisticRegression {
    fn default() -> Self {
        Self::new()
    }
}

impl LogisticRegression {
    /// Creates a classifier with default hyperparameters
    /// (learning rate 0.1, 1000 iterations, balanced class weights).
    #[must_use]
    pub fn new() -> Self {
        Self::from_config(&TrainingConfig::default())
    }

    /// Creates a classifier using the hyperparameters in `config`.
    #[must_use]
    pub fn from_config(config: &TrainingConfig) -> Self {
        Self {
            learning_rate: config.learning_rate,
            max_iter: config.max_iter,
            balanced: config.balanced_class_weights,
            params: None,
        }
    }

    #[must_use]
    pub fn with_learning_rate(mut self, lr: f64) -> Self {
        self.learning_rate = lr;
        self
    }

    #[must_use]
    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    #[must_use]
    pub fn with_balanced_weights(mut self, balanced: bool) -> Self {
        self.balanced = balanced;
        self
    }

    /// Coefficients in standardized feature space, if fitted.
    pub fn coefficients(&self) -> Option<&[f64]> {
        self.params.as_ref().map(|p| p.coefficients.as_slice())
    }

    pub fn intercept(&self) -> Option<f64> {
        self.params.as_ref().map(|p| p.intercept)
    }

    /// Numerically stable logistic function.
    fn sigmoid(z: f64) -> f64 {
        if z >= 0.0 {
            1.0 / (1.0 + (-z).exp())
        } else {
            let e = z.exp();
            e / (1.0 + e)
        }
    }

    fn linear(coefficients: &[f64], intercept: f64, row: &[f64]) -> f64 {
        intercept + coefficients.iter().zip(row).map(|(w, x)| w * x).sum::<f64>()
    }

    /// Per-sample weights: `n / (2 * n_class)` when balanced, 1 otherwise.
    fn sample_weights(&self, y: &[bool]) -> Vec<f64> {
        if !self.balanced {
            return vec![1.0; y.len()];
        }
        let n = y.len() as f64;
        let positives = y.iter().filter(|&&label| label).count() as f64;
        let negatives = n - positives;
        let w_pos = n / (2.0 * positives);
        let w_neg = n / (2.0 * negatives);
        y.iter()
            .map(|&label| if label { w_pos } else { w_neg })
            .collect()
    }

    fn check_training_data(x: &[Vec<f64>], y: &[bool]) -> Result<usize> {
        if x.is_empty() {
            return Err(RiskModelError::InvalidData(
                "cannot fit with zero samples".to_string(),
            ));
        }
        if x.len() != y.len() {
            return Err(RiskModelError::InvalidData(format!(
                "number of samples ({}) and labels ({}) must match",
                x.len(),
                y.len()
            )));
        }

        let n_features = x[0].len();
        if n_features == 0 || x.iter().any(|row| row.len() != n_features) {
            return Err(RiskModelError::InvalidData(
                "every sample must have the same non-zero number of features".to_string(),
            ));
        }
        if x.iter().flatten().any(|v| !v.is_finite()) {
            return Err(RiskModelError::InvalidData(
                "features must be finite".to_string(),
            ));
        }

        let positives = y.iter().filter(|&&label| label).count();
        if positives == 0 || positives == y.len() {
            return Err(RiskModelError::InvalidData(
                "labels must contain both classes".to_string(),
            ));
        }
        Ok(n_features)
    }
}

impl Classifier for LogisticRegression {
    fn fit(&mut self, x: &[Vec<f64>], y: &[bool]) -> Result<()> {
        let n_features = Self::check_training_data(x, y)?;

        let scaler = StandardScaler::fit(x);
        let scaled: Vec<Vec<f64>> = x.iter().map(|row| scaler.transform(row)).collect();
        let weights = self.sample_weights(y);
        let total_weight: f64 = weights.iter().sum();

        let mut coefficients = vec![0.0; n_features];
        let mut intercept = 0.0;

        for _ in 0..self.max_iter {
            let mut coef_grad = vec![0.0; n_features];
            let mut intercept_grad = 0.0;

            for ((row, &label), &weight) in scaled.iter().zip(y).zip(&weights) {
                let target = if label { 1.0 } else { 0.0 };
                let error =
                    weight * (Self::sigmoid(Self::linear(&coefficients, intercept, row)) - target);
                intercept_grad += error;
                for (grad, value) in coef_grad.iter_mut().zip(row) {
                    *grad += error * value;
                }
            }

            intercept -= self.learning_rate * intercept_grad / total_weight;
            for (coef, grad) in coefficients.iter_mut().zip(&coef_grad) {
                *coef -= self.learning_rate * grad / total_weight;
            }
        }

        if !intercept.is_finite() || coefficients.iter().any(|c| !c.is_finite()) {
            return Err(RiskModelError::TrainingFailed(
                "gradient descent diverged; lower the learning rate".to_string(),
            ));
        }

        self.params = Some(FittedParams {
            scaler,
            coefficients,
            intercept,
        });
        Ok(())
    }

    fn predict_proba(&self, row: &[f64]) -> Result<f64> {
        let params = self.params.as_ref().ok_or(RiskModelError::NotFitted)?;
        if row.len() != params.scaler.n_features() {
            return Err(RiskModelError::InvalidInput(format!(
                "expected {} features, got {}",
                params.scaler.n_features(),
                row.len()
            )));
        }

        let scaled = params.scaler.transform(row);
        Ok(Self::sigmoid(Self::linear(
            &params.coefficients,
            params.intercept,
            &scaled,
        )))
    }

    fn is_fitted(&self) -> bool {
        self.params.is_some()
    }
}

static_assertions::assert_impl_all!(LogisticRegression: Send, Sync);
