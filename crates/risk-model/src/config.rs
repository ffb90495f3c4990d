//! Configuration for training and decision making.
//!
//! This module provides [`TrainingConfig`] and its builder.
//!
//! # Example
//!
//! ```
//! use risk_model::TrainingConfig;
//!
//! let config = TrainingConfig::builder()
//!     .decision_threshold(0.5)
//!     .max_iter(500)
//!     .build()
//!     .expect("valid config");
//! ```

use serde::{Deserialize, Serialize};

use crate::error::RiskModelError;

/// Decision threshold applied to the predicted probability.
pub const DEFAULT_DECISION_THRESHOLD: f64 = 0.40;

/// `Addiction_Level` above which a training row is labeled high risk.
pub const DEFAULT_LABEL_THRESHOLD: f64 = 9.5;

/// Configuration for the risk classifier.
///
/// Use [`TrainingConfig::builder()`] to construct a configuration with the builder pattern.
///
/// # Validation
///
/// The builder validates the following constraints on [`build()`](TrainingConfigBuilder::build):
/// - `decision_threshold` must be in range `[0.0, 1.0]`
/// - `learning_rate` must be positive and finite
/// - `max_iter` must be at least 1
/// - `label_threshold` must be finite
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingConfig {
    /// Probability at or above which a teen is flagged high risk (default: 0.40).
    pub decision_threshold: f64,

    /// `Addiction_Level` above which a training row is labeled positive (default: 9.5).
    pub label_threshold: f64,

    /// Gradient descent step size (default: 0.1).
    pub learning_rate: f64,

    /// Fixed number of gradient descent iterations (default: 1000).
    ///
    /// Training always runs the full budget so that results are reproducible.
    pub max_iter: usize,

    /// Weight classes inversely to their frequency (default: true).
    pub balanced_class_weights: bool,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            decision_threshold: DEFAULT_DECISION_THRESHOLD,
            label_threshold: DEFAULT_LABEL_THRESHOLD,
            learning_rate: 0.1,
            max_iter: 1000,
            balanced_class_weights: true,
        }
    }
}

impl TrainingConfig {
    /// Create a new builder for `TrainingConfig`.
    #[must_use]
    pub fn builder() -> TrainingConfigBuilder {
        TrainingConfigBuilder::default()
    }

    /// Validate every field.
    ///
    /// # Errors
    ///
    /// Returns [`RiskModelError::InvalidConfig`] naming the first invalid field.
    pub fn validate(&self) -> Result<(), RiskModelError> {
        if !(0.0..=1.0).contains(&self.decision_threshold) {
            return Err(RiskModelError::InvalidConfig(format!(
                "decision_threshold must be between 0.0 and 1.0, got {}",
                self.decision_threshold
            )));
        }

        if !self.learning_rate.is_finite() || self.learning_rate <= 0.0 {
            return Err(RiskModelError::InvalidConfig(format!(
                "learning_rate must be positive, got {}",
                self.learning_rate
            )));
        }

        if self.max_iter == 0 {
            return Err(RiskModelError::InvalidConfig(
                "max_iter must be at least 1".to_string(),
            ));
        }

        if !self.label_threshold.is_finite() {
            return Err(RiskModelError::InvalidConfig(format!(
                "label_threshold must be finite, got {}",
                self.label_threshold
            )));
        }

        Ok(())
    }
}

/// Builder for [`TrainingConfig`].
///
/// Created via [`TrainingConfig::builder()`]. All setters return `self` to allow
/// method chaining.
#[derive(Debug, Clone, Default)]
pub struct TrainingConfigBuilder {
    config: TrainingConfig,
}

impl TrainingConfigBuilder {
    /// Set the probability threshold for a high-risk decision (default: 0.40).
    #[must_use]
    pub fn decision_threshold(mut self, threshold: f64) -> Self {
        self.config.decision_threshold = threshold;
        self
    }

    /// Set the `Addiction_Level` labeling threshold (default: 9.5).
    #[must_use]
    pub fn label_threshold(mut self, threshold: f64) -> Self {
        self.config.label_threshold = threshold;
        self
    }

    /// Set the gradient descent step size (default: 0.1).
    #[must_use]
    pub fn learning_rate(mut self, rate: f64) -> Self {
        self.config.learning_rate = rate;
        self
    }

    /// Set the iteration budget (default: 1000).
    #[must_use]
    pub fn max_iter(mut self, max_iter: usize) -> Self {
        self.config.max_iter = max_iter;
        self
    }

    /// Enable or disable balanced class weights (default: true).
    #[must_use]
    pub fn balanced_class_weights(mut self, balanced: bool) -> Self {
        self.config.balanced_class_weights = balanced;
        self
    }

    /// Build the configuration, validating all fields.
    ///
    /// # Errors
    ///
    /// Returns [`RiskModelError::InvalidConfig`] if any field is out of range.
    pub fn build(self) -> Result<TrainingConfig, RiskModelError> {
        self.config.validate()?;
        Ok(self.config)
    }
}
