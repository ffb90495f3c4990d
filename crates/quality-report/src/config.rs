//! Configuration types for the data quality report.
//!
//! This module provides the thresholds and display limits used by the
//! analyzers and renderers, using the builder pattern for ergonomic setup.

use serde::{Deserialize, Serialize};

/// Configuration for a report run.
///
/// Use [`ReportConfig::builder()`] to create a new configuration
/// with fluent API.
///
/// # Example
///
/// ```rust,ignore
/// use quality_report::config::ReportConfig;
///
/// let config = ReportConfig::builder()
///     .high_missing_threshold(40.0)
///     .iqr_multiplier(3.0)
///     .build()?;
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Columns with a missing percentage above this value are high-risk.
    /// Default: 50.0
    pub high_missing_threshold: f64,

    /// Multiplier applied to the IQR to obtain the outlier fences.
    /// Default: 1.5
    pub iqr_multiplier: f64,

    /// Outlier percentage above which a column counts as high-outlier.
    /// Default: 10.0
    pub high_outlier_threshold: f64,

    /// Maximum number of rows sampled for the missing-value heatmap.
    /// Default: 100
    pub heatmap_sample_rows: usize,

    /// Seed for the heatmap row sample.
    /// Default: 42
    pub sample_seed: u64,

    /// Number of non-missing values inspected by the type probes.
    /// Default: 100
    pub type_probe_prefix: usize,

    /// Maximum number of candidate key columns checked for duplicates.
    /// Default: 5
    pub max_key_columns: usize,

    /// Maximum number of duplicate example rows retained.
    /// Default: 10
    pub duplicate_examples: usize,

    /// Maximum number of duplicate example rows shown in the HTML report.
    /// Default: 5
    pub html_duplicate_examples: usize,

    /// Maximum number of values listed per categorical column in the HTML report.
    /// Default: 20
    pub categorical_display_limit: usize,

    /// Maximum number of values listed per categorical column on the console.
    /// Default: 10
    pub console_categorical_limit: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            high_missing_threshold: 50.0,
            iqr_multiplier: 1.5,
            high_outlier_threshold: 10.0,
            heatmap_sample_rows: 100,
            sample_seed: 42,
            type_probe_prefix: 100,
            max_key_columns: 5,
            duplicate_examples: 10,
            html_duplicate_examples: 5,
            categorical_display_limit: 20,
            console_categorical_limit: 10,
        }
    }
}

impl ReportConfig {
    /// Create a new configuration builder.
    pub fn builder() -> ReportConfigBuilder {
        ReportConfigBuilder::default()
    }

    /// Validate the configuration and return errors if invalid.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        for (field, value) in [
            ("high_missing_threshold", self.high_missing_threshold),
            ("high_outlier_threshold", self.high_outlier_threshold),
        ] {
            if !(0.0..=100.0).contains(&value) {
                return Err(ConfigValidationError::InvalidPercentage {
                    field: field.to_string(),
                    value,
                });
            }
        }

        if !self.iqr_multiplier.is_finite() || self.iqr_multiplier < 0.0 {
            return Err(ConfigValidationError::InvalidMultiplier(self.iqr_multiplier));
        }

        for (field, value) in [
            ("heatmap_sample_rows", self.heatmap_sample_rows),
            ("type_probe_prefix", self.type_probe_prefix),
        ] {
            if value == 0 {
                return Err(ConfigValidationError::ZeroLimit(field.to_string()));
            }
        }

        if self.html_duplicate_examples > self.duplicate_examples {
            return Err(ConfigValidationError::ExampleLimits {
                html: self.html_duplicate_examples,
                retained: self.duplicate_examples,
            });
        }

        Ok(())
    }
}

/// Errors that can occur during configuration validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Invalid percentage for '{field}': {value} (must be between 0 and 100)")]
    InvalidPercentage { field: String, value: f64 },

    #[error("Invalid IQR multiplier: {0} (must be a non-negative number)")]
    InvalidMultiplier(f64),

    #[error("'{0}' must be at least 1")]
    ZeroLimit(String),

    #[error("HTML duplicate examples ({html}) cannot exceed retained examples ({retained})")]
    ExampleLimits { html: usize, retained: usize },
}

/// Builder for [`ReportConfig`] with fluent API.
#[derive(Debug, Default)]
pub struct ReportConfigBuilder {
    high_missing_threshold: Option<f64>,
    iqr_multiplier: Option<f64>,
    high_outlier_threshold: Option<f64>,
    heatmap_sample_rows: Option<usize>,
    sample_seed: Option<u64>,
    type_probe_prefix: Option<usize>,
    max_key_columns: Option<usize>,
    duplicate_examples: Option<usize>,
    html_duplicate_examples: Option<usize>,
    categorical_display_limit: Option<usize>,
    console_categorical_limit: Option<usize>,
}

impl ReportConfigBuilder {
    /// Set the missing percentage above which a column is high-risk.
    ///
    /// # Arguments
    /// * `threshold` - Value between 0 and 100 (e.g., 50.0 = 50%)
    pub fn high_missing_threshold(mut self, threshold: f64) -> Self {
        self.high_missing_threshold = Some(threshold);
        self
    }

    /// Set the IQR multiplier used for the outlier fences.
    pub fn iqr_multiplier(mut self, multiplier: f64) -> Self {
        self.iqr_multiplier = Some(multiplier);
        self
    }

    /// Set the outlier percentage above which a column is penalized.
    pub fn high_outlier_threshold(mut self, threshold: f64) -> Self {
        self.high_outlier_threshold = Some(threshold);
        self
    }

    /// Set the heatmap sample size.
    pub fn heatmap_sample_rows(mut self, rows: usize) -> Self {
        self.heatmap_sample_rows = Some(rows);
        self
    }

    /// Set the seed used for the heatmap sample.
    pub fn sample_seed(mut self, seed: u64) -> Self {
        self.sample_seed = Some(seed);
        self
    }

    /// Set how many leading non-missing values the type probes inspect.
    pub fn type_probe_prefix(mut self, prefix: usize) -> Self {
        self.type_probe_prefix = Some(prefix);
        self
    }

    /// Set how many candidate key columns are checked for duplicates.
    pub fn max_key_columns(mut self, count: usize) -> Self {
        self.max_key_columns = Some(count);
        self
    }

    /// Set how many duplicate example rows are retained.
    pub fn duplicate_examples(mut self, count: usize) -> Self {
        self.duplicate_examples = Some(count);
        self
    }

    /// Set how many duplicate example rows the HTML report shows.
    pub fn html_duplicate_examples(mut self, count: usize) -> Self {
        self.html_duplicate_examples = Some(count);
        self
    }

    /// Set how many values per categorical column the HTML report lists.
    pub fn categorical_display_limit(mut self, limit: usize) -> Self {
        self.categorical_display_limit = Some(limit);
        self
    }

    /// Set how many values per categorical column the console lists.
    pub fn console_categorical_limit(mut self, limit: usize) -> Self {
        self.console_categorical_limit = Some(limit);
        self
    }

    /// Build the configuration.
    ///
    /// Returns a validated `ReportConfig` or an error if validation fails.
    pub fn build(self) -> Result<ReportConfig, ConfigValidationError> {
        let defaults = ReportConfig::default();
        let config = ReportConfig {
            high_missing_threshold: self
                .high_missing_threshold
                .unwrap_or(defaults.high_missing_threshold),
            iqr_multiplier: self.iqr_multiplier.unwrap_or(defaults.iqr_multiplier),
            high_outlier_threshold: self
                .high_outlier_threshold
                .unwrap_or(defaults.high_outlier_threshold),
            heatmap_sample_rows: self
                .heatmap_sample_rows
                .unwrap_or(defaults.heatmap_sample_rows),
            sample_seed: self.sample_seed.unwrap_or(defaults.sample_seed),
            type_probe_prefix: self.type_probe_prefix.unwrap_or(defaults.type_probe_prefix),
            max_key_columns: self.max_key_columns.unwrap_or(defaults.max_key_columns),
            duplicate_examples: self
                .duplicate_examples
                .unwrap_or(defaults.duplicate_examples),
            html_duplicate_examples: self
                .html_duplicate_examples
                .unwrap_or(defaults.html_duplicate_examples),
            categorical_display_limit: self
                .categorical_display_limit
                .unwrap_or(defaults.categorical_display_limit),
            console_categorical_limit: self
                .console_categorical_limit
                .unwrap_or(defaults.console_categorical_limit),
        };

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ReportConfig::default();
        assert_eq!(config.high_missing_threshold, 50.0);
        assert_eq!(config.iqr_multiplier, 1.5);
        assert_eq!(config.heatmap_sample_rows, 100);
        assert_eq!(config.sample_seed, 42);
        assert_eq!(config.max_key_columns, 5);
        assert_eq!(config.duplicate_examples, 10);
        assert_eq!(config.html_duplicate_examples, 5);
        assert_eq!(config.categorical_display_limit, 20);
    }

    #[test]
    fn test_builder_defaults_match_default() {
        let config = ReportConfig::builder().build().unwrap();
        assert_eq!(config.high_outlier_threshold, 10.0);
        assert_eq!(config.type_probe_prefix, 100);
    }

    #[test]
    fn test_builder_custom_values() {
        let config = ReportConfig::builder()
            .high_missing_threshold(30.0)
            .iqr_multiplier(3.0)
            .max_key_columns(2)
            .build()
            .unwrap();

        assert_eq!(config.high_missing_threshold, 30.0);
        assert_eq!(config.iqr_multiplier, 3.0);
        assert_eq!(config.max_key_columns, 2);
    }

    #[test]
    fn test_validation_invalid_percentage() {
        let result = ReportConfig::builder().high_missing_threshold(150.0).build();
        assert!(matches!(
            result.unwrap_err(),
            ConfigValidationError::InvalidPercentage { .. }
        ));
    }

    #[test]
    fn test_validation_negative_multiplier() {
        let result = ReportConfig::builder().iqr_multiplier(-1.0).build();
        assert!(matches!(
            result.unwrap_err(),
            ConfigValidationError::InvalidMultiplier(_)
        ));
    }

    #[test]
    fn test_validation_zero_sample() {
        let result = ReportConfig::builder().heatmap_sample_rows(0).build();
        assert!(matches!(
            result.unwrap_err(),
            ConfigValidationError::ZeroLimit(_)
        ));
    }

    #[test]
    fn test_validation_example_limits() {
        let result = ReportConfig::builder()
            .duplicate_examples(3)
            .html_duplicate_examples(5)
            .build();
        assert!(matches!(
            result.unwrap_err(),
            ConfigValidationError::ExampleLimits { html: 5, retained: 3 }
        ));
    }

    #[test]
    fn test_config_from_json() {
        let json = r#"{
            "high_missing_threshold": 40.0,
            "iqr_multiplier": 2.0,
            "high_outlier_threshold": 5.0,
            "heatmap_sample_rows": 50,
            "sample_seed": 7,
            "type_probe_prefix": 20,
            "max_key_columns": 3,
            "duplicate_examples": 8,
            "html_duplicate_examples": 4,
            "categorical_display_limit": 15,
            "console_categorical_limit": 5
        }"#;

        let config: ReportConfig = serde_json::from_str(json).expect("valid config JSON");
        assert_eq!(config.high_missing_threshold, 40.0);
        assert_eq!(config.sample_seed, 7);
        assert_eq!(config.console_categorical_limit, 5);
        assert!(config.validate().is_ok());
    }
}
