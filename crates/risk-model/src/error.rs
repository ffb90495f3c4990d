//! Error types for the risk-model crate.
//!
//! This module defines [`RiskModelError`], the main error type used throughout
//! the crate. All public API functions return `Result<T, RiskModelError>`.
//!
//! # Example
//!
//! ```
//! use risk_model::{RiskFeatures, RiskModelError};
//!
//! // A zero denominator is rejected instead of producing infinity
//! let err = RiskFeatures::new(5.0, 0.0, 50.0, 5.0, 2.0).unwrap_err();
//! assert!(matches!(err, RiskModelError::InvalidInput(_)));
//! ```

use thiserror::Error;

/// The main error type for risk-model operations.
///
/// This enum covers all error conditions that can occur during:
/// - Configuration validation
/// - Feature validation and engineering
/// - Training data loading
/// - Model training and inference
///
/// This enum is marked `#[non_exhaustive]` to allow adding new variants
/// in future versions without breaking downstream code.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum RiskModelError {
    /// Invalid configuration provided to the service.
    ///
    /// Check the error message for details on which configuration value is invalid
    /// and what values are accepted.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Invalid feature values provided for a prediction.
    ///
    /// Raised for negative or non-finite inputs, and for a sleep or app count
    /// of zero that would make an engineered ratio undefined.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Invalid training data.
    ///
    /// Common causes:
    /// - No usable rows remain after skipping rows with missing values
    /// - Only one class is present in the labels
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// A required column was not found in the training file.
    ///
    /// Column names are case-sensitive.
    #[error("Column '{0}' not found")]
    ColumnNotFound(String),

    /// Training failed to produce a usable model.
    #[error("Training failed: {0}")]
    TrainingFailed(String),

    /// The model was used for inference before being fitted.
    #[error("Model is not fitted")]
    NotFitted,

    /// I/O error while reading the training file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error raised by Polars while reading or converting columns.
    #[error("Data error: {0}")]
    Polars(#[from] polars::prelude::PolarsError),
}

/// Result type alias for risk-model operations.
pub type Result<T> = std::result::Result<T, RiskModelError>;
