//! risk-model: phone-usage risk classifier.
//!
//! This crate predicts whether a teen is at high risk of a mental health
//! crisis from five phone-usage measurements. It trains a classifier on a
//! survey CSV, scores new profiles, and turns the probability into a business
//! decision with its financial impact.
//!
//! # Features
//!
//! - **Feature Engineering**: Usage-to-sleep and checks-per-app ratios, with
//!   zero denominators rejected up front
//! - **Deterministic Training**: Standardized logistic regression with
//!   balanced class weights and a fixed iteration budget
//! - **Memoized Model**: [`RiskService`] trains at most once
//! - **Decision Layer**: Threshold (default 0.40), action and dollar impact
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use risk_model::{RiskFeatures, RiskService, TrainingConfig};
//!
//! let service = RiskService::from_csv(
//!     "teen_phone_addiction_dataset.csv",
//!     TrainingConfig::default(),
//! )?;
//!
//! let features = RiskFeatures::new(10.0, 4.0, 120.0, 3.0, 6.0)?;
//! let assessment = service.assess(&features)?;
//!
//! if assessment.is_high_risk {
//!     println!("Recommend: {}", assessment.action.label());
//! }
//! ```
//!
//! # Architecture
//!
//! ```text
//! survey.csv ──► TrainingData ──► LogisticRegression (OnceCell in RiskService)
//!                                          │
//! RiskFeatures ──► to_vector() ──► predict_proba ──► RiskAssessment
//! ```

pub mod config;
pub mod dataset;
pub mod error;
pub mod features;
pub mod model;
pub mod service;
pub mod types;

// Re-exports for convenient access
pub use config::{
    DEFAULT_DECISION_THRESHOLD, DEFAULT_LABEL_THRESHOLD, TrainingConfig, TrainingConfigBuilder,
};
pub use dataset::TrainingData;
pub use error::{Result, RiskModelError};
pub use features::{FEATURE_NAMES, N_FEATURES, RiskFeatures};
pub use model::{Classifier, LogisticRegression, StandardScaler};
pub use service::{RiskService, TrainingSource};
pub use types::{FinancialImpact, RiskAction, RiskAssessment, format_dollars};
