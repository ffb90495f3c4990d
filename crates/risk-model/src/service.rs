//! The prediction boundary.
//!
//! [`RiskService`] owns the training source and a lazily trained model. The
//! model is fitted on the first prediction and reused afterwards, so a
//! service trains at most once.

use std::path::PathBuf;

use once_cell::sync::OnceCell;
use tracing::{debug, info};

use crate::config::TrainingConfig;
use crate::dataset::TrainingData;
use crate::error::Result;
use crate::features::RiskFeatures;
use crate::model::{Classifier, LogisticRegression};
use crate::types::RiskAssessment;

/// Where the training rows come from.
#[derive(Debug, Clone)]
pub enum TrainingSource {
    /// A survey CSV read on first use.
    Csv(PathBuf),
    /// Rows already prepared in memory.
    Prepared(TrainingData),
}

/// Memoized risk classifier.
///
/// # Example
///
/// ```rust,ignore
/// use risk_model::{RiskFeatures, RiskService, TrainingConfig};
///
/// let service = RiskService::from_csv("teen_phone_addiction_dataset.csv", TrainingConfig::default())?;
/// let features = RiskFeatures::new(10.0, 4.0, 120.0, 3.0, 6.0)?;
///
/// let assessment = service.assess(&features)?;
/// println!("{:.1}% -> {}", assessment.probability * 100.0, assessment.action.label());
/// ```
pub struct RiskService {
    source: TrainingSource,
    config: TrainingConfig,
    model: OnceCell<LogisticRegression>,
}

impl RiskService {
    /// Create a service, validating the configuration.
    ///
    /// No data is read until the first prediction.
    pub fn new(source: TrainingSource, config: TrainingConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            source,
            config,
            model: OnceCell::new(),
        })
    }

    pub fn from_csv(path: impl Into<PathBuf>, config: TrainingConfig) -> Result<Self> {
        Self::new(TrainingSource::Csv(path.into()), config)
    }

    pub fn config(&self) -> &TrainingConfig {
        &self.config
    }

    /// Whether the model has been trained.
    pub fn is_trained(&self) -> bool {
        self.model.get().is_some()
    }

    /// The trained model, training it on first access.
    ///
    /// A failed training attempt is not cached; the next call retries.
    pub fn model(&self) -> Result<&LogisticRegression> {
        self.model.get_or_try_init(|| self.train())
    }

    /// Probability that `features` belongs to the high-risk class.
    pub fn predict(&self, features: &RiskFeatures) -> Result<f64> {
        features.validate()?;
        let probability = self.model()?.predict_proba(&features.to_vector())?;
        debug!("Predicted probability {:.4}", probability);
        Ok(probability)
    }

    /// Score `features` and apply the decision threshold.
    pub fn assess(&self, features: &RiskFeatures) -> Result<RiskAssessment> {
        let probability = self.predict(features)?;
        Ok(RiskAssessment::new(
            probability,
            self.config.decision_threshold,
            features,
        ))
    }

    fn train(&self) -> Result<LogisticRegression> {
        let data = match &self.source {
            TrainingSource::Csv(path) => {
                info!("Loading training data from '{}'", path.display());
                TrainingData::from_csv(path, self.config.label_threshold)?
            }
            TrainingSource::Prepared(data) => data.clone(),
        };

        let mut model = LogisticRegression::from_config(&self.config);
        model.fit(&data.features, &data.labels)?;
        info!(
            "Model trained on {} rows ({} high risk)",
            data.len(),
            data.positives()
        );
        Ok(model)
    }
}

static_assertions::assert_impl_all!(RiskService: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RiskModelError;

    fn prepared() -> TrainingData {
        let rows = [
            ([1.0, 8.0, 10.0, 10.0, 0.5], false),
            ([2.0, 8.5, 20.0, 12.0, 1.0], false),
            ([3.0, 7.5, 30.0, 9.0, 1.5], false),
            ([2.5, 9.0, 25.0, 11.0, 1.0], false),
            ([9.0, 4.5, 120.0, 4.0, 5.0], true),
            ([10.0, 4.0, 130.0, 3.0, 6.0], true),
            ([8.5, 5.0, 110.0, 5.0, 4.5], true),
        ];
        let mut features = Vec::new();
        let mut labels = Vec::new();
        for (raw, label) in rows {
            let f = RiskFeatures::new(raw[0], raw[1], raw[2], raw[3], raw[4]).unwrap();
            features.push(f.to_vector().to_vec());
            labels.push(label);
        }
        TrainingData {
            features,
            labels,
            skipped_rows: 0,
        }
    }

    fn service() -> RiskService {
        RiskService::new(
            TrainingSource::Prepared(prepared()),
            TrainingConfig::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_trains_lazily_and_once() {
        let service = service();
        assert!(!service.is_trained());

        let first = service.model().unwrap() as *const LogisticRegression;
        let second = service.model().unwrap() as *const LogisticRegression;
        assert!(service.is_trained());
        assert!(std::ptr::eq(first, second));
    }

    #[test]
    fn test_assess_high_and_low_profiles() {
        let service = service();

        let high = RiskFeatures::new(10.0, 4.0, 120.0, 3.0, 6.0).unwrap();
        let assessment = service.assess(&high).unwrap();
        assert!(assessment.is_high_risk);
        assert_eq!(assessment.usage_to_sleep_ratio, 2.5);
        assert_eq!(assessment.checks_per_app, 40.0);

        let low = RiskFeatures::new(1.5, 8.5, 15.0, 10.0, 0.5).unwrap();
        assert!(!service.assess(&low).unwrap().is_high_risk);
    }

    #[test]
    fn test_invalid_features_rejected_before_training() {
        let service = service();
        let bad = RiskFeatures {
            daily_usage_hours: 5.0,
            sleep_hours: 0.0,
            phone_checks_per_day: 50.0,
            apps_used_daily: 5.0,
            social_media_hours: 2.0,
        };
        assert!(matches!(
            service.predict(&bad),
            Err(RiskModelError::InvalidInput(_))
        ));
        assert!(!service.is_trained());
    }

    #[test]
    fn test_failed_training_not_cached() {
        let service = RiskService::from_csv("/no/such/file.csv", TrainingConfig::default()).unwrap();
        assert!(service.model().is_err());
        assert!(!service.is_trained());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = TrainingConfig {
            decision_threshold: 2.0,
            ..TrainingConfig::default()
        };
        assert!(RiskService::new(TrainingSource::Prepared(prepared()), config).is_err());
    }
}
