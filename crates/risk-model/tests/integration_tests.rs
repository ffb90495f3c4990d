//! Integration tests for training and scoring from a survey CSV.

use pretty_assertions::assert_eq;
use risk_model::{
    RiskAction, RiskFeatures, RiskModelError, RiskService, TrainingConfig, TrainingData,
};
use std::path::PathBuf;

// ============================================================================
// Helper Functions
// ============================================================================

fn fixture() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/teen_phone_usage.csv")
}

fn service() -> RiskService {
    RiskService::from_csv(fixture(), TrainingConfig::default()).expect("default config is valid")
}

// ============================================================================
// Training Data
// ============================================================================

#[test]
fn test_survey_rows_prepared() {
    let data = TrainingData::from_csv(fixture(), 9.5).unwrap();

    // Oz has zero sleep and Pia a missing usage value
    assert_eq!(data.skipped_rows, 2);
    assert_eq!(data.len(), 14);
    assert_eq!(data.positives(), 6);
    assert!(data.features.iter().all(|row| row.len() == 7));
}

#[test]
fn test_label_threshold_is_configurable() {
    let data = TrainingData::from_csv(fixture(), 9.85).unwrap();
    assert_eq!(data.positives(), 4);
}

// ============================================================================
// Scoring
// ============================================================================

#[test]
fn test_heavy_user_is_high_risk() {
    let service = service();
    let features = RiskFeatures::new(10.0, 4.0, 120.0, 3.0, 6.0).unwrap();

    let assessment = service.assess(&features).unwrap();

    assert!(assessment.probability >= 0.40);
    assert!(assessment.is_high_risk);
    assert_eq!(assessment.action, RiskAction::TriggerWellnessCheck);
    assert_eq!(assessment.usage_to_sleep_ratio, 2.5);
    assert_eq!(assessment.checks_per_app, 40.0);
    assert_eq!(assessment.financial_impact.net_savings, 2473);
}

#[test]
fn test_light_user_is_low_risk() {
    let service = service();
    let features = RiskFeatures::new(1.5, 8.5, 15.0, 10.0, 0.5).unwrap();

    let assessment = service.assess(&features).unwrap();

    assert!(assessment.probability < 0.40);
    assert_eq!(assessment.action, RiskAction::NoActionNeeded);
    assert_eq!(assessment.financial_impact.net_savings, 0);
}

#[test]
fn test_predictions_are_reproducible() {
    let features = RiskFeatures::new(6.0, 6.0, 70.0, 6.0, 3.0).unwrap();
    let a = service().predict(&features).unwrap();
    let b = service().predict(&features).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_threshold_controls_decision() {
    let features = RiskFeatures::new(10.0, 4.0, 120.0, 3.0, 6.0).unwrap();
    let strict = RiskService::from_csv(
        fixture(),
        TrainingConfig::builder()
            .decision_threshold(1.0)
            .build()
            .unwrap(),
    )
    .unwrap();

    let assessment = strict.assess(&features).unwrap();
    assert_eq!(assessment.threshold, 1.0);
    assert_eq!(assessment.is_high_risk, assessment.probability >= 1.0);
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn test_zero_apps_is_invalid_input() {
    let err = RiskFeatures::new(5.0, 7.0, 50.0, 0.0, 2.0).unwrap_err();
    assert!(matches!(err, RiskModelError::InvalidInput(_)));
}

#[test]
fn test_missing_training_file() {
    let service =
        RiskService::from_csv("/no/such/survey.csv", TrainingConfig::default()).unwrap();
    let features = RiskFeatures::new(5.0, 7.0, 50.0, 5.0, 2.0).unwrap();
    assert!(matches!(
        service.assess(&features),
        Err(RiskModelError::Io(_))
    ));
}
