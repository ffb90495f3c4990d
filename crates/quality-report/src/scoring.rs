//! Composite quality score and remediation recommendations.

use crate::config::ReportConfig;
use crate::types::{
    DuplicateSummary, MissingSummary, OutlierReport, QualityScore, QualityTier, Recommendation,
    TypeSummary,
};
use crate::utils::format_thousands;

const MAX_MISSING_PENALTY: f64 = 30.0;
const MAX_DUPLICATE_PENALTY: f64 = 20.0;
const MAX_OUTLIER_PENALTY: f64 = 20.0;
const PENALTY_PER_OUTLIER_COLUMN: f64 = 5.0;

/// Overall missing percentage above which an imputation strategy is suggested.
const IMPUTATION_THRESHOLD: f64 = 5.0;

/// Number of column names quoted in a recommendation.
const NAMED_COLUMNS: usize = 3;

pub struct QualityScorer;

impl QualityScorer {
    pub fn score(
        missing: &MissingSummary,
        duplicates: &DuplicateSummary,
        outliers: &OutlierReport,
        config: &ReportConfig,
    ) -> QualityScore {
        let high_outlier_columns = Self::high_outlier_columns(outliers, config);

        let raw = 100.0
            - (missing.overall_missing_pct * 0.5).min(MAX_MISSING_PENALTY)
            - (duplicates.exact_duplicate_pct * 2.0).min(MAX_DUPLICATE_PENALTY)
            - (high_outlier_columns as f64 * PENALTY_PER_OUTLIER_COLUMN).min(MAX_OUTLIER_PENALTY);

        let score = raw.clamp(0.0, 100.0).round_ties_even() as u8;
        QualityScore {
            score,
            tier: QualityTier::from_score(score),
        }
    }

    pub fn recommendations(
        missing: &MissingSummary,
        duplicates: &DuplicateSummary,
        outliers: &OutlierReport,
        types: &TypeSummary,
        config: &ReportConfig,
    ) -> Vec<Recommendation> {
        let mut recommendations = Vec::new();

        if !missing.high_missing_columns.is_empty() {
            let cols = missing.high_missing_columns[..missing.high_missing_columns.len().min(NAMED_COLUMNS)]
                .join(", ");
            recommendations.push(Recommendation {
                title: Some("High Missing Values".to_string()),
                detail: format!(
                    "Consider dropping columns with >{}% missing data ({}...) or investigate why data is missing.",
                    config.high_missing_threshold, cols
                ),
            });
        }

        if missing.overall_missing_pct > IMPUTATION_THRESHOLD {
            recommendations.push(Recommendation {
                title: Some("Missing Data Strategy".to_string()),
                detail: "Implement appropriate imputation (mean/median for numeric, mode for categorical) or use algorithms that handle missing values.".to_string(),
            });
        }

        if duplicates.exact_duplicates > 0 {
            recommendations.push(Recommendation {
                title: Some("Remove Duplicates".to_string()),
                detail: format!(
                    "Found {} exact duplicates. Remove them before training a model.",
                    format_thousands(duplicates.exact_duplicates)
                ),
            });
        }

        let impossible: Vec<&str> = outliers
            .details
            .iter()
            .filter(|d| d.has_impossible_values())
            .map(|d| d.column.as_str())
            .collect();
        if !impossible.is_empty() {
            recommendations.push(Recommendation {
                title: Some("Investigate Impossible Values".to_string()),
                detail: format!(
                    "Columns {} contain suspicious values that may be data entry errors.",
                    impossible[..impossible.len().min(NAMED_COLUMNS)].join(", ")
                ),
            });
        }

        if Self::high_outlier_columns(outliers, config) > 0 {
            recommendations.push(Recommendation {
                title: Some("Outlier Treatment".to_string()),
                detail: "Consider capping, transforming (log), or removing outliers in high-impact columns.".to_string(),
            });
        }

        if !types.warnings.is_empty() {
            recommendations.push(Recommendation {
                title: Some("Fix Data Types".to_string()),
                detail: "Some columns may have incorrect types. Review and convert to appropriate types for better analysis.".to_string(),
            });
        }

        if recommendations.is_empty() {
            recommendations.push(Recommendation {
                title: None,
                detail: "Data quality looks good! Proceed with your analysis.".to_string(),
            });
        }

        recommendations
    }

    fn high_outlier_columns(outliers: &OutlierReport, config: &ReportConfig) -> usize {
        outliers
            .details
            .iter()
            .filter(|d| d.outlier_pct > config.high_outlier_threshold)
            .count()
    }
}
