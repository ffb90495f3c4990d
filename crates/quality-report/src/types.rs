use serde::{Deserialize, Serialize};

use crate::loader::DatasetInfo;

// ============================================================================
// Missing Values
// ============================================================================

/// Severity tier of a column's missing percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingStatus {
    /// More than 50% missing.
    Critical,
    /// More than 20% missing.
    Warning,
    /// Some values missing.
    Minor,
    /// Nothing missing.
    Ok,
}

impl MissingStatus {
    pub fn from_pct(pct: f64) -> Self {
        if pct > 50.0 {
            Self::Critical
        } else if pct > 20.0 {
            Self::Warning
        } else if pct == 0.0 {
            Self::Ok
        } else {
            Self::Minor
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Critical => "Critical",
            Self::Warning => "Warning",
            Self::Minor => "Minor",
            Self::Ok => "OK",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnMissingSummary {
    pub column: String,
    pub missing_count: usize,
    /// `missing_count / rows * 100`, 0 for an empty table.
    pub missing_pct: f64,
    pub dtype: String,
    pub status: MissingStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MissingSummary {
    pub total_missing_cells: usize,
    pub total_cells: usize,
    pub overall_missing_pct: f64,
    pub columns_with_missing: usize,
    /// Columns above the high-risk threshold, in detail order.
    pub high_missing_columns: Vec<String>,
    /// Per-column entries ordered by descending missing percentage.
    pub details: Vec<ColumnMissingSummary>,
}

impl MissingSummary {
    /// Columns that have at least one missing value, in detail order.
    pub fn columns_with_missing_iter(&self) -> impl Iterator<Item = &ColumnMissingSummary> {
        self.details.iter().filter(|d| d.missing_pct > 0.0)
    }
}

// ============================================================================
// Outliers
// ============================================================================

/// IQR statistics for one numeric column.
///
/// All statistics are rounded to two decimals, matching the report tables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutlierSummary {
    pub column: String,
    /// Number of non-missing values.
    pub count: usize,
    pub mean: f64,
    /// Sample standard deviation (n - 1); 0 for a single value.
    pub std: f64,
    pub min: f64,
    pub max: f64,
    pub q1: f64,
    pub q3: f64,
    pub iqr: f64,
    pub lower_bound: f64,
    pub upper_bound: f64,
    pub outlier_count: usize,
    pub outlier_pct: f64,
    /// Advisory flags for values that are implausible for the column's name.
    pub impossible_values: Vec<String>,
}

impl OutlierSummary {
    pub fn has_impossible_values(&self) -> bool {
        !self.impossible_values.is_empty()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutlierReport {
    /// Number of columns with a numeric declared type, including skipped ones.
    pub numeric_columns: usize,
    pub columns_with_outliers: usize,
    pub total_outliers: usize,
    pub details: Vec<OutlierSummary>,
}

// ============================================================================
// Duplicates
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct KeyColumnDuplicate {
    pub column: String,
    /// Number of values that repeat an earlier value in the column.
    pub duplicates: usize,
}

/// One row that belongs to a group of exact duplicates.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DuplicateExample {
    /// Zero-based row position in the dataset.
    pub row_index: usize,
    /// Cell values in column order; `None` for missing cells.
    pub values: Vec<Option<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DuplicateSummary {
    pub exact_duplicates: usize,
    pub exact_duplicate_pct: f64,
    pub potential_key_columns: Vec<String>,
    pub key_column_duplicates: Vec<KeyColumnDuplicate>,
    pub examples: Vec<DuplicateExample>,
}

// ============================================================================
// Data Types
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DtypeCount {
    pub dtype: String,
    pub columns: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnTypeInfo {
    pub column: String,
    pub dtype: String,
    pub unique_values: usize,
    pub unique_pct: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypeSummary {
    /// Column counts per declared type, most common first.
    pub dtype_counts: Vec<DtypeCount>,
    pub details: Vec<ColumnTypeInfo>,
    pub warnings: Vec<String>,
}

// ============================================================================
// Categorical Values
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ValueCount {
    pub value: String,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoricalColumn {
    pub column: String,
    pub dtype: String,
    pub unique_count: usize,
    /// Distinct non-missing values in first-seen order.
    pub unique_values: Vec<String>,
    /// Frequencies aligned with `unique_values`.
    pub value_counts: Vec<ValueCount>,
    pub missing_count: usize,
}

impl CategoricalColumn {
    pub fn has_nulls(&self) -> bool {
        self.missing_count > 0
    }

    pub fn count_of(&self, value: &str) -> usize {
        self.value_counts
            .iter()
            .find(|vc| vc.value == value)
            .map(|vc| vc.count)
            .unwrap_or(0)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CategoricalSummary {
    pub columns: usize,
    pub details: Vec<CategoricalColumn>,
}

// ============================================================================
// Score & Recommendations
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QualityTier {
    Excellent,
    GoodWithIssues,
    Significant,
}

impl QualityTier {
    pub fn from_score(score: u8) -> Self {
        if score >= 80 {
            Self::Excellent
        } else if score >= 60 {
            Self::GoodWithIssues
        } else {
            Self::Significant
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Self::Excellent => "Excellent data quality!",
            Self::GoodWithIssues => "Good quality with some issues to address",
            Self::Significant => "Significant data quality issues detected",
        }
    }

    /// Display colour for the score panel.
    pub fn color(&self) -> &'static str {
        match self {
            Self::Excellent => "#27ae60",
            Self::GoodWithIssues => "#f39c12",
            Self::Significant => "#e74c3c",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualityScore {
    /// Composite score in `[0, 100]`.
    pub score: u8,
    pub tier: QualityTier,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    /// Short heading; absent for the all-clear line.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub detail: String,
}

// ============================================================================
// Aggregated Report
// ============================================================================

/// Everything the renderers need, produced by one pipeline run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QualityReport {
    pub dataset: DatasetInfo,
    /// Local timestamp formatted as `%Y-%m-%d %H:%M:%S`.
    pub generated_at: String,
    pub missing: MissingSummary,
    pub outliers: OutlierReport,
    pub duplicates: DuplicateSummary,
    pub data_types: TypeSummary,
    pub categorical: CategoricalSummary,
    pub quality_score: QualityScore,
    pub recommendations: Vec<Recommendation>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_status_tiers() {
        assert_eq!(MissingStatus::from_pct(0.0), MissingStatus::Ok);
        assert_eq!(MissingStatus::from_pct(0.5), MissingStatus::Minor);
        assert_eq!(MissingStatus::from_pct(20.0), MissingStatus::Minor);
        assert_eq!(MissingStatus::from_pct(20.1), MissingStatus::Warning);
        assert_eq!(MissingStatus::from_pct(50.0), MissingStatus::Warning);
        assert_eq!(MissingStatus::from_pct(50.1), MissingStatus::Critical);
    }

    #[test]
    fn test_quality_tier_boundaries() {
        assert_eq!(QualityTier::from_score(100), QualityTier::Excellent);
        assert_eq!(QualityTier::from_score(80), QualityTier::Excellent);
        assert_eq!(QualityTier::from_score(79), QualityTier::GoodWithIssues);
        assert_eq!(QualityTier::from_score(60), QualityTier::GoodWithIssues);
        assert_eq!(QualityTier::from_score(59), QualityTier::Significant);
    }

    #[test]
    fn test_categorical_count_of() {
        let column = CategoricalColumn {
            column: "color".to_string(),
            dtype: "object".to_string(),
            unique_count: 2,
            unique_values: vec!["red".to_string(), "blue".to_string()],
            value_counts: vec![
                ValueCount { value: "red".to_string(), count: 3 },
                ValueCount { value: "blue".to_string(), count: 1 },
            ],
            missing_count: 0,
        };
        assert_eq!(column.count_of("red"), 3);
        assert_eq!(column.count_of("green"), 0);
        assert!(!column.has_nulls());
    }

    #[test]
    fn test_recommendation_serialization_skips_empty_title() {
        let rec = Recommendation {
            title: None,
            detail: "All good".to_string(),
        };
        let json = serde_json::to_string(&rec).unwrap();
        assert!(!json.contains("title"));
    }
}
