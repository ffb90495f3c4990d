//! Data Quality Report Library
//!
//! Descriptive data-quality analysis for tabular CSV datasets, built on Polars.
//!
//! # Overview
//!
//! A report run loads one file and computes:
//!
//! - **Missing Values**: per-column counts, percentages and severity tiers
//! - **Outliers**: IQR statistics per numeric column plus implausible-value flags
//! - **Duplicates**: exact duplicate rows and duplicate values in identifier-like columns
//! - **Data Types**: declared types, cardinality, text columns that look numeric or datetime
//! - **Categorical Values**: value frequencies for text columns
//! - **Quality Score**: a 0-100 composite with remediation recommendations
//!
//! The results are rendered as a console report, a standalone HTML document
//! with inline SVG charts, or JSON.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use quality_report::{QualityReportPipeline, ReportGenerator, reporting::html};
//! use std::path::Path;
//!
//! let pipeline = QualityReportPipeline::builder().build()?;
//! let output = pipeline.run_file("data.csv")?;
//!
//! let generator = ReportGenerator::for_input(Path::new("data.csv"), None);
//! generator.write_html(&html::render(&output.report, &output.charts, pipeline.config()))?;
//!
//! println!("Quality score: {}/100", output.report.quality_score.score);
//! ```
//!
//! # Configuration
//!
//! Use [`ReportConfig`] to adjust thresholds and display limits:
//!
//! ```rust,ignore
//! use quality_report::ReportConfig;
//!
//! let config = ReportConfig::builder()
//!     .high_missing_threshold(40.0)   // Flag columns with >40% missing
//!     .iqr_multiplier(3.0)            // Only extreme outliers
//!     .max_key_columns(3)
//!     .build()?;
//! ```

pub mod config;
pub mod error;
pub mod loader;
pub mod pipeline;
pub mod quality;
pub mod reporting;
pub mod scoring;
pub mod types;
pub mod utils;

// Re-exports for convenient access
pub use config::{ConfigValidationError, ReportConfig, ReportConfigBuilder};
pub use error::{QualityError, Result as QualityResult, ResultExt};
pub use loader::{Dataset, DatasetInfo, load_dataset};
pub use pipeline::{
    ClosureProgressReporter, ProgressReporter, ProgressUpdate, QualityReportPipeline,
    QualityReportPipelineBuilder, ReportOutput, ReportStage,
};
pub use quality::{
    CategoricalAnalyzer, DuplicateAnalyzer, MissingValueAnalyzer, OutlierAnalyzer, TypeAnalyzer,
};
pub use reporting::{ChartRenderer, ReportCharts, ReportGenerator};
pub use scoring::QualityScorer;
pub use types::{
    CategoricalColumn, CategoricalSummary, ColumnMissingSummary, ColumnTypeInfo, DuplicateExample,
    DuplicateSummary, DtypeCount, KeyColumnDuplicate, MissingStatus, MissingSummary,
    OutlierReport, OutlierSummary, QualityReport, QualityScore, QualityTier, Recommendation,
    TypeSummary, ValueCount,
};
