//! Report pipeline module.
//!
//! This module provides the [`QualityReportPipeline`] struct and builder for
//! orchestrating load, analysis, scoring and chart rendering.

use std::path::Path;
use std::sync::Arc;

use chrono::Local;
use tracing::{error, info};

use crate::config::{ConfigValidationError, ReportConfig};
use crate::error::{Result, ResultExt};
use crate::loader::{Dataset, load_dataset};
use crate::pipeline::progress::{
    ClosureProgressReporter, ProgressReporter, ProgressUpdate, ReportStage,
};
use crate::quality::{
    CategoricalAnalyzer, DuplicateAnalyzer, MissingValueAnalyzer, OutlierAnalyzer, TypeAnalyzer,
};
use crate::reporting::{ChartRenderer, ReportCharts};
use crate::scoring::QualityScorer;
use crate::types::QualityReport;

/// Output of one run: the aggregated report plus its charts.
#[derive(Debug, Clone)]
pub struct ReportOutput {
    pub report: QualityReport,
    pub charts: ReportCharts,
}

/// The data quality report pipeline.
///
/// Use [`QualityReportPipeline::builder()`] to create a pipeline with custom
/// configuration.
///
/// # Example
///
/// ```rust,ignore
/// use quality_report::{QualityReportPipeline, ReportConfig};
///
/// let output = QualityReportPipeline::builder()
///     .config(ReportConfig::builder().iqr_multiplier(3.0).build()?)
///     .build()?
///     .run_file("data.csv")?;
///
/// println!("Score: {}", output.report.quality_score.score);
/// ```
pub struct QualityReportPipeline {
    config: ReportConfig,
    progress_reporter: Option<Arc<dyn ProgressReporter>>,
}

impl QualityReportPipeline {
    /// Create a new pipeline builder.
    pub fn builder() -> QualityReportPipelineBuilder {
        QualityReportPipelineBuilder::default()
    }

    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    /// Load a file and run every analysis on it.
    ///
    /// A load failure aborts the run before any analysis.
    pub fn run_file(&self, path: impl AsRef<Path>) -> Result<ReportOutput> {
        let path = path.as_ref();
        self.report_progress(ProgressUpdate::new(
            ReportStage::Loading,
            format!("Loading '{}'", path.display()),
        ));

        let dataset = match load_dataset(path) {
            Ok(dataset) => dataset,
            Err(e) => {
                self.report_progress(ProgressUpdate::failed(e.to_string()));
                error!("Load error: {}", e);
                return Err(e);
            }
        };

        self.run(&dataset)
    }

    /// Run every analysis on an already loaded dataset.
    pub fn run(&self, dataset: &Dataset) -> Result<ReportOutput> {
        match self.run_internal(dataset) {
            Ok(output) => {
                self.report_progress(ProgressUpdate::complete(format!(
                    "Report complete (score {})",
                    output.report.quality_score.score
                )));
                Ok(output)
            }
            Err(e) => {
                self.report_progress(ProgressUpdate::failed(e.to_string()));
                error!("Pipeline error: {}", e);
                Err(e)
            }
        }
    }

    fn report_progress(&self, update: ProgressUpdate) {
        if let Some(reporter) = &self.progress_reporter {
            reporter.report(update);
        }
    }

    fn run_internal(&self, dataset: &Dataset) -> Result<ReportOutput> {
        let config = &self.config;
        info!(
            "Analyzing '{}' ({} rows x {} columns)",
            dataset.info().filename,
            dataset.rows(),
            dataset.columns()
        );

        self.report_progress(ProgressUpdate::new(
            ReportStage::MissingValues,
            "Counting missing values",
        ));
        let missing =
            MissingValueAnalyzer::analyze(dataset, config).context("Missing value analysis")?;

        self.report_progress(ProgressUpdate::new(
            ReportStage::Outliers,
            "Computing IQR statistics",
        ));
        let outliers = OutlierAnalyzer::analyze(dataset, config).context("Outlier analysis")?;

        self.report_progress(ProgressUpdate::new(
            ReportStage::Duplicates,
            "Detecting duplicates",
        ));
        let duplicates =
            DuplicateAnalyzer::analyze(dataset, config).context("Duplicate analysis")?;

        self.report_progress(ProgressUpdate::new(
            ReportStage::DataTypes,
            "Checking data types",
        ));
        let data_types = TypeAnalyzer::analyze(dataset, config).context("Data type analysis")?;

        self.report_progress(ProgressUpdate::new(
            ReportStage::Categorical,
            "Counting categorical values",
        ));
        let categorical =
            CategoricalAnalyzer::analyze(dataset, config).context("Categorical analysis")?;

        self.report_progress(ProgressUpdate::new(
            ReportStage::Scoring,
            "Scoring data quality",
        ));
        let quality_score = QualityScorer::score(&missing, &duplicates, &outliers, config);
        let recommendations =
            QualityScorer::recommendations(&missing, &duplicates, &outliers, &data_types, config);
        info!(
            "Quality score: {}/100 ({})",
            quality_score.score,
            quality_score.tier.message()
        );

        self.report_progress(ProgressUpdate::new(ReportStage::Charts, "Drawing charts"));
        let matrix = MissingValueAnalyzer::missing_matrix(dataset, config)?;
        let box_plots = OutlierAnalyzer::box_plots(dataset, config)?;
        let charts = ReportCharts {
            missing: ChartRenderer::missing_values_chart(&matrix, config.high_missing_threshold)
                .context("Missing values chart")?,
            outliers: ChartRenderer::outlier_box_plots(&box_plots).context("Outlier boxplots")?,
        };

        let report = QualityReport {
            dataset: dataset.info().clone(),
            generated_at: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            missing,
            outliers,
            duplicates,
            data_types,
            categorical,
            quality_score,
            recommendations,
        };

        Ok(ReportOutput { report, charts })
    }
}

/// Builder for [`QualityReportPipeline`].
#[derive(Default)]
pub struct QualityReportPipelineBuilder {
    config: Option<ReportConfig>,
    progress_reporter: Option<Arc<dyn ProgressReporter>>,
}

impl QualityReportPipelineBuilder {
    /// Set the report configuration.
    pub fn config(mut self, config: ReportConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set a progress reporter.
    pub fn progress_reporter(mut self, reporter: Arc<dyn ProgressReporter>) -> Self {
        self.progress_reporter = Some(reporter);
        self
    }

    /// Receive progress updates through a closure.
    pub fn on_progress<F>(mut self, callback: F) -> Self
    where
        F: Fn(ProgressUpdate) + Send + Sync + 'static,
    {
        self.progress_reporter = Some(Arc::new(ClosureProgressReporter::new(callback)));
        self
    }

    /// Build the pipeline, validating the configuration.
    pub fn build(self) -> std::result::Result<QualityReportPipeline, ConfigValidationError> {
        let config = self.config.unwrap_or_default();
        config.validate()?;

        Ok(QualityReportPipeline {
            config,
            progress_reporter: self.progress_reporter,
        })
    }
}
