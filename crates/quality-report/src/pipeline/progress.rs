//! Progress reporting for report runs.
//!
//! The pipeline emits a [`ProgressUpdate`] as it enters each stage so that
//! callers (the CLI, tests, an embedding UI) can follow along.

use serde::{Deserialize, Serialize};

/// Stages of a report run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportStage {
    /// Reading the input file
    Loading,
    /// Counting missing values
    MissingValues,
    /// Computing IQR statistics
    Outliers,
    /// Detecting duplicate rows and key values
    Duplicates,
    /// Checking declared types
    DataTypes,
    /// Counting categorical values
    Categorical,
    /// Computing the quality score and recommendations
    Scoring,
    /// Drawing charts
    Charts,
    /// Run completed successfully
    Complete,
    /// Run failed with an error
    Failed,
}

impl ReportStage {
    /// Returns a human-readable name for the stage.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Loading => "Loading",
            Self::MissingValues => "Missing Values Analysis",
            Self::Outliers => "Outlier Analysis",
            Self::Duplicates => "Duplicate Analysis",
            Self::DataTypes => "Data Type Analysis",
            Self::Categorical => "Categorical Values Analysis",
            Self::Scoring => "Scoring",
            Self::Charts => "Chart Rendering",
            Self::Complete => "Complete",
            Self::Failed => "Failed",
        }
    }

    /// Overall progress (0.0 - 1.0) at the start of the stage.
    pub fn base_progress(&self) -> f32 {
        match self {
            Self::Loading => 0.0,
            Self::MissingValues => 0.15,
            Self::Outliers => 0.25,
            Self::Duplicates => 0.40,
            Self::DataTypes => 0.55,
            Self::Categorical => 0.65,
            Self::Scoring => 0.75,
            Self::Charts => 0.80,
            Self::Complete | Self::Failed => 1.0,
        }
    }
}

/// A single progress event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressUpdate {
    /// Current stage
    pub stage: ReportStage,
    /// Overall progress (0.0 - 1.0)
    pub progress: f32,
    /// Human-readable message
    pub message: String,
}

impl ProgressUpdate {
    pub fn new(stage: ReportStage, message: impl Into<String>) -> Self {
        Self {
            stage,
            progress: stage.base_progress(),
            message: message.into(),
        }
    }

    pub fn complete(message: impl Into<String>) -> Self {
        Self::new(ReportStage::Complete, message)
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self::new(ReportStage::Failed, message)
    }
}

/// Receives progress updates from the pipeline.
pub trait ProgressReporter: Send + Sync {
    fn report(&self, update: ProgressUpdate);
}

/// Wrapper that implements [`ProgressReporter`] using a closure.
///
/// # Example
///
/// ```rust,ignore
/// use quality_report::QualityReportPipeline;
///
/// QualityReportPipeline::builder()
///     .on_progress(|update| {
///         println!("[{:.0}%] {}", update.progress * 100.0, update.message);
///     })
///     .build()?
///     .run_file("data.csv")?;
/// ```
pub struct ClosureProgressReporter<F>
where
    F: Fn(ProgressUpdate) + Send + Sync,
{
    callback: F,
}

impl<F> ClosureProgressReporter<F>
where
    F: Fn(ProgressUpdate) + Send + Sync,
{
    pub fn new(callback: F) -> Self {
        Self { callback }
    }
}

impl<F> ProgressReporter for ClosureProgressReporter<F>
where
    F: Fn(ProgressUpdate) + Send + Sync,
{
    fn report(&self, update: ProgressUpdate) {
        (self.callback)(update);
    }
}

static_assertions::assert_impl_all!(ProgressUpdate: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_stage_progress_is_monotone() {
        let stages = [
            ReportStage::Loading,
            ReportStage::MissingValues,
            ReportStage::Outliers,
            ReportStage::Duplicates,
            ReportStage::DataTypes,
            ReportStage::Categorical,
            ReportStage::Scoring,
            ReportStage::Charts,
            ReportStage::Complete,
        ];
        assert!(
            stages
                .windows(2)
                .all(|w| w[0].base_progress() <= w[1].base_progress())
        );
    }

    #[test]
    fn test_closure_reporter_receives_updates() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let reporter = ClosureProgressReporter::new(move |update: ProgressUpdate| {
            sink.lock().unwrap().push(update.stage);
        });

        reporter.report(ProgressUpdate::new(ReportStage::Loading, "loading"));
        reporter.report(ProgressUpdate::complete("done"));

        assert_eq!(
            *seen.lock().unwrap(),
            vec![ReportStage::Loading, ReportStage::Complete]
        );
    }

    #[test]
    fn test_update_serialization() {
        let update = ProgressUpdate::new(ReportStage::MissingValues, "counting");
        let json = serde_json::to_string(&update).unwrap();
        assert!(json.contains("\"missing_values\""));
    }
}
