//! Pipeline module.
//!
//! This module provides the report pipeline and its progress reporting.

mod builder;
pub mod progress;

pub use builder::{QualityReportPipeline, QualityReportPipelineBuilder, ReportOutput};
pub use progress::{ClosureProgressReporter, ProgressReporter, ProgressUpdate, ReportStage};
