//! Report rendering module.
//!
//! Turns a [`QualityReport`](crate::types::QualityReport) into its output
//! forms:
//! - a plain-text console report ([`console`])
//! - a standalone HTML document with inline SVG charts ([`html`], [`charts`])
//! - pretty JSON for the `--json` CLI flag and programmatic use
//!
//! # Example
//!
//! ```rust,ignore
//! use quality_report::reporting::{ReportGenerator, html};
//!
//! let generator = ReportGenerator::for_input(Path::new("data.csv"), None);
//! generator.write_html(&html::render(&report, &charts, &config))?;
//! ```

mod charts;
pub mod console;
mod generator;
pub mod html;

pub use charts::ChartRenderer;
pub use generator::ReportGenerator;
pub use html::ReportCharts;
