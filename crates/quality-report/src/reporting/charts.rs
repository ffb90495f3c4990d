//! Chart rendering for the HTML report.
//!
//! Charts are drawn with [`plotters`] into in-memory SVG documents which the
//! HTML renderer inlines, so the report stays a single self-contained file.

use plotters::coord::ranged1d::SegmentValue;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use crate::error::{QualityError, Result};
use crate::quality::{BoxPlotData, MissingMatrix};
use crate::utils::truncate_chars;

const PRESENT_COLOR: RGBColor = RGBColor(0xff, 0xff, 0xcc);
const MISSING_COLOR: RGBColor = RGBColor(0xbd, 0x00, 0x26);
const CRITICAL_COLOR: RGBColor = RGBColor(0xe7, 0x4c, 0x3c);
const WARNING_COLOR: RGBColor = RGBColor(0xf3, 0x9c, 0x12);
const NORMAL_COLOR: RGBColor = RGBColor(0x34, 0x98, 0xdb);

const PANEL_WIDTH: u32 = 700;
const BOX_PANEL_WIDTH: u32 = 466;
const BOX_PANEL_HEIGHT: u32 = 400;
const BOXES_PER_ROW: usize = 3;

fn draw_err<E: std::fmt::Display>(e: E) -> QualityError {
    QualityError::ChartRendering(e.to_string())
}

fn bar_color(pct: f64) -> RGBColor {
    if pct > 50.0 {
        CRITICAL_COLOR
    } else if pct > 20.0 {
        WARNING_COLOR
    } else {
        NORMAL_COLOR
    }
}

pub struct ChartRenderer;

impl ChartRenderer {
    /// Heatmap of the sampled null mask next to a bar chart of missing
    /// percentage per column, with a dashed reference line at `threshold`.
    pub fn missing_values_chart(matrix: &MissingMatrix, threshold: f64) -> Result<String> {
        let n_cols = matrix.columns.len().max(1);
        let height = (n_cols as u32 * 30).max(600);
        let mut svg = String::new();

        {
            let root = SVGBackend::with_string(&mut svg, (PANEL_WIDTH * 2, height))
                .into_drawing_area();
            root.fill(&WHITE).map_err(draw_err)?;
            let (left, right) = root.split_horizontally(PANEL_WIDTH);

            Self::draw_heatmap(&left, matrix)?;
            Self::draw_missing_bars(&root, &right, matrix, threshold)?;

            root.present().map_err(draw_err)?;
        }

        Ok(svg)
    }

    fn draw_heatmap<DB: DrawingBackend>(
        area: &DrawingArea<DB, plotters::coord::Shift>,
        matrix: &MissingMatrix,
    ) -> Result<()> {
        let n_cols = matrix.columns.len() as i32;
        let n_rows = matrix.rows.len().max(1) as f64;
        let names: Vec<String> = matrix
            .columns
            .iter()
            .map(|c| truncate_chars(c, 12))
            .collect();

        let mut chart = ChartBuilder::on(area)
            .caption(
                format!("Missing Values Heatmap (sample of {} rows)", matrix.rows.len()),
                ("sans-serif", 18),
            )
            .margin(15)
            .x_label_area_size(70)
            .y_label_area_size(40)
            .build_cartesian_2d((0..n_cols).into_segmented(), 0f64..n_rows)
            .map_err(draw_err)?;

        chart
            .configure_mesh()
            .disable_mesh()
            .x_labels(matrix.columns.len())
            .x_label_formatter(&|v: &SegmentValue<i32>| match v {
                SegmentValue::CenterOf(i) => names.get(*i as usize).cloned().unwrap_or_default(),
                _ => String::new(),
            })
            .y_label_formatter(&|_| String::new())
            .x_desc("Columns")
            .y_desc("Rows")
            .draw()
            .map_err(draw_err)?;

        let cells = matrix.cells.iter().enumerate().flat_map(|(r, row)| {
            // First sampled row at the top
            let y_top = n_rows - r as f64;
            row.iter().enumerate().map(move |(c, &missing)| {
                let color = if missing { MISSING_COLOR } else { PRESENT_COLOR };
                Rectangle::new(
                    [
                        (SegmentValue::Exact(c as i32), y_top - 1.0),
                        (SegmentValue::Exact(c as i32 + 1), y_top),
                    ],
                    color.filled(),
                )
            })
        });
        chart.draw_series(cells).map_err(draw_err)?;

        Ok(())
    }

    fn draw_missing_bars<DB: DrawingBackend>(
        root: &DrawingArea<DB, plotters::coord::Shift>,
        area: &DrawingArea<DB, plotters::coord::Shift>,
        matrix: &MissingMatrix,
        threshold: f64,
    ) -> Result<()> {
        let n_cols = matrix.columns.len() as i32;
        let names: Vec<String> = matrix
            .columns
            .iter()
            .map(|c| truncate_chars(c, 20))
            .collect();

        let mut chart = ChartBuilder::on(area)
            .caption("Missing Values by Column", ("sans-serif", 18))
            .margin(15)
            .x_label_area_size(40)
            .y_label_area_size(150)
            .build_cartesian_2d(0f64..110f64, (0..n_cols).into_segmented())
            .map_err(draw_err)?;

        chart
            .configure_mesh()
            .disable_y_mesh()
            .y_labels(matrix.columns.len())
            .y_label_formatter(&|v: &SegmentValue<i32>| match v {
                SegmentValue::CenterOf(i) => names.get(*i as usize).cloned().unwrap_or_default(),
                _ => String::new(),
            })
            .x_desc("Missing %")
            .draw()
            .map_err(draw_err)?;

        chart
            .draw_series(matrix.column_pct.iter().enumerate().map(|(i, &pct)| {
                Rectangle::new(
                    [
                        (0.0, SegmentValue::Exact(i as i32)),
                        (pct, SegmentValue::Exact(i as i32 + 1)),
                    ],
                    bar_color(pct).filled(),
                )
            }))
            .map_err(draw_err)?;

        chart
            .draw_series(
                matrix
                    .column_pct
                    .iter()
                    .enumerate()
                    .filter(|(_, pct)| **pct > 0.0)
                    .map(|(i, &pct)| {
                        Text::new(
                            format!("{:.1}%", pct),
                            (pct + 1.0, SegmentValue::CenterOf(i as i32)),
                            ("sans-serif", 11).into_font(),
                        )
                    }),
            )
            .map_err(draw_err)?;

        // Dashed reference line, drawn in pixel space
        let (x, top) = chart.backend_coord(&(threshold, SegmentValue::Exact(n_cols)));
        let (_, bottom) = chart.backend_coord(&(threshold, SegmentValue::Exact(0)));
        let line_style = CRITICAL_COLOR.mix(0.5).stroke_width(2);
        let mut y = top;
        while y < bottom {
            let end = (y + 8).min(bottom);
            root.draw(&PathElement::new(vec![(x, y), (x, end)], line_style))
                .map_err(draw_err)?;
            y += 14;
        }
        root.draw(&Text::new(
            format!("{}% threshold", threshold),
            (x - 4, top + 4),
            TextStyle::from(("sans-serif", 12).into_font())
                .color(&CRITICAL_COLOR)
                .pos(Pos::new(HPos::Right, VPos::Top)),
        ))
        .map_err(draw_err)?;

        Ok(())
    }

    /// One boxplot per numeric column, three per row. Returns `None` when
    /// there is nothing to plot.
    pub fn outlier_box_plots(plots: &[BoxPlotData]) -> Result<Option<String>> {
        if plots.is_empty() {
            return Ok(None);
        }

        let grid_rows = plots.len().div_ceil(BOXES_PER_ROW);
        let width = BOX_PANEL_WIDTH * BOXES_PER_ROW as u32;
        let height = BOX_PANEL_HEIGHT * grid_rows as u32 + 50;
        let mut svg = String::new();

        {
            let root = SVGBackend::with_string(&mut svg, (width, height)).into_drawing_area();
            root.fill(&WHITE).map_err(draw_err)?;
            let body = root
                .titled(
                    "Outlier Detection: Boxplots of Numeric Columns",
                    ("sans-serif", 22),
                )
                .map_err(draw_err)?;

            let panels = body.split_evenly((grid_rows, BOXES_PER_ROW));
            for (panel, plot) in panels.iter().zip(plots) {
                Self::draw_box(panel, plot)?;
            }

            root.present().map_err(draw_err)?;
        }

        Ok(Some(svg))
    }

    fn draw_box<DB: DrawingBackend>(
        panel: &DrawingArea<DB, plotters::coord::Shift>,
        plot: &BoxPlotData,
    ) -> Result<()> {
        let low = plot
            .outliers
            .first()
            .copied()
            .unwrap_or(plot.whisker_low)
            .min(plot.whisker_low);
        let high = plot
            .outliers
            .last()
            .copied()
            .unwrap_or(plot.whisker_high)
            .max(plot.whisker_high);
        let pad = ((high - low) * 0.08).max(0.5);

        let mut chart = ChartBuilder::on(panel)
            .caption(truncate_chars(&plot.column, 25), ("sans-serif", 15))
            .margin(12)
            .x_label_area_size(10)
            .y_label_area_size(55)
            .build_cartesian_2d(0f64..2f64, (low - pad)..(high + pad))
            .map_err(draw_err)?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(0)
            .y_desc("Value")
            .draw()
            .map_err(draw_err)?;

        chart
            .draw_series(std::iter::once(Rectangle::new(
                [(0.7, plot.q1), (1.3, plot.q3)],
                NORMAL_COLOR.mix(0.7).filled(),
            )))
            .map_err(draw_err)?;

        let lines = [
            vec![(0.7, plot.median), (1.3, plot.median)],
            vec![(1.0, plot.q3), (1.0, plot.whisker_high)],
            vec![(1.0, plot.q1), (1.0, plot.whisker_low)],
            vec![(0.85, plot.whisker_high), (1.15, plot.whisker_high)],
            vec![(0.85, plot.whisker_low), (1.15, plot.whisker_low)],
        ];
        chart
            .draw_series(
                lines
                    .into_iter()
                    .map(|points| PathElement::new(points, BLACK.stroke_width(1))),
            )
            .map_err(draw_err)?;

        chart
            .draw_series(
                plot.outliers
                    .iter()
                    .map(|&v| Circle::new((1.0, v), 3, CRITICAL_COLOR.mix(0.5).filled())),
            )
            .map_err(draw_err)?;

        let (w, _) = panel.dim_in_pixel();
        let outlier_count = plot.outliers.len();
        let style = TextStyle::from(("sans-serif", 12).into_font())
            .pos(Pos::new(HPos::Right, VPos::Top));
        panel
            .draw(&Text::new(
                format!("n={}", crate::utils::format_thousands(plot.count)),
                (w as i32 - 16, 34),
                style.clone(),
            ))
            .map_err(draw_err)?;
        panel
            .draw(&Text::new(
                format!("Outliers: {}", outlier_count),
                (w as i32 - 16, 50),
                style,
            ))
            .map_err(draw_err)?;

        Ok(())
    }
}
