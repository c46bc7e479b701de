//! @ai:module:intent Chart rendering for aggregate and normalized metrics
//! @ai:module:layer infrastructure
//! @ai:module:public_api ChartGenerator, ChartGeneratorTrait
//! @ai:module:stateless true

use crate::catalog::MetricDefinition;
use crate::config::ChartConfig;
use crate::error::{Error, Result};
use crate::metrics::AnalysisResults;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::path::Path;

/// File name of the grid with one panel per metric.
pub const GRID_CHART_FILE: &str = "all_metrics_comparison.png";
/// File name of the grouped chart of normalized means.
pub const NORMALIZED_CHART_FILE: &str = "all_metrics_normalized.png";

const GRID_COLUMNS: usize = 3;

type DrawResult = std::result::Result<(), Box<dyn std::error::Error>>;

/// @ai:intent Trait for chart generation
pub trait ChartGeneratorTrait: Send + Sync {
    /// @ai:intent Generate all enabled charts, returning the file names written
    fn generate_all(&self, results: &AnalysisResults, output_dir: &Path) -> Result<Vec<String>>;
}

/// @ai:intent Renders bar charts from precomputed aggregates, never recomputing values
pub struct ChartGenerator {
    config: ChartConfig,
}

impl ChartGenerator {
    /// @ai:intent Create a chart generator
    /// @ai:effects pure
    pub fn new(config: ChartConfig) -> Self {
        Self { config }
    }

    /// @ai:intent Per-metric chart file name, e.g. `speed_index.png`
    /// @ai:effects pure
    pub fn metric_file_name(metric: &MetricDefinition) -> String {
        format!("{}.png", metric.file_stem())
    }

    /// @ai:intent Draw one metric's mean per framework onto an area
    /// @ai:effects pure (draws in memory)
    fn draw_metric_panel(
        area: &DrawingArea<BitMapBackend<'_>, Shift>,
        results: &AnalysisResults,
        metric: &MetricDefinition,
        caption_size: u32,
    ) -> DrawResult {
        let bars: Vec<(String, Option<f64>)> = results
            .aggregates
            .iter()
            .map(|a| (capitalize(&a.framework), a.mean(&metric.key)))
            .collect();

        let count = bars.len().max(1) as i32;
        let top = bars.iter().filter_map(|(_, v)| *v).fold(0.0, f64::max);
        let y_max = if top > 0.0 { top * 1.15 } else { 1.0 };

        let mut chart = ChartBuilder::on(area)
            .caption(&metric.display_name, ("sans-serif", caption_size))
            .margin(15)
            .x_label_area_size(35)
            .y_label_area_size(60)
            .build_cartesian_2d((0..count).into_segmented(), 0f64..y_max)?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .y_desc(format!("Time ({})", metric.unit))
            .x_labels(bars.len() + 1)
            .x_label_formatter(&|x| match x {
                SegmentValue::CenterOf(i) => bars
                    .get(*i as usize)
                    .map(|(name, _)| name.clone())
                    .unwrap_or_default(),
                _ => String::new(),
            })
            .draw()?;

        chart.draw_series(bars.iter().enumerate().filter_map(|(i, (_, mean))| {
            mean.map(|v| {
                let mut bar = Rectangle::new(
                    [
                        (SegmentValue::Exact(i as i32), 0.0),
                        (SegmentValue::Exact(i as i32 + 1), v),
                    ],
                    palette(i).mix(0.85).filled(),
                );
                bar.set_margin(0, 0, 12, 12);
                bar
            })
        }))?;

        let label_style = TextStyle::from(("sans-serif", 15).into_font())
            .pos(Pos::new(HPos::Center, VPos::Bottom));

        chart.draw_series(bars.iter().enumerate().filter_map(|(i, (_, mean))| {
            mean.map(|v| {
                Text::new(
                    format!("{:.1}", v),
                    (SegmentValue::CenterOf(i as i32), v),
                    label_style.clone(),
                )
            })
        }))?;

        Ok(())
    }

    /// @ai:intent Generate one bar chart per metric
    /// @ai:effects fs:write
    fn generate_metric_chart(
        &self,
        results: &AnalysisResults,
        metric: &MetricDefinition,
        output_path: &Path,
    ) -> DrawResult {
        let root =
            BitMapBackend::new(output_path, (self.config.width, self.config.height)).into_drawing_area();
        root.fill(&WHITE)?;

        Self::draw_metric_panel(&root, results, metric, 25)?;

        root.present()?;
        Ok(())
    }

    /// @ai:intent Generate a grid with one panel per metric
    /// @ai:effects fs:write
    fn generate_grid_chart(&self, results: &AnalysisResults, output_path: &Path) -> DrawResult {
        let rows = results.metrics.len().div_ceil(GRID_COLUMNS).max(1);
        let size = (GRID_COLUMNS as u32 * 600, rows as u32 * 400 + 60);

        let root = BitMapBackend::new(output_path, size).into_drawing_area();
        root.fill(&WHITE)?;

        let body = root.titled(
            "Framework Performance Comparison - All Metrics",
            ("sans-serif", 32),
        )?;
        let panels = body.split_evenly((rows, GRID_COLUMNS));

        for (metric, panel) in results.metrics.iter().zip(panels.iter()) {
            Self::draw_metric_panel(panel, results, metric, 20)?;
        }

        root.present()?;
        Ok(())
    }

    /// @ai:intent Grouped bars of normalized means, one group per metric
    /// @ai:effects fs:write
    fn generate_normalized_chart(&self, results: &AnalysisResults, output_path: &Path) -> DrawResult {
        let table = &results.normalized;
        let frameworks = &table.frameworks;
        let group = frameworks.len() + 1;
        let metric_count = results.metrics.len();
        let slots = (metric_count * group).max(1) as i32;

        let labels: Vec<String> = results.metrics.iter().map(short_label).collect();

        let root = BitMapBackend::new(output_path, (1200, 600)).into_drawing_area();
        root.fill(&WHITE)?;

        let mut chart = ChartBuilder::on(&root)
            .caption(
                "All Metrics by Framework (Normalized)",
                ("sans-serif", 28),
            )
            .margin(20)
            .x_label_area_size(45)
            .y_label_area_size(60)
            .build_cartesian_2d((0..slots).into_segmented(), 0f64..1.05f64)?;

        // Label only the middle slot of each group.
        let label_slot = frameworks.len() / 2;
        chart
            .configure_mesh()
            .disable_x_mesh()
            .y_desc("Normalized Value (0-1)")
            .x_desc("Metrics")
            .x_labels(slots as usize + 1)
            .x_label_formatter(&|x| match x {
                SegmentValue::CenterOf(slot) if *slot as usize % group == label_slot => labels
                    .get(*slot as usize / group)
                    .cloned()
                    .unwrap_or_default(),
                _ => String::new(),
            })
            .draw()?;

        for (j, framework) in frameworks.iter().enumerate() {
            let color = palette(j);
            let row = table.row(framework);

            chart
                .draw_series(row.into_iter().enumerate().map(|(m, value)| {
                    let slot = (m * group + j) as i32;
                    Rectangle::new(
                        [(SegmentValue::Exact(slot), 0.0), (SegmentValue::Exact(slot + 1), value)],
                        color.filled(),
                    )
                }))?
                .label(capitalize(framework))
                .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 20, y + 5)], color.filled()));
        }

        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .background_style(WHITE.mix(0.9))
            .border_style(BLACK)
            .draw()?;

        root.present()?;
        Ok(())
    }
}

impl Default for ChartGenerator {
    fn default() -> Self {
        Self::new(ChartConfig::default())
    }
}

impl ChartGeneratorTrait for ChartGenerator {
    /// @ai:intent Generate all enabled charts
    /// @ai:effects fs:write
    fn generate_all(&self, results: &AnalysisResults, output_dir: &Path) -> Result<Vec<String>> {
        std::fs::create_dir_all(output_dir)?;

        let mut generated = Vec::new();

        if self.config.per_metric {
            tracing::info!("Creating individual metric charts...");
            for metric in &results.metrics {
                let name = Self::metric_file_name(metric);
                let path = output_dir.join(&name);
                self.generate_metric_chart(results, metric, &path)
                    .map_err(|e| chart_error(&path, e))?;
                tracing::info!("Chart saved: {}", path.display());
                generated.push(name);
            }
        }

        if self.config.grid {
            let path = output_dir.join(GRID_CHART_FILE);
            self.generate_grid_chart(results, &path)
                .map_err(|e| chart_error(&path, e))?;
            tracing::info!("Comparison chart saved: {}", path.display());
            generated.push(GRID_CHART_FILE.to_string());
        }

        if self.config.normalized {
            let path = output_dir.join(NORMALIZED_CHART_FILE);
            self.generate_normalized_chart(results, &path)
                .map_err(|e| chart_error(&path, e))?;
            tracing::info!("Normalized chart saved: {}", path.display());
            generated.push(NORMALIZED_CHART_FILE.to_string());
        }

        Ok(generated)
    }
}

fn chart_error(path: &Path, e: Box<dyn std::error::Error>) -> Error {
    Error::Chart(format!("{}: {}", path.display(), e))
}

/// Bar color per framework position; the first three match the classic react/vue/angular scheme.
fn palette(index: usize) -> RGBColor {
    const COLORS: [RGBColor; 6] = [
        RGBColor(231, 76, 60),
        RGBColor(52, 152, 219),
        RGBColor(46, 204, 113),
        RGBColor(155, 89, 182),
        RGBColor(241, 196, 15),
        RGBColor(127, 140, 141),
    ];
    COLORS[index % COLORS.len()]
}

fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Abbreviation in trailing parentheses ("Speed Index (SI)" -> "SI"), else the full name.
fn short_label(metric: &MetricDefinition) -> String {
    let name = metric.display_name.trim();

    name.strip_suffix(')')
        .and_then(|rest| rest.rsplit_once('('))
        .map(|(_, abbr)| abbr.to_string())
        .unwrap_or_else(|| name.to_string())
}
