//! Static Chart Renderer
//! Writes the figures of the visualizations page as PNG files.
//!
//! Files:
//! 1. `histograms.png`: one panel per numeric feature, mean line + legend
//! 2. `boxplot_numeric.png`: age, education_num, hours_per_week
//! 3. `boxplot_capital.png`: capital_gain, capital_loss
//! 4. `countplots.png`: top values of each categorical feature

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::info;
use plotters::data::Quartiles;
use plotters::prelude::*;

use super::plotter::{
    BoxplotData, ChartPlotter, FeatureHistogram, BOXPLOT_CAPITAL, BOXPLOT_NUMERIC, COUNTPLOT_TOP,
    MEAN_COLOR, PALETTE, PRIMARY_COLOR,
};
use crate::data::Dataset;
use crate::error::DatasetError;
use crate::stats::CategoryCount;

pub const HISTOGRAMS_FILE: &str = "histograms.png";
pub const BOXPLOT_NUMERIC_FILE: &str = "boxplot_numeric.png";
pub const BOXPLOT_CAPITAL_FILE: &str = "boxplot_capital.png";
pub const COUNTPLOTS_FILE: &str = "countplots.png";

/// Every file [`StaticChartRenderer::render_all`] writes, with its caption.
pub const CHART_FILES: [(&str, &str); 4] = [
    (HISTOGRAMS_FILE, "Histograms of Numeric Features with Mean Annotations"),
    (
        BOXPLOT_NUMERIC_FILE,
        "Boxplot of Numeric Features (Excluding Capital-Gain and Capital-Loss)",
    ),
    (BOXPLOT_CAPITAL_FILE, "Boxplot of Capital-Gain and Capital-Loss"),
    (COUNTPLOTS_FILE, "Countplots of Categorical Features"),
];

pub struct StaticChartRenderer {
    width: u32,
    height: u32,
    bins: usize,
}

impl StaticChartRenderer {
    pub fn new(width: u32, height: u32, bins: usize) -> Self {
        Self {
            width,
            height,
            bins,
        }
    }

    /// Render all figures into `out_dir`, creating it if needed.
    ///
    /// Fails with [`DatasetError::EmptyDataset`] before touching `out_dir`
    /// when no record survived cleaning.
    pub fn render_all(&self, dataset: &Dataset, out_dir: &Path) -> Result<Vec<PathBuf>> {
        if dataset.is_empty() {
            return Err(DatasetError::EmptyDataset.into());
        }
        std::fs::create_dir_all(out_dir)
            .with_context(|| format!("creating {}", out_dir.display()))?;

        let mut written = Vec::with_capacity(CHART_FILES.len());

        let path = out_dir.join(HISTOGRAMS_FILE);
        let hists = ChartPlotter::histograms(dataset, self.bins);
        self.draw_histograms(&path, &hists)
            .with_context(|| format!("drawing {}", path.display()))?;
        written.push(path);

        let path = out_dir.join(BOXPLOT_NUMERIC_FILE);
        let data = ChartPlotter::boxplot(dataset, "Numeric Features", &BOXPLOT_NUMERIC);
        self.draw_boxplot(&path, &data)
            .with_context(|| format!("drawing {}", path.display()))?;
        written.push(path);

        let path = out_dir.join(BOXPLOT_CAPITAL_FILE);
        let data = ChartPlotter::boxplot(dataset, "Capital Gain and Loss", &BOXPLOT_CAPITAL);
        self.draw_boxplot(&path, &data)
            .with_context(|| format!("drawing {}", path.display()))?;
        written.push(path);

        let path = out_dir.join(COUNTPLOTS_FILE);
        let frame = dataset.to_dataframe().context("building dataframe")?;
        let counts = ChartPlotter::countplots(&frame, COUNTPLOT_TOP).context("counting categories")?;
        self.draw_countplots(&path, &counts)
            .with_context(|| format!("drawing {}", path.display()))?;
        written.push(path);

        info!("rendered {} charts into {}", written.len(), out_dir.display());
        Ok(written)
    }

    fn draw_histograms(&self, path: &Path, hists: &[FeatureHistogram]) -> Result<()> {
        let root = BitMapBackend::new(path, (self.width, self.height)).into_drawing_area();
        root.fill(&WHITE)?;

        let cols = 3;
        let rows = hists.len().div_ceil(cols).max(1);
        let panels = root.split_evenly((rows, cols));

        for (panel, hist) in panels.iter().zip(hists) {
            if hist.bins.is_empty() {
                continue;
            }
            let (x_min, x_max) = hist.range();
            let y_max = hist.max_count() + hist.max_count() / 10 + 1;

            let mut chart = ChartBuilder::on(panel)
                .caption(hist.feature, ("sans-serif", 20))
                .margin(10)
                .x_label_area_size(30)
                .y_label_area_size(55)
                .build_cartesian_2d(x_min..x_max, 0u32..y_max)?;

            chart
                .configure_mesh()
                .disable_x_mesh()
                .y_desc("Count")
                .draw()?;

            chart.draw_series(hist.bins.iter().map(|b| {
                Rectangle::new(
                    [(b.start, 0u32), (b.end, b.count)],
                    PRIMARY_COLOR.mix(0.6).filled(),
                )
            }))?;

            if let Some(mean) = hist.mean {
                chart
                    .draw_series(std::iter::once(PathElement::new(
                        vec![(mean, 0u32), (mean, y_max)],
                        MEAN_COLOR.stroke_width(2),
                    )))?
                    .label(format!("Mean: {mean:.2}"))
                    .legend(|(x, y)| {
                        PathElement::new(vec![(x, y), (x + 20, y)], MEAN_COLOR.stroke_width(2))
                    });

                chart
                    .configure_series_labels()
                    .position(SeriesLabelPosition::UpperRight)
                    .background_style(WHITE.mix(0.8))
                    .border_style(BLACK)
                    .draw()?;
            }
        }

        root.present()?;
        Ok(())
    }

    fn draw_boxplot(&self, path: &Path, data: &BoxplotData) -> Result<()> {
        let root = BitMapBackend::new(path, (self.width, self.height)).into_drawing_area();
        root.fill(&WHITE)?;

        let labels: Vec<&str> = data.groups.iter().map(|(name, _)| *name).collect();
        let quartiles: Vec<Quartiles> = data
            .groups
            .iter()
            .map(|(_, values)| Quartiles::new(values))
            .collect();

        let (mut lo, mut hi) = (f32::INFINITY, f32::NEG_INFINITY);
        for (q, (_, values)) in quartiles.iter().zip(&data.groups) {
            let [fence_lo, _, _, _, fence_hi] = q.values();
            lo = lo.min(fence_lo);
            hi = hi.max(fence_hi);
            // outliers beyond the fences are drawn as points
            for v in values {
                lo = lo.min(*v as f32);
                hi = hi.max(*v as f32);
            }
        }
        if !lo.is_finite() || !hi.is_finite() {
            (lo, hi) = (0.0, 1.0);
        }
        let pad = ((hi - lo) * 0.05).max(1.0);

        let mut chart = ChartBuilder::on(&root)
            .caption(data.title, ("sans-serif", 26))
            .margin(20)
            .x_label_area_size(40)
            .y_label_area_size(70)
            .build_cartesian_2d(labels[..].into_segmented(), (lo - pad)..(hi + pad))?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .y_desc("Value")
            .draw()?;

        chart.draw_series(labels.iter().zip(&quartiles).enumerate().map(|(i, (label, q))| {
            Boxplot::new_vertical(SegmentValue::CenterOf(label), q)
                .width(60)
                .whisker_width(0.5)
                .style(PALETTE[i % PALETTE.len()])
        }))?;

        for ((label, q), (_, values)) in labels.iter().zip(&quartiles).zip(&data.groups) {
            let [fence_lo, _, _, _, fence_hi] = q.values();
            chart.draw_series(
                values
                    .iter()
                    .map(|v| *v as f32)
                    .filter(|v| *v < fence_lo || *v > fence_hi)
                    .map(|v| Circle::new((SegmentValue::CenterOf(label), v), 2, BLACK.mix(0.4))),
            )?;
        }

        root.present()?;
        Ok(())
    }

    fn draw_countplots(&self, path: &Path, plots: &[(&'static str, Vec<CategoryCount>)]) -> Result<()> {
        let root = BitMapBackend::new(path, (self.width, self.height)).into_drawing_area();
        root.fill(&WHITE)?;

        let cols = 3;
        let rows = plots.len().div_ceil(cols).max(1);
        let panels = root.split_evenly((rows, cols));

        for (panel, (feature, counts)) in panels.iter().zip(plots) {
            if counts.is_empty() {
                continue;
            }
            let n = counts.len() as u32;
            let max = counts.iter().map(|c| c.count).max().unwrap_or(0);
            let labels: Vec<&str> = counts.iter().map(|c| c.value.as_str()).collect();

            let mut chart = ChartBuilder::on(panel)
                .caption(*feature, ("sans-serif", 18))
                .margin(8)
                .x_label_area_size(25)
                .y_label_area_size(140)
                .build_cartesian_2d(0u64..(max + max / 10 + 1), (0u32..n).into_segmented())?;

            chart
                .configure_mesh()
                .disable_y_mesh()
                .y_labels(labels.len())
                .y_label_formatter(&|v| match v {
                    SegmentValue::CenterOf(i) | SegmentValue::Exact(i) => {
                        labels.get(*i as usize).map(|s| s.to_string()).unwrap_or_default()
                    }
                    SegmentValue::Last => String::new(),
                })
                .draw()?;

            chart.draw_series(
                Histogram::horizontal(&chart)
                    .style(PRIMARY_COLOR.mix(0.7).filled())
                    .margin(3)
                    .data(counts.iter().enumerate().map(|(i, c)| (i as u32, c.count))),
            )?;
        }

        root.present()?;
        Ok(())
    }
}
