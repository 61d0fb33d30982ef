//! Chart Plotter Module
//! Prepares the data behind each figure: histogram bins, boxplot groups and
//! countplot value counts.

use plotters::style::RGBColor;
use polars::prelude::{DataFrame, PolarsResult};

use crate::data::{CategoricalFeature, Dataset, NumericFeature};
use crate::stats::{CategoryCount, StatsCalculator};

/// Fill colour for histogram bars and the first boxplot.
pub const PRIMARY_COLOR: RGBColor = RGBColor(52, 152, 219); // Blue
/// Mean annotation line.
pub const MEAN_COLOR: RGBColor = RGBColor(231, 76, 60); // Red

pub const PALETTE: [RGBColor; 6] = [
    RGBColor(52, 152, 219),  // Blue
    RGBColor(46, 204, 113),  // Green
    RGBColor(155, 89, 182),  // Purple
    RGBColor(243, 156, 18),  // Orange
    RGBColor(26, 188, 156),  // Teal
    RGBColor(96, 125, 139),  // Blue Grey
];

/// Features shown together on the numeric boxplot. `fnlwgt` is left out
/// because its scale flattens the others.
pub const BOXPLOT_NUMERIC: [NumericFeature; 3] = [
    NumericFeature::Age,
    NumericFeature::EducationNum,
    NumericFeature::HoursPerWeek,
];

pub const BOXPLOT_CAPITAL: [NumericFeature; 2] =
    [NumericFeature::CapitalGain, NumericFeature::CapitalLoss];

/// Bars kept per countplot.
pub const COUNTPLOT_TOP: usize = 12;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistogramBin {
    pub start: f64,
    pub end: f64,
    pub count: u32,
}

/// Equal-width bins over one numeric feature, plus its mean.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureHistogram {
    pub feature: &'static str,
    pub bins: Vec<HistogramBin>,
    pub mean: Option<f64>,
}

impl FeatureHistogram {
    /// Bin `values` into `bins` equal-width bins over `[min, max]`.
    ///
    /// The last bin is closed so `max` lands in it. Constant input yields a
    /// single bin of width 1.
    pub fn from_values(feature: &'static str, values: &[f64], bins: usize) -> Self {
        if values.is_empty() || bins == 0 {
            return Self {
                feature,
                bins: Vec::new(),
                mean: None,
            };
        }

        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let mean = values.iter().sum::<f64>() / values.len() as f64;

        if max <= min {
            return Self {
                feature,
                bins: vec![HistogramBin {
                    start: min,
                    end: min + 1.0,
                    count: values.len() as u32,
                }],
                mean: Some(mean),
            };
        }

        let width = (max - min) / bins as f64;
        let mut counts = vec![0u32; bins];
        for &v in values {
            let idx = (((v - min) / width).floor() as usize).min(bins - 1);
            counts[idx] += 1;
        }

        let bins = counts
            .into_iter()
            .enumerate()
            .map(|(i, count)| HistogramBin {
                start: min + i as f64 * width,
                end: if i + 1 == bins {
                    max
                } else {
                    min + (i + 1) as f64 * width
                },
                count,
            })
            .collect();

        Self {
            feature,
            bins,
            mean: Some(mean),
        }
    }

    pub fn max_count(&self) -> u32 {
        self.bins.iter().map(|b| b.count).max().unwrap_or(0)
    }

    pub fn total(&self) -> u64 {
        self.bins.iter().map(|b| b.count as u64).sum()
    }

    /// X extent covered by the bins; `(0, 1)` when there are none.
    pub fn range(&self) -> (f64, f64) {
        match (self.bins.first(), self.bins.last()) {
            (Some(first), Some(last)) => (first.start, last.end),
            _ => (0.0, 1.0),
        }
    }
}

/// Values of several numeric features, one group per box.
#[derive(Debug, Clone)]
pub struct BoxplotData {
    pub title: &'static str,
    pub groups: Vec<(&'static str, Vec<f64>)>,
}

/// Builds the data behind every figure of the visualizations page.
pub struct ChartPlotter;

impl ChartPlotter {
    pub fn histograms(dataset: &Dataset, bins: usize) -> Vec<FeatureHistogram> {
        NumericFeature::ALL
            .iter()
            .map(|f| FeatureHistogram::from_values(f.name(), &dataset.numeric_values(*f), bins))
            .collect()
    }

    pub fn boxplot(dataset: &Dataset, title: &'static str, features: &[NumericFeature]) -> BoxplotData {
        BoxplotData {
            title,
            groups: features
                .iter()
                .map(|f| (f.name(), dataset.numeric_values(*f)))
                .collect(),
        }
    }

    /// Top value counts for every categorical feature.
    pub fn countplots(
        df: &DataFrame,
        top: usize,
    ) -> PolarsResult<Vec<(&'static str, Vec<CategoryCount>)>> {
        CategoricalFeature::ALL
            .iter()
            .map(|f| {
                let mut counts = StatsCalculator::category_counts(df, f.name())?;
                counts.truncate(top);
                Ok((f.name(), counts))
            })
            .collect()
    }
}
