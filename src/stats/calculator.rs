//! Statistics Calculator Module
//! Descriptive statistics per numeric feature and value counts per
//! categorical feature.

use polars::prelude::*;
use rayon::prelude::*;
use serde::Serialize;
use statrs::statistics::{Data, Distribution, OrderStatistics};

use crate::data::{Dataset, NumericFeature};
use crate::error::DatasetError;

/// Descriptive statistics for one numeric feature.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureStats {
    pub feature: &'static str,
    pub count: usize,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
    /// Share of records where the feature is exactly zero.
    pub zero_share: f64,
}

impl FeatureStats {
    pub fn iqr(&self) -> f64 {
        self.q3 - self.q1
    }
}

/// One value of a categorical column and how often it occurs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    pub value: String,
    pub count: u64,
}

/// Handles statistical calculations with multi-threading support.
pub struct StatsCalculator;

impl StatsCalculator {
    /// Compute descriptive statistics for an array of values.
    pub fn compute_descriptive_stats(
        feature: &'static str,
        values: &[f64],
    ) -> Result<FeatureStats, DatasetError> {
        let n = values.len();
        if n == 0 {
            return Err(DatasetError::EmptyDataset);
        }

        let mean = values.iter().sum::<f64>() / n as f64;
        let zeros = values.iter().filter(|v| **v == 0.0).count();

        let mut data = Data::new(values.to_vec());
        let std = if n > 1 {
            data.std_dev().unwrap_or(0.0)
        } else {
            0.0
        };
        let q1 = data.lower_quartile();
        let q3 = data.upper_quartile();
        let median = data.median();
        let min = data.order_statistic(1);
        let max = data.order_statistic(n);

        Ok(FeatureStats {
            feature,
            count: n,
            mean,
            std,
            min,
            q1,
            median,
            q3,
            max,
            zero_share: zeros as f64 / n as f64,
        })
    }

    pub fn feature_stats(
        dataset: &Dataset,
        feature: NumericFeature,
    ) -> Result<FeatureStats, DatasetError> {
        Self::compute_descriptive_stats(feature.name(), &dataset.numeric_values(feature))
    }

    /// Compute statistics for every numeric feature in parallel.
    ///
    /// Output follows [`NumericFeature::ALL`] order.
    pub fn all_feature_stats(dataset: &Dataset) -> Result<Vec<FeatureStats>, DatasetError> {
        NumericFeature::ALL
            .par_iter()
            .map(|feature| Self::feature_stats(dataset, *feature))
            .collect()
    }

    /// Value counts of a string column, most frequent first, ties by value.
    pub fn category_counts(df: &DataFrame, column: &str) -> PolarsResult<Vec<CategoryCount>> {
        let grouped = df
            .clone()
            .lazy()
            .group_by([col(column)])
            .agg([len().alias("count")])
            .collect()?;

        let values = grouped.column(column)?.str()?;
        let counts = grouped.column("count")?.cast(&DataType::UInt64)?;
        let counts = counts.u64()?;

        let mut out: Vec<CategoryCount> = values
            .into_iter()
            .zip(counts.into_iter())
            .filter_map(|(v, c)| {
                Some(CategoryCount {
                    value: v?.to_string(),
                    count: c?,
                })
            })
            .collect();

        out.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.value.cmp(&b.value)));
        Ok(out)
    }
}
