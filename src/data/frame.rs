//! Columnar view of a [`Dataset`] for dataframe-style aggregation.

use polars::prelude::*;

use super::model::{CategoricalFeature, Dataset, NumericFeature};

impl Dataset {
    /// Build a polars `DataFrame` with one column per field, named as in
    /// [`ADULT_COLUMNS`](super::model::ADULT_COLUMNS). Numeric columns are `Float64`.
    pub fn to_dataframe(&self) -> PolarsResult<DataFrame> {
        let mut columns: Vec<Column> = Vec::with_capacity(15);

        for feature in NumericFeature::ALL {
            columns.push(Column::new(
                feature.name().into(),
                self.numeric_values(feature),
            ));
        }
        for feature in CategoricalFeature::ALL {
            let values: Vec<&str> = self.records().iter().map(|r| feature.value(r)).collect();
            columns.push(Column::new(feature.name().into(), values));
        }

        DataFrame::new(columns)
    }
}
