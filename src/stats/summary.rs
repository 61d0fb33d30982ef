//! Headline statistics shown on the report pages.

use serde::{Deserialize, Serialize};

use crate::data::{Dataset, Income};
use crate::error::DatasetError;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SummaryStatistics {
    pub record_count: usize,
    pub mean_age: f64,
    pub mean_education_num: f64,
    pub mean_capital_gain: f64,
    pub mean_capital_loss: f64,
    pub mean_hours_per_week: f64,
    /// Share of records with income `>50K`, in `[0, 1]`.
    pub high_income_share: f64,
}

/// Means and the `>50K` proportion over the whole dataset.
///
/// Sums are accumulated in record order, so the result is bit-for-bit
/// reproducible for a given dataset.
pub fn summarize(dataset: &Dataset) -> Result<SummaryStatistics, DatasetError> {
    if dataset.is_empty() {
        return Err(DatasetError::EmptyDataset);
    }

    let mut age = 0.0;
    let mut education_num = 0.0;
    let mut capital_gain = 0.0;
    let mut capital_loss = 0.0;
    let mut hours = 0.0;
    let mut high_income = 0usize;

    for r in dataset.records() {
        age += r.age as f64;
        education_num += r.education_num as f64;
        capital_gain += r.capital_gain as f64;
        capital_loss += r.capital_loss as f64;
        hours += r.hours_per_week as f64;
        if r.income == Income::Above50K {
            high_income += 1;
        }
    }

    let n = dataset.len() as f64;
    Ok(SummaryStatistics {
        record_count: dataset.len(),
        mean_age: age / n,
        mean_education_num: education_num / n,
        mean_capital_gain: capital_gain / n,
        mean_capital_loss: capital_loss / n,
        mean_hours_per_week: hours / n,
        high_income_share: high_income as f64 / n,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{parse_csv, ADULT_COLUMNS};
    use crate::error::ErrorKind;

    #[test]
    fn empty_dataset_is_an_error() {
        let ds = Dataset::new(Vec::new(), 0);
        let err = summarize(&ds).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::EmptyDataset);
    }

    #[test]
    fn all_rows_dropped_is_an_error() {
        let data = "38, ?, 215646, HS-grad, 9, Divorced, Handlers-cleaners, Not-in-family, White, Male, 0, 0, 40, United-States, <=50K\n";
        let ds = parse_csv(data.as_bytes(), &ADULT_COLUMNS).unwrap();
        assert!(matches!(summarize(&ds), Err(DatasetError::EmptyDataset)));
    }

    #[test]
    fn means_and_share() {
        let data = "\
20, Private, 1, HS-grad, 9, Never-married, Sales, Own-child, White, Female, 0, 0, 20, United-States, <=50K
30, Private, 1, Bachelors, 13, Married-civ-spouse, Sales, Husband, White, Male, 1000, 0, 40, United-States, >50K
40, Private, 1, Masters, 14, Married-civ-spouse, Sales, Husband, White, Male, 0, 200, 60, United-States, <=50K
50, Private, 1, Doctorate, 16, Married-civ-spouse, Sales, Husband, White, Male, 3000, 0, 40, United-States, >50K
";
        let ds = parse_csv(data.as_bytes(), &ADULT_COLUMNS).unwrap();
        let s = summarize(&ds).unwrap();
        assert_eq!(s.record_count, 4);
        assert_eq!(s.mean_age, 35.0);
        assert_eq!(s.mean_education_num, 13.0);
        assert_eq!(s.mean_capital_gain, 1000.0);
        assert_eq!(s.mean_capital_loss, 50.0);
        assert_eq!(s.mean_hours_per_week, 40.0);
        assert_eq!(s.high_income_share, 0.5);
    }
}
