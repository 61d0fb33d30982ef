use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Column order of the headerless `adult.data` file.
pub const ADULT_COLUMNS: [&str; 15] = [
    "age",
    "workclass",
    "fnlwgt",
    "education",
    "education_num",
    "marital_status",
    "occupation",
    "relationship",
    "race",
    "sex",
    "capital_gain",
    "capital_loss",
    "hours_per_week",
    "native_country",
    "income",
];

// ---------------------------------------------------------------------------
// Income: the binary target label
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Income {
    #[serde(rename = "<=50K")]
    AtMost50K,
    #[serde(rename = ">50K")]
    Above50K,
}

impl Income {
    pub fn as_str(&self) -> &'static str {
        match self {
            Income::AtMost50K => "<=50K",
            Income::Above50K => ">50K",
        }
    }
}

impl fmt::Display for Income {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Income {
    type Err = ();

    /// Accepts the training-split labels and the test-split spelling with a
    /// trailing period. Surrounding whitespace is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        match s.strip_suffix('.').unwrap_or(s) {
            "<=50K" => Ok(Income::AtMost50K),
            ">50K" => Ok(Income::Above50K),
            _ => Err(()),
        }
    }
}

// ---------------------------------------------------------------------------
// Record: one cleaned row
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub age: u32,
    pub workclass: String,
    pub fnlwgt: u64,
    pub education: String,
    pub education_num: u32,
    pub marital_status: String,
    pub occupation: String,
    pub relationship: String,
    pub race: String,
    pub sex: String,
    pub capital_gain: u64,
    pub capital_loss: u64,
    pub hours_per_week: u32,
    pub native_country: String,
    pub income: Income,
}

// ---------------------------------------------------------------------------
// Feature accessors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumericFeature {
    Age,
    Fnlwgt,
    EducationNum,
    CapitalGain,
    CapitalLoss,
    HoursPerWeek,
}

impl NumericFeature {
    pub const ALL: [NumericFeature; 6] = [
        NumericFeature::Age,
        NumericFeature::Fnlwgt,
        NumericFeature::EducationNum,
        NumericFeature::CapitalGain,
        NumericFeature::CapitalLoss,
        NumericFeature::HoursPerWeek,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            NumericFeature::Age => "age",
            NumericFeature::Fnlwgt => "fnlwgt",
            NumericFeature::EducationNum => "education_num",
            NumericFeature::CapitalGain => "capital_gain",
            NumericFeature::CapitalLoss => "capital_loss",
            NumericFeature::HoursPerWeek => "hours_per_week",
        }
    }

    pub fn value(&self, record: &Record) -> f64 {
        match self {
            NumericFeature::Age => record.age as f64,
            NumericFeature::Fnlwgt => record.fnlwgt as f64,
            NumericFeature::EducationNum => record.education_num as f64,
            NumericFeature::CapitalGain => record.capital_gain as f64,
            NumericFeature::CapitalLoss => record.capital_loss as f64,
            NumericFeature::HoursPerWeek => record.hours_per_week as f64,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CategoricalFeature {
    Workclass,
    Education,
    MaritalStatus,
    Occupation,
    Relationship,
    Race,
    Sex,
    NativeCountry,
    Income,
}

impl CategoricalFeature {
    pub const ALL: [CategoricalFeature; 9] = [
        CategoricalFeature::Workclass,
        CategoricalFeature::Education,
        CategoricalFeature::MaritalStatus,
        CategoricalFeature::Occupation,
        CategoricalFeature::Relationship,
        CategoricalFeature::Race,
        CategoricalFeature::Sex,
        CategoricalFeature::NativeCountry,
        CategoricalFeature::Income,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            CategoricalFeature::Workclass => "workclass",
            CategoricalFeature::Education => "education",
            CategoricalFeature::MaritalStatus => "marital_status",
            CategoricalFeature::Occupation => "occupation",
            CategoricalFeature::Relationship => "relationship",
            CategoricalFeature::Race => "race",
            CategoricalFeature::Sex => "sex",
            CategoricalFeature::NativeCountry => "native_country",
            CategoricalFeature::Income => "income",
        }
    }

    pub fn value<'a>(&self, record: &'a Record) -> &'a str {
        match self {
            CategoricalFeature::Workclass => &record.workclass,
            CategoricalFeature::Education => &record.education,
            CategoricalFeature::MaritalStatus => &record.marital_status,
            CategoricalFeature::Occupation => &record.occupation,
            CategoricalFeature::Relationship => &record.relationship,
            CategoricalFeature::Race => &record.race,
            CategoricalFeature::Sex => &record.sex,
            CategoricalFeature::NativeCountry => &record.native_country,
            CategoricalFeature::Income => record.income.as_str(),
        }
    }
}

// ---------------------------------------------------------------------------
// Dataset: the cleaned table
// ---------------------------------------------------------------------------

/// Cleaned, ordered records plus bookkeeping about what was dropped.
///
/// Immutable once built: there are no `&mut self` methods.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    records: Vec<Record>,
    rows_read: usize,
}

impl Dataset {
    /// `rows_read` counts every data row seen in the source, kept or not.
    pub fn new(records: Vec<Record>, rows_read: usize) -> Self {
        debug_assert!(records.len() <= rows_read);
        Self { records, rows_read }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn rows_read(&self) -> usize {
        self.rows_read
    }

    /// Rows excluded because at least one field was missing.
    pub fn rows_dropped(&self) -> usize {
        self.rows_read.saturating_sub(self.records.len())
    }

    /// All values of a numeric feature, in record order.
    pub fn numeric_values(&self, feature: NumericFeature) -> Vec<f64> {
        self.records.iter().map(|r| feature.value(r)).collect()
    }
}
