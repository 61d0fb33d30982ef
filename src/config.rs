//! Runtime configuration with built-in defaults.

use std::path::PathBuf;
use std::time::Duration;

use crate::data::{SourceLocator, ADULT_COLUMNS};

/// UCI training split, headerless.
pub const DEFAULT_SOURCE: &str =
    "https://archive.ics.uci.edu/ml/machine-learning-databases/adult/adult.data";
/// Environment variable that overrides [`DEFAULT_SOURCE`].
pub const SOURCE_ENV: &str = "ADULT_REPORT_SOURCE";
pub const DEFAULT_OUTPUT_DIR: &str = "report";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_CHART_SIZE: (u32, u32) = (1500, 1000);
pub const DEFAULT_HISTOGRAM_BINS: usize = 30;

#[derive(Debug, Clone)]
pub struct ReportConfig {
    pub source: String,
    pub columns: Vec<String>,
    pub output_dir: PathBuf,
    pub fetch_timeout: Duration,
    pub chart_size: (u32, u32),
    pub histogram_bins: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            source: DEFAULT_SOURCE.to_string(),
            columns: ADULT_COLUMNS.iter().map(|c| c.to_string()).collect(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            fetch_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            chart_size: DEFAULT_CHART_SIZE,
            histogram_bins: DEFAULT_HISTOGRAM_BINS,
        }
    }
}

impl ReportConfig {
    pub fn locator(&self) -> SourceLocator {
        SourceLocator::parse(&self.source)
    }
}
