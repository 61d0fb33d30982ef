//! Stats module - summary and descriptive statistics

mod calculator;
mod summary;

pub use calculator::{CategoryCount, FeatureStats, StatsCalculator};
pub use summary::{summarize, SummaryStatistics};
