//! Adult Report - Adult Income dataset loading, statistics & exploration report
//!
//! The core is a synchronous pair: [`load`] turns a headerless CSV source into
//! a cleaned [`Dataset`], and [`summarize`] derives [`SummaryStatistics`] from it.
//! [`DatasetCache`] memoizes one load for the life of a process.

pub mod charts;
pub mod config;
pub mod data;
pub mod error;
pub mod report;
pub mod stats;

pub use data::{load, parse_csv, CacheState, Dataset, DatasetCache, Income, Record, ADULT_COLUMNS};
pub use error::{DatasetError, ErrorKind};
pub use stats::{summarize, SummaryStatistics};
