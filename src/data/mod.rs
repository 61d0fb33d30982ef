//! Data module - dataset loading, cleaning and caching
//!
//! ```text
//!   Source (file / http / memory)
//!        │ fetch
//!        ▼
//!   loader  ── drop rows with '?', normalize income ──▶ Dataset
//!        │
//!        ▼
//!   DatasetCache  (Uninitialized → Loading → Ready)
//! ```

mod cache;
mod frame;
mod loader;
mod model;
mod source;

pub use cache::{CacheState, DatasetCache};
pub use loader::{load, parse_csv, MISSING_SENTINEL};
pub use model::{CategoricalFeature, Dataset, Income, NumericFeature, Record, ADULT_COLUMNS};
pub use source::{FileSource, HttpSource, MemorySource, Source, SourceLocator};
