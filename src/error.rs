//! Error types shared by the loading and statistics layers.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("Source unavailable: {locator}: {reason}")]
    SourceUnavailable { locator: String, reason: String },
    #[error("Schema mismatch on line {line}: expected {expected} fields, found {found}")]
    SchemaMismatch {
        line: u64,
        expected: usize,
        found: usize,
    },
    #[error("Schema mismatch: column list has no '{0}' column")]
    MissingColumn(String),
    #[error("Invalid value on line {line} in column '{column}': {value:?}")]
    InvalidField {
        line: u64,
        column: String,
        value: String,
    },
    #[error("Cannot compute statistics over an empty dataset")]
    EmptyDataset,
}

/// Coarse classification of a [`DatasetError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    SourceUnavailable,
    SchemaMismatch,
    InvalidField,
    EmptyDataset,
}

impl DatasetError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            DatasetError::SourceUnavailable { .. } => ErrorKind::SourceUnavailable,
            DatasetError::SchemaMismatch { .. } | DatasetError::MissingColumn(_) => {
                ErrorKind::SchemaMismatch
            }
            DatasetError::InvalidField { .. } => ErrorKind::InvalidField,
            DatasetError::EmptyDataset => ErrorKind::EmptyDataset,
        }
    }

    pub(crate) fn unavailable(locator: &str, reason: impl std::fmt::Display) -> Self {
        DatasetError::SourceUnavailable {
            locator: locator.to_string(),
            reason: reason.to_string(),
        }
    }
}
