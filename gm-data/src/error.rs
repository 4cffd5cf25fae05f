//! Error types for parsing and validating the dataset.

use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum DatasetError {
    /// A continent name outside the five Gapminder regions.
    UnknownContinent(String),
    /// A data row (1-based, header excluded) that could not be parsed.
    InvalidRow { row: usize, reason: String },
    /// The dataset has no observations.
    Empty,
}

impl fmt::Display for DatasetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatasetError::UnknownContinent(name) => write!(f, "Unknown continent: {}", name),
            DatasetError::InvalidRow { row, reason } => {
                write!(f, "Invalid row {}: {}", row, reason)
            }
            DatasetError::Empty => write!(f, "Dataset contains no observations"),
        }
    }
}

impl std::error::Error for DatasetError {}
