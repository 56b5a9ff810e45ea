//! Error types for the sounding-skewt crate.
use std::fmt;

/// Error type for the crate.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SkewTError {
    /// A value (surface value, index, level, etc) that is required is not available.
    MissingValue,
    /// Not enough data available for analysis or plotting.
    NotEnoughData,
    /// Bad or invalid input, e.g. parallel profiles with different lengths.
    InvalidInput,
    /// The requested grid point is outside the provider's data grid.
    OutOfGrid {
        /// Requested x index.
        x: usize,
        /// Requested y index.
        y: usize,
    },
    /// Forward an error message from the data provider.
    Provider(String),
}

impl fmt::Display for SkewTError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use SkewTError::*;

        match self {
            MissingValue => write!(f, "Missing value required for analysis."),
            NotEnoughData => write!(f, "Not enough data available for analysis."),
            InvalidInput => write!(f, "Invalid input."),
            OutOfGrid { x, y } => write!(f, "Grid point ({}, {}) is outside the data grid.", x, y),
            Provider(msg) => write!(f, "Error bubbled up from the data provider: {}", msg),
        }
    }
}

impl std::error::Error for SkewTError {}

/// Shorthand for results.
pub type Result<T> = ::std::result::Result<T, SkewTError>;
