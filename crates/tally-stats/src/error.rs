//! Error types for tally-stats

use thiserror::Error;

/// Errors raised while classifying a sample or deriving its moments
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StatsError {
    /// The sample has no values, so no range can be derived
    #[error("cannot classify an empty sample")]
    EmptyInput,

    /// Class width must be finite and strictly positive
    #[error("invalid class width: {0}")]
    InvalidWidth(f64),

    /// NaN or infinite value in the sample
    #[error("non-finite value {value} at index {index}")]
    NonFinite { index: usize, value: f64 },

    /// The range spans more than [`MAX_CLASSES`](crate::MAX_CLASSES) classes
    #[error("range needs {count} classes, more than the limit of {limit}")]
    TooManyClasses { count: f64, limit: usize },

    /// Class edges collapse at this magnitude, so classes would be empty
    #[error("class width {width} is below the precision of values near {value}")]
    PrecisionLoss { width: f64, value: f64 },

    /// A divisor (observation count or mean) is zero
    #[error("division by zero while computing {quantity}")]
    DivisionByZero { quantity: &'static str },
}

/// Result type for statistics operations
pub type StatsResult<T> = Result<T, StatsError>;
