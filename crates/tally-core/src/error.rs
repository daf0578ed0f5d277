//! Error types for tally-core

use std::fmt;

use tally_io::IoError;
use tally_stats::StatsError;
use thiserror::Error;

use crate::config::ConfigError;

/// Result type alias for tally operations
pub type Result<T> = std::result::Result<T, TallyError>;

/// Main error type for tally operations
#[derive(Error, Debug)]
pub enum TallyError {
    /// Sample file could not be read
    #[error("I/O error: {0}")]
    Io(#[from] IoError),

    /// A stage of one variable's pipeline failed
    #[error("{variable}: {stage} failed: {source}")]
    Variable {
        variable: String,
        stage: Stage,
        #[source]
        source: StatsError,
    },

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    /// The input produced no records
    #[error("No samples read from {path}")]
    NoSamples { path: String },

    /// Worker pool could not be started
    #[error("Failed to build thread pool: {0}")]
    ThreadPool(String),
}

impl TallyError {
    pub(crate) fn variable(variable: &str, stage: Stage, source: StatsError) -> Self {
        Self::Variable {
            variable: variable.to_string(),
            stage,
            source,
        }
    }
}

/// Pipeline stage, for error context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Classify,
    Moments,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Classify => write!(f, "classification"),
            Stage::Moments => write!(f, "moment calculation"),
        }
    }
}
