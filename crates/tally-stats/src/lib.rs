//! tally-stats - Grouped-frequency statistics
//!
//! This crate turns a raw numeric sample into a frequency table and derives
//! descriptive statistics from the table alone:
//!
//! - **Classify**: fixed-width, half-open classes covering the sample range
//! - **Frequency**: per-class counts, computed in parallel (one task per class)
//! - **Moments**: weighted mean, population standard deviation and
//!   coefficient of variation from (midpoint, frequency) pairs
//!
//! # Grouped data
//!
//! Every statistic here is computed from class midpoints, not from the raw
//! values. The results approximate the sample statistics; the error shrinks
//! with the class width.

pub mod classify;
pub mod error;
pub mod frequency;
pub mod moments;
pub mod reduce;

pub use classify::*;
pub use error::*;
pub use frequency::*;
pub use moments::*;
