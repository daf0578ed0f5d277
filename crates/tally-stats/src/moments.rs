//! Moments of grouped data
//!
//! Every class contributes its midpoint, weighted by its frequency. The
//! results approximate the moments of the raw sample:
//!
//! - weighted mean: `Σ(m·f) / N`
//! - population standard deviation: `sqrt(Σ f·(m - mean)² / N)`, divided by
//!   `N`, not `N - 1`
//! - coefficient of variation: `std_dev / mean · 100`
//!
//! `N` is the number of observations in the sample, passed in by the caller.

use serde::{Deserialize, Serialize};

use crate::classify::{Bin, Classification};
use crate::error::{StatsError, StatsResult};
use crate::reduce::chunked_sum;

/// Weighted mean of the class midpoints
pub fn weighted_mean(bins: &[Bin], n: usize) -> StatsResult<f64> {
    if n == 0 {
        return Err(StatsError::DivisionByZero {
            quantity: "weighted mean",
        });
    }
    let weighted = chunked_sum(bins, |b| b.midpoint * b.frequency as f64);
    Ok(weighted / n as f64)
}

/// Population standard deviation of grouped data around `mean`
///
/// This is the grouped-data approximation: each observation is replaced by
/// its class midpoint before the deviation is taken.
pub fn population_std_dev(bins: &[Bin], mean: f64, n: usize) -> StatsResult<f64> {
    if n == 0 {
        return Err(StatsError::DivisionByZero {
            quantity: "standard deviation",
        });
    }
    let squares = chunked_sum(bins, |b| {
        let diff = b.midpoint - mean;
        b.frequency as f64 * diff * diff
    });
    Ok((squares / n as f64).sqrt())
}

/// Standard deviation as a percentage of the mean
pub fn coefficient_of_variation(std_dev: f64, mean: f64) -> StatsResult<f64> {
    if mean == 0.0 {
        return Err(StatsError::DivisionByZero {
            quantity: "coefficient of variation",
        });
    }
    Ok(std_dev / mean * 100.0)
}

/// Descriptive statistics of one variable, derived from its classes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VariableStats {
    /// Weighted mean
    pub mean: f64,
    /// Population standard deviation
    pub std_dev: f64,
    /// Coefficient of variation, in percent
    pub coefficient_of_variation: f64,
}

impl VariableStats {
    /// Compute all three statistics from counted bins and `n` observations
    pub fn from_bins(bins: &[Bin], n: usize) -> StatsResult<Self> {
        let mean = weighted_mean(bins, n)?;
        let std_dev = population_std_dev(bins, mean, n)?;
        let coefficient_of_variation = coefficient_of_variation(std_dev, mean)?;

        Ok(Self {
            mean,
            std_dev,
            coefficient_of_variation,
        })
    }

    /// Compute from a counted classification of `n` observations
    pub fn from_classification(classes: &Classification, n: usize) -> StatsResult<Self> {
        Self::from_bins(classes.bins(), n)
    }

    /// Population variance (`std_dev²`)
    pub fn variance(&self) -> f64 {
        self.std_dev * self.std_dev
    }
}
