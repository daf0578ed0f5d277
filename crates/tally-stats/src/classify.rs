//! Fixed-width classes (bins) covering a sample's range
//!
//! A classification for width `w` starts at `floor(min / w) * w` and ends at
//! `ceil(max / w) * w`. Classes are half-open, `[lower, upper)`, contiguous
//! and non-overlapping.
//!
//! # Edge policy
//!
//! - The number of classes is computed from the range, never by repeatedly
//!   adding `w` to a running edge. Class `i` spans
//!   `[start + i*w, start + (i+1)*w)`, so neighbouring classes share
//!   bit-identical edges.
//! - When the maximum lies exactly on the upper grid edge (`max` a multiple
//!   of `w`), one more class is appended so the maximum is counted instead
//!   of falling off the half-open end.
//! - A sample whose values are all equal to one grid point gets a single
//!   class centred on that value.

use serde::{Deserialize, Serialize};

use crate::error::{StatsError, StatsResult};

/// Upper limit on the number of classes in one classification
pub const MAX_CLASSES: usize = 1_000_000;

/// A half-open class `[lower, upper)` and the number of values inside it
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bin {
    /// Inclusive lower bound
    pub lower: f64,
    /// Exclusive upper bound
    pub upper: f64,
    /// `(lower + upper) / 2`
    pub midpoint: f64,
    /// Number of values in `[lower, upper)`
    pub frequency: usize,
}

impl Bin {
    /// Create an empty class
    pub fn new(lower: f64, upper: f64) -> Self {
        Self {
            lower,
            upper,
            midpoint: (lower + upper) / 2.0,
            frequency: 0,
        }
    }

    /// Check whether `value` falls inside `[lower, upper)`
    #[inline]
    pub fn contains(&self, value: f64) -> bool {
        value >= self.lower && value < self.upper
    }

    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }
}

/// Ordered, contiguous classes for one variable at one width
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    width: f64,
    bins: Vec<Bin>,
}

/// Classify `values` into classes of the given width
///
/// All frequencies start at zero; see [`Classification::count`].
///
/// # Errors
///
/// - [`StatsError::InvalidWidth`] if `width` is not finite and positive
/// - [`StatsError::EmptyInput`] if `values` is empty
/// - [`StatsError::NonFinite`] if any value is NaN or infinite
/// - [`StatsError::TooManyClasses`] or [`StatsError::PrecisionLoss`], see
///   [`Classification::from_range`]
pub fn classify(values: &[f64], width: f64) -> StatsResult<Classification> {
    validate_width(width)?;
    let (min, max) = value_range(values)?;
    Classification::from_range(min, max, width)
}

/// Reject widths that are zero, negative, NaN or infinite
pub fn validate_width(width: f64) -> StatsResult<()> {
    if width.is_finite() && width > 0.0 {
        Ok(())
    } else {
        Err(StatsError::InvalidWidth(width))
    }
}

/// Minimum and maximum of a sample
pub fn value_range(values: &[f64]) -> StatsResult<(f64, f64)> {
    if values.is_empty() {
        return Err(StatsError::EmptyInput);
    }

    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for (index, &value) in values.iter().enumerate() {
        if !value.is_finite() {
            return Err(StatsError::NonFinite { index, value });
        }
        min = min.min(value);
        max = max.max(value);
    }

    Ok((min, max))
}

impl Classification {
    /// Build the classes covering `[min, max]`
    ///
    /// Expects `min <= max`, both finite, and a positive finite `width`;
    /// [`classify`] checks all three.
    ///
    /// # Errors
    ///
    /// - [`StatsError::TooManyClasses`] if the range needs more than
    ///   [`MAX_CLASSES`] classes
    /// - [`StatsError::PrecisionLoss`] if `width` is too small for `f64` to
    ///   separate neighbouring edges at this magnitude
    pub fn from_range(min: f64, max: f64, width: f64) -> StatsResult<Self> {
        if min == max && (min / width).fract() == 0.0 {
            let half = width / 2.0;
            let bins = vec![Bin::new(min - half, min + half)];
            return Self::checked(width, bins, max);
        }

        let mut start = (min / width).floor() * width;
        // Rounding in the product can land just above `min`
        if start > min {
            start -= width;
        }
        let end = (max / width).ceil() * width;

        let estimate = ((end - start) / width).round().max(1.0);
        if !estimate.is_finite() || estimate > MAX_CLASSES as f64 {
            return Err(StatsError::TooManyClasses {
                count: estimate,
                limit: MAX_CLASSES,
            });
        }

        let edge = |i: usize| start + i as f64 * width;
        let mut count = estimate as usize;
        while count <= MAX_CLASSES && edge(count) <= max {
            count += 1;
        }
        if count > MAX_CLASSES {
            return Err(StatsError::TooManyClasses {
                count: count as f64,
                limit: MAX_CLASSES,
            });
        }

        let bins = (0..count).map(|i| Bin::new(edge(i), edge(i + 1))).collect();
        Self::checked(width, bins, max)
    }

    /// Reject classes whose edges collapsed in rounding
    fn checked(width: f64, bins: Vec<Bin>, max: f64) -> StatsResult<Self> {
        if bins.iter().any(|b| b.lower >= b.upper) {
            return Err(StatsError::PrecisionLoss { width, value: max });
        }
        Ok(Self { width, bins })
    }

    /// Class width
    pub fn width(&self) -> f64 {
        self.width
    }

    /// All classes, in ascending order
    pub fn bins(&self) -> &[Bin] {
        &self.bins
    }

    pub(crate) fn bins_mut(&mut self) -> &mut [Bin] {
        &mut self.bins
    }

    /// Number of classes
    pub fn len(&self) -> usize {
        self.bins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }

    /// Lower bound of the first class
    pub fn start(&self) -> f64 {
        self.bins.first().map_or(f64::NAN, |b| b.lower)
    }

    /// Upper bound of the last class
    pub fn end(&self) -> f64 {
        self.bins.last().map_or(f64::NAN, |b| b.upper)
    }

    /// Sum of all class frequencies
    pub fn total_frequency(&self) -> usize {
        self.bins.iter().map(|b| b.frequency).sum()
    }

    /// The first `n` classes (fewer if the classification is shorter)
    pub fn preview(&self, n: usize) -> &[Bin] {
        &self.bins[..n.min(self.bins.len())]
    }

    /// Number of classes not shown by `preview(n)`
    pub fn remaining_after(&self, n: usize) -> usize {
        self.bins.len().saturating_sub(n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_values_classes() {
        let values: Vec<f64> = (1..=10).map(|x| x as f64).collect();
        let classes = classify(&values, 5.0).unwrap();

        let edges: Vec<(f64, f64)> = classes.bins().iter().map(|b| (b.lower, b.upper)).collect();
        assert_eq!(edges, vec![(0.0, 5.0), (5.0, 10.0), (10.0, 15.0)]);
        assert_eq!(classes.bins()[1].midpoint, 7.5);
        assert!(classes.bins().iter().all(|b| b.frequency == 0));
    }

    #[test]
    fn test_single_value_on_grid() {
        let classes = classify(&[5.0, 5.0, 5.0], 1.0).unwrap();

        assert_eq!(classes.len(), 1);
        assert_eq!(classes.bins()[0].midpoint, 5.0);
        assert!(classes.bins()[0].contains(5.0));
    }

    #[test]
    fn test_single_value_off_grid() {
        let classes = classify(&[5.3, 5.3], 1.0).unwrap();

        assert_eq!(classes.len(), 1);
        assert_eq!(classes.start(), 5.0);
        assert_eq!(classes.end(), 6.0);
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(classify(&[], 1.0), Err(StatsError::EmptyInput));
    }

    #[test]
    fn test_invalid_width() {
        assert!(matches!(classify(&[1.0], 0.0), Err(StatsError::InvalidWidth(_))));
        assert!(matches!(classify(&[1.0], -2.0), Err(StatsError::InvalidWidth(_))));
        assert!(matches!(classify(&[1.0], f64::NAN), Err(StatsError::InvalidWidth(_))));
    }

    #[test]
    fn test_non_finite_value() {
        let err = classify(&[1.0, f64::NAN, 3.0], 1.0).unwrap_err();
        assert!(matches!(err, StatsError::NonFinite { index: 1, .. }));
    }

    #[test]
    fn test_classes_are_contiguous() {
        let values = vec![150.3, 171.9, 199.99, 163.2];
        let classes = classify(&values, 8.0).unwrap();

        assert_eq!(classes.start(), 144.0);
        assert_eq!(classes.end(), 200.0);
        for pair in classes.bins().windows(2) {
            assert_eq!(pair[0].upper, pair[1].lower);
            assert!(pair[0].lower < pair[0].upper);
        }
    }

    #[test]
    fn test_range_covers_min_and_max() {
        // Widths that are not exactly representable
        for &width in &[0.1, 0.3, 0.7, 2.5] {
            let values = vec![0.3, 1.7, 2.1, 4.9];
            let classes = classify(&values, width).unwrap();
            assert!(classes.start() <= 0.3, "width {width}");
            assert!(classes.end() > 4.9, "width {width}");
        }
    }

    #[test]
    fn test_negative_values() {
        let classes = classify(&[-7.5, -0.5, 3.0], 4.0).unwrap();

        assert_eq!(classes.start(), -8.0);
        assert_eq!(classes.end(), 4.0);
        assert_eq!(classes.len(), 3);
    }

    #[test]
    fn test_too_many_classes() {
        let err = classify(&[0.0, 1e300], 1.0).unwrap_err();
        assert!(matches!(err, StatsError::TooManyClasses { limit: MAX_CLASSES, .. }));

        let err = classify(&[0.0, 1e12], 1e-3).unwrap_err();
        assert!(matches!(err, StatsError::TooManyClasses { .. }));
    }

    #[test]
    fn test_class_limit_is_inclusive() {
        let values = vec![0.0, MAX_CLASSES as f64 - 0.5];
        let classes = classify(&values, 1.0).unwrap();
        assert_eq!(classes.len(), MAX_CLASSES);
    }

    #[test]
    fn test_width_below_precision() {
        // Neighbouring integers collapse above 2^53
        let err = classify(&[1e16, 1e16 + 4.0], 1.0).unwrap_err();
        assert!(matches!(err, StatsError::PrecisionLoss { .. }));

        let err = classify(&[1e16, 1e16], 1.0).unwrap_err();
        assert!(matches!(err, StatsError::PrecisionLoss { .. }));
    }

    #[test]
    fn test_large_magnitude_with_coarse_width() {
        let classes = classify(&[1e16, 1e16 + 64.0], 16.0).unwrap();
        assert!(classes.bins().iter().all(|b| b.lower < b.upper));
        assert!(classes.bins().last().unwrap().contains(1e16 + 64.0));
    }

    #[test]
    fn test_preview() {
        let values: Vec<f64> = (0..20).map(|x| x as f64).collect();
        let classes = classify(&values, 2.0).unwrap();

        assert_eq!(classes.len(), 10);
        assert_eq!(classes.preview(5).len(), 5);
        assert_eq!(classes.remaining_after(5), 5);
        assert_eq!(classes.preview(50).len(), 10);
        assert_eq!(classes.remaining_after(50), 0);
    }
}
