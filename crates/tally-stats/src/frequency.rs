//! Class frequencies
//!
//! Each class is counted by exactly one rayon task that scans the whole
//! sample; the sample itself is shared read-only. There is no shared
//! counter, so the result does not depend on scheduling.

use rayon::prelude::*;

use crate::classify::{Bin, Classification};

/// Set every bin's frequency to the number of `values` in `[lower, upper)`
///
/// Values outside every bin are not counted anywhere.
pub fn count_frequencies(bins: &mut [Bin], values: &[f64]) {
    bins.par_iter_mut().for_each(|bin| {
        bin.frequency = values.iter().filter(|&&v| bin.contains(v)).count();
    });
}

impl Classification {
    /// Count `values` into the classes, replacing any previous counts
    ///
    /// Returns the total number of values that landed in some class.
    pub fn count(&mut self, values: &[f64]) -> usize {
        count_frequencies(self.bins_mut(), values);
        self.total_frequency()
    }
}
