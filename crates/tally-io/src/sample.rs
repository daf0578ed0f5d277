//! In-memory samples

use serde::{Deserialize, Serialize};

/// One observation: a pair of real numbers
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub primary: f64,
    pub secondary: f64,
}

impl Sample {
    pub fn new(primary: f64, secondary: f64) -> Self {
        Self { primary, secondary }
    }

    /// Value of one column
    pub fn get(&self, column: Column) -> f64 {
        match column {
            Column::Primary => self.primary,
            Column::Secondary => self.secondary,
        }
    }
}

/// Which half of a [`Sample`] a variable is read from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Column {
    Primary,
    Secondary,
}

/// Where and why a read stopped before the end of the input
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Truncation {
    /// 1-based line of the offending token
    pub line: usize,
    /// The token that failed to parse
    pub token: String,
}

/// Samples in input order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SampleSet {
    samples: Vec<Sample>,
    truncated: Option<Truncation>,
}

impl SampleSet {
    pub fn new(samples: Vec<Sample>) -> Self {
        Self {
            samples,
            truncated: None,
        }
    }

    pub(crate) fn with_truncation(mut self, truncated: Option<Truncation>) -> Self {
        self.truncated = truncated;
        self
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Set when reading stopped at an unparsable token
    pub fn truncated(&self) -> Option<&Truncation> {
        self.truncated.as_ref()
    }

    /// Copy one column out as a flat sequence
    pub fn column(&self, column: Column) -> Vec<f64> {
        self.samples.iter().map(|s| s.get(column)).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Sample> {
        self.samples.iter()
    }
}

impl From<Vec<Sample>> for SampleSet {
    fn from(samples: Vec<Sample>) -> Self {
        Self::new(samples)
    }
}

impl FromIterator<Sample> for SampleSet {
    fn from_iter<I: IntoIterator<Item = Sample>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_split() {
        let set: SampleSet = vec![Sample::new(170.0, 70.0), Sample::new(180.5, 82.25)].into();

        assert_eq!(set.column(Column::Primary), vec![170.0, 180.5]);
        assert_eq!(set.column(Column::Secondary), vec![70.0, 82.25]);
        assert!(set.truncated().is_none());
    }
}
