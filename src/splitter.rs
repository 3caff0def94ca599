use std::fmt;

use serde::Serialize;
use tracing::debug;

use crate::dataset::WeightedRecord;
use crate::error::{ClassifierError, Result};

/// Share of the records held out for testing, in percent.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct SplitPercent(f64);

impl SplitPercent {
    pub fn new(percent: f64) -> Result<Self> {
        if percent.is_finite() && (0.0..=100.0).contains(&percent) {
            Ok(SplitPercent(percent))
        } else {
            Err(ClassifierError::InvalidSplit(percent))
        }
    }

    pub fn value(self) -> f64 {
        self.0
    }

    /// Number of records that go to the test set: `floor(p / 100 * len)`.
    pub fn test_len(self, len: usize) -> usize {
        let k = (self.0 / 100.0 * len as f64).floor() as usize;
        k.min(len)
    }
}

impl fmt::Display for SplitPercent {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Split {
    pub test: Vec<WeightedRecord>,
    pub training: Vec<WeightedRecord>,
}

/// Cuts `records` positionally: the first `k` go to the test set, the rest to training.
pub fn split(mut records: Vec<WeightedRecord>, percent: SplitPercent) -> Split {
    let k = percent.test_len(records.len());
    let training = records.split_off(k);
    debug!(
        split = percent.value(),
        test = records.len(),
        training = training.len(),
        "split weighted records"
    );
    Split {
        test: records,
        training,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{Field, Outcome, FIELD_COUNT};
    use proptest::prelude::*;

    fn numbered(len: usize) -> Vec<WeightedRecord> {
        (0..len)
            .map(|i| WeightedRecord::new([i as f64; FIELD_COUNT], Outcome::AtOrBelow))
            .collect()
    }

    #[test]
    fn test_split_is_positional() {
        let parts = split(numbered(8), SplitPercent::new(25.0).unwrap());
        let test: Vec<_> = parts.test.iter().map(|r| r.get(Field::Age)).collect();
        let training: Vec<_> = parts.training.iter().map(|r| r.get(Field::Age)).collect();
        assert_eq!(test, vec![0.0, 1.0]);
        assert_eq!(training, vec![2.0, 3.0, 4.0, 5.0, 6.0, 7.0]);
    }

    #[test]
    fn test_split_truncates() {
        let parts = split(numbered(7), SplitPercent::new(50.0).unwrap());
        assert_eq!(parts.test.len(), 3);
        assert_eq!(parts.training.len(), 4);
    }

    #[test]
    fn test_degenerate_splits() {
        let none = split(numbered(5), SplitPercent::new(0.0).unwrap());
        assert!(none.test.is_empty());
        assert_eq!(none.training.len(), 5);

        let all = split(numbered(5), SplitPercent::new(100.0).unwrap());
        assert_eq!(all.test.len(), 5);
        assert!(all.training.is_empty());
    }

    #[test]
    fn test_invalid_percent() {
        assert_eq!(
            SplitPercent::new(100.5),
            Err(ClassifierError::InvalidSplit(100.5))
        );
        assert!(SplitPercent::new(-1.0).is_err());
        assert!(SplitPercent::new(f64::NAN).is_err());
        assert!(SplitPercent::new(f64::INFINITY).is_err());
    }

    proptest! {
        #[test]
        fn prop_split_sizes(len in 0usize..500, percent in 0.0f64..=100.0) {
            let percent = SplitPercent::new(percent).unwrap();
            let parts = split(numbered(len), percent);
            prop_assert_eq!(parts.test.len() + parts.training.len(), len);
            let expected = (percent.value() / 100.0 * len as f64).floor() as usize;
            prop_assert_eq!(parts.test.len(), expected);
        }
    }
}
