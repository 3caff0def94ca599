//! The bar: a reference record halfway between the two class averages.

use serde::ser::{Serialize, SerializeMap, Serializer};
use tracing::debug;

use crate::dataset::{partition_by_outcome, Field, Outcome, WeightedRecord, FIELD_COUNT};
use crate::error::{ClassifierError, Result};

/// Per-field arithmetic mean of a collection of records.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AverageRecord {
    values: [f64; FIELD_COUNT],
}

impl AverageRecord {
    /// Mean of every field, or `None` for an empty collection.
    pub fn of<'a, I>(rows: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a [f64; FIELD_COUNT]>,
    {
        let mut sums = [0f64; FIELD_COUNT];
        let mut n = 0usize;
        for row in rows {
            for (sum, value) in sums.iter_mut().zip(row) {
                *sum += value;
            }
            n += 1;
        }
        if n == 0 {
            return None;
        }
        Some(AverageRecord {
            values: sums.map(|sum| sum / n as f64),
        })
    }

    /// Mean of two averages, as if they were a two-record collection.
    pub fn pair(a: &AverageRecord, b: &AverageRecord) -> Self {
        let mut values = a.values;
        for (value, other) in values.iter_mut().zip(&b.values) {
            *value = (*value + other) / 2.0;
        }
        AverageRecord { values }
    }

    pub fn get(&self, field: Field) -> f64 {
        self.values[field.index()]
    }

    pub fn values(&self) -> &[f64; FIELD_COUNT] {
        &self.values
    }
}

/// Reference record every test record is scored against.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarRecord {
    average: AverageRecord,
}

impl BarRecord {
    /// Averages the per-class averages of `training`.
    ///
    /// Fails with [`ClassifierError::EmptyPartition`] when either class is absent.
    pub fn compute(training: &[WeightedRecord]) -> Result<Self> {
        let (above, below) = partition_by_outcome(training);
        let above = class_average(Outcome::Above, &above, training.len())?;
        let below = class_average(Outcome::AtOrBelow, &below, training.len())?;
        debug!(training = training.len(), "computed bar record");
        Ok(BarRecord {
            average: AverageRecord::pair(&above, &below),
        })
    }

    pub fn get(&self, field: Field) -> f64 {
        self.average.get(field)
    }
}

fn class_average(
    class: Outcome,
    records: &[&WeightedRecord],
    training_len: usize,
) -> Result<AverageRecord> {
    AverageRecord::of(records.iter().map(|r| r.values()))
        .ok_or(ClassifierError::EmptyPartition {
            class,
            training_len,
        })
}

impl Serialize for BarRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(FIELD_COUNT))?;
        for field in Field::ALL {
            map.serialize_entry(field.name(), &self.get(field))?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn record(hours: f64, age: f64, outcome: Outcome) -> WeightedRecord {
        let mut values = [0.5; FIELD_COUNT];
        values[Field::HoursPerWeek.index()] = hours;
        values[Field::Age.index()] = age;
        WeightedRecord::new(values, outcome)
    }

    #[test]
    fn test_average_record() {
        let a = [1.0; FIELD_COUNT];
        let b = [3.0; FIELD_COUNT];
        let avg = AverageRecord::of([&a, &b]).unwrap();
        assert!(avg.values().iter().all(|&v| v == 2.0));
        assert_eq!(AverageRecord::of(std::iter::empty()), None);

        let pair = AverageRecord::pair(&avg, &AverageRecord::of([&b]).unwrap());
        assert!(pair.values().iter().all(|&v| v == 2.5));
    }

    #[test]
    fn test_bar_is_mean_of_class_means() {
        let training = vec![
            record(60.0, 50.0, Outcome::Above),
            record(30.0, 20.0, Outcome::AtOrBelow),
            record(50.0, 40.0, Outcome::Above),
            record(20.0, 30.0, Outcome::AtOrBelow),
        ];
        let bar = BarRecord::compute(&training).unwrap();
        assert_eq!(bar.get(Field::HoursPerWeek), 40.0);
        assert_eq!(bar.get(Field::Age), 35.0);
        assert_eq!(bar.get(Field::Sex), 0.5);
    }

    #[test]
    fn test_class_sizes_do_not_skew_the_bar() {
        // 1 above at 100 vs 3 below at 0: the bar is 50, not 25
        let training = vec![
            record(100.0, 0.0, Outcome::Above),
            record(0.0, 0.0, Outcome::AtOrBelow),
            record(0.0, 0.0, Outcome::AtOrBelow),
            record(0.0, 0.0, Outcome::AtOrBelow),
        ];
        let bar = BarRecord::compute(&training).unwrap();
        assert_eq!(bar.get(Field::HoursPerWeek), 50.0);
    }

    #[test]
    fn test_missing_class_is_an_error() {
        let training = vec![record(40.0, 30.0, Outcome::AtOrBelow)];
        assert_eq!(
            BarRecord::compute(&training),
            Err(ClassifierError::EmptyPartition {
                class: Outcome::Above,
                training_len: 1,
            })
        );

        let training = vec![record(40.0, 30.0, Outcome::Above)];
        assert_eq!(
            BarRecord::compute(&training),
            Err(ClassifierError::EmptyPartition {
                class: Outcome::AtOrBelow,
                training_len: 1,
            })
        );

        assert!(BarRecord::compute(&[]).is_err());
    }

    #[test]
    fn test_serializes_by_field_name() {
        let training = vec![
            record(60.0, 50.0, Outcome::Above),
            record(20.0, 30.0, Outcome::AtOrBelow),
        ];
        let bar = BarRecord::compute(&training).unwrap();
        let json = serde_json::to_value(bar).unwrap();
        assert_eq!(json["hours_per_week"], 40.0);
        assert_eq!(json["age"], 40.0);
    }

    proptest! {
        #[test]
        fn prop_bar_is_deterministic(
            hours in prop::collection::vec((0.0f64..100.0, any::<bool>()), 2..40)
        ) {
            let mut training: Vec<_> = hours
                .iter()
                .map(|&(h, above)| {
                    let outcome = if above { Outcome::Above } else { Outcome::AtOrBelow };
                    record(h, h / 2.0, outcome)
                })
                .collect();
            // both classes present
            training.push(record(1.0, 1.0, Outcome::Above));
            training.push(record(2.0, 2.0, Outcome::AtOrBelow));

            let first = BarRecord::compute(&training).unwrap();
            let second = BarRecord::compute(&training).unwrap();
            prop_assert_eq!(first, second);
        }
    }
}
