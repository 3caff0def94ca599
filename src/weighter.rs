//! Frequency weighting of categorical fields.
//!
//! Every categorical value is replaced by the share of records in its own
//! outcome class that carry the same value in the same column. The same
//! string can therefore weigh differently in the two classes.

use std::collections::HashMap;

use tracing::debug;

use crate::dataset::{
    partition_by_outcome, Field, FieldKind, Outcome, RawRecord, WeightedRecord, FIELD_COUNT,
};
use crate::error::{ClassifierError, Result};

/// Per-column value counts over one outcome partition.
#[derive(Debug, Default)]
pub struct ColumnFrequencies<'a> {
    counts: HashMap<(Field, &'a str), usize>,
    total: usize,
}

impl<'a> ColumnFrequencies<'a> {
    /// Counts the categorical columns of `records`.
    pub fn build(records: &[&'a RawRecord]) -> Self {
        let mut counts = HashMap::new();
        for &record in records {
            for field in Field::ALL {
                if field.kind() == FieldKind::Categorical {
                    *counts.entry((field, record.value(field))).or_insert(0) += 1;
                }
            }
        }
        ColumnFrequencies {
            counts,
            total: records.len(),
        }
    }

    pub fn count(&self, field: Field, value: &str) -> usize {
        self.counts.get(&(field, value)).copied().unwrap_or(0)
    }

    /// `count / len`, or `None` if the value never occurs in this partition.
    pub fn weight(&self, field: Field, value: &str) -> Option<f64> {
        match self.count(field, value) {
            0 => None,
            n => Some(n as f64 / self.total as f64),
        }
    }

    pub fn len(&self) -> usize {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}

/// Weighs every record against the frequency table of its own outcome class.
///
/// The output has the same length and order as the input.
pub fn weigh(records: Vec<RawRecord>) -> Result<Vec<WeightedRecord>> {
    let (above, below) = partition_by_outcome(&records);
    let above = ColumnFrequencies::build(&above);
    let below = ColumnFrequencies::build(&below);
    debug!(
        above = above.len(),
        at_or_below = below.len(),
        "built column frequency tables"
    );

    records
        .iter()
        .enumerate()
        .map(|(row, record)| {
            let table = match record.outcome {
                Outcome::Above => &above,
                Outcome::AtOrBelow => &below,
            };
            weigh_record(row, record, table)
        })
        .collect()
}

fn weigh_record(row: usize, record: &RawRecord, table: &ColumnFrequencies) -> Result<WeightedRecord> {
    let mut values = [0f64; FIELD_COUNT];
    for field in Field::ALL {
        let raw = record.value(field);
        values[field.index()] = match field.kind() {
            FieldKind::Numeric => parse_numeric(row, field, raw)?,
            // the record itself was counted, so the lookup always hits
            FieldKind::Categorical => table.weight(field, raw).unwrap_or_default(),
        };
    }
    Ok(WeightedRecord::new(values, record.outcome))
}

fn parse_numeric(row: usize, field: Field, raw: &str) -> Result<f64> {
    raw.parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| ClassifierError::MalformedValue {
            row,
            field,
            value: raw.to_string(),
        })
}
