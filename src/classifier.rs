use serde::Serialize;
use tracing::{debug, info};

use crate::bar::BarRecord;
use crate::csv_reader::RecordSource;
use crate::dataset::{Field, Outcome, WeightedRecord};
use crate::error::{ClassifierError, Result};
use crate::splitter::{split, SplitPercent};
use crate::weighter::weigh;

/// How one record compared against the bar.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Prediction {
    pub outcome: Outcome,
    /// Fields strictly above the bar.
    pub higher: usize,
    /// Fields at or below the bar.
    pub lower: usize,
}

/// Predicts `Above` only when more fields beat the bar than not.
/// A tie goes to `AtOrBelow`.
pub fn predict(record: &WeightedRecord, bar: &BarRecord) -> Prediction {
    let higher = Field::ALL
        .iter()
        .filter(|&&field| record.get(field) > bar.get(field))
        .count();
    let lower = Field::ALL.len() - higher;
    let outcome = if higher > lower {
        Outcome::Above
    } else {
        Outcome::AtOrBelow
    };
    Prediction {
        outcome,
        higher,
        lower,
    }
}

/// Tally of predictions against true outcomes.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Serialize)]
pub struct Evaluation {
    pub total: usize,
    pub correct: usize,
    pub true_above: usize,
    pub false_above: usize,
    pub true_below: usize,
    pub false_below: usize,
}

impl Evaluation {
    pub fn record(&mut self, predicted: Outcome, actual: Outcome) {
        self.total += 1;
        match (predicted, actual) {
            (Outcome::Above, Outcome::Above) => self.true_above += 1,
            (Outcome::Above, Outcome::AtOrBelow) => self.false_above += 1,
            (Outcome::AtOrBelow, Outcome::AtOrBelow) => self.true_below += 1,
            (Outcome::AtOrBelow, Outcome::Above) => self.false_below += 1,
        }
        if predicted == actual {
            self.correct += 1;
        }
    }

    /// Percentage of correct predictions; `None` when nothing was scored.
    pub fn accuracy(&self) -> Option<f64> {
        if self.total == 0 {
            None
        } else {
            Some(self.correct as f64 / self.total as f64 * 100.0)
        }
    }
}

/// Scores every test record against `bar`.
pub fn score(bar: &BarRecord, test: &[WeightedRecord], split: SplitPercent) -> Result<Evaluation> {
    if test.is_empty() {
        return Err(ClassifierError::EmptyTestSet {
            split: split.value(),
            total: 0,
        });
    }
    let mut evaluation = Evaluation::default();
    for record in test {
        let prediction = predict(record, bar);
        evaluation.record(prediction.outcome, record.outcome);
    }
    Ok(evaluation)
}

/// Weighs a record source once, holds out a test share and keeps the bar
/// computed from the rest.
#[derive(Debug, Clone)]
pub struct Classifier {
    split: SplitPercent,
    test: Vec<WeightedRecord>,
    training_len: usize,
    bar: BarRecord,
}

impl Classifier {
    pub fn new<S: RecordSource + ?Sized>(source: &S, split_percent: f64) -> Result<Self> {
        let percent = SplitPercent::new(split_percent)?;
        let records = source.load()?;
        if records.is_empty() {
            return Err(ClassifierError::EmptyTestSet {
                split: percent.value(),
                total: 0,
            });
        }
        let total = records.len();
        let weighted = weigh(records)?;
        let parts = split(weighted, percent);
        let bar = BarRecord::compute(&parts.training)?;
        info!(
            source = %source.describe(),
            split = percent.value(),
            total,
            test = parts.test.len(),
            training = parts.training.len(),
            "classifier ready"
        );
        Ok(Classifier {
            split: percent,
            test: parts.test,
            training_len: parts.training.len(),
            bar,
        })
    }

    /// Percentage (0 to 100) of test records classified correctly.
    pub fn classify(&self) -> Result<f64> {
        let evaluation = self.evaluate()?;
        evaluation
            .accuracy()
            .ok_or_else(|| self.empty_test_set())
    }

    pub fn evaluate(&self) -> Result<Evaluation> {
        if self.test.is_empty() {
            return Err(self.empty_test_set());
        }
        let evaluation = score(&self.bar, &self.test, self.split)?;
        debug!(
            correct = evaluation.correct,
            total = evaluation.total,
            "scored test records"
        );
        Ok(evaluation)
    }

    pub fn bar(&self) -> &BarRecord {
        &self.bar
    }

    pub fn split(&self) -> SplitPercent {
        self.split
    }

    pub fn test_len(&self) -> usize {
        self.test.len()
    }

    pub fn training_len(&self) -> usize {
        self.training_len
    }

    fn empty_test_set(&self) -> ClassifierError {
        ClassifierError::EmptyTestSet {
            split: self.split.value(),
            total: self.test.len() + self.training_len,
        }
    }
}
