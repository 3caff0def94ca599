use thiserror::Error;

use crate::dataset::{Field, Outcome};

pub type Result<T> = std::result::Result<T, ClassifierError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ClassifierError {
    /// The raw records could not be fetched, opened or decoded.
    #[error("CSV source error for {source_id}: {reason}")]
    SourceUnavailable { source_id: String, reason: String },

    #[error("split percentage {0} is outside [0, 100]")]
    InvalidSplit(f64),

    /// A numeric field held something that does not parse as a number.
    #[error("row {row}: {field} value {value:?} is not numeric")]
    MalformedValue {
        row: usize,
        field: Field,
        value: String,
    },

    /// One outcome class has no records in the training set.
    #[error("no {class} records among {training_len} training records; lower the split percentage or supply more data")]
    EmptyPartition { class: Outcome, training_len: usize },

    /// Nothing left to classify.
    #[error("test set is empty ({split}% of {total} records); raise the split percentage or supply more data")]
    EmptyTestSet { split: f64, total: usize },
}

impl ClassifierError {
    pub fn source_unavailable(source_id: impl Into<String>, reason: impl ToString) -> Self {
        ClassifierError::SourceUnavailable {
            source_id: source_id.into(),
            reason: reason.to_string(),
        }
    }
}
