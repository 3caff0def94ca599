//! Income-bracket prediction for census records.
//!
//! Categorical fields are replaced by their frequency within the record's own
//! outcome class, the training share is reduced to a single "bar" record (the
//! mean of the two class averages), and every held-out record is predicted to
//! be above the threshold when more of its fields beat the bar than not.

pub mod bar;
pub mod classifier;
pub mod config;
pub mod csv_reader;
pub mod dataset;
pub mod error;
pub mod logging;
pub mod report;
pub mod splitter;
pub mod weighter;

pub use classifier::{Classifier, Evaluation};
pub use csv_reader::{CsvSource, RecordSource};
pub use error::{ClassifierError, Result};
