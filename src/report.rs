use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::bar::BarRecord;
use crate::classifier::{Classifier, Evaluation};
use crate::config::OutputFormat;
use crate::error::Result;
use crate::splitter::SplitPercent;

/// Outcome of one classification run.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub generated_at: DateTime<Utc>,
    pub source: String,
    pub split_percent: SplitPercent,
    pub test_records: usize,
    pub training_records: usize,
    pub accuracy: f64,
    pub evaluation: Evaluation,
    pub bar: BarRecord,
}

impl RunReport {
    pub fn from_classifier(source: &str, classifier: &Classifier) -> Result<Self> {
        let evaluation = classifier.evaluate()?;
        let accuracy = classifier.classify()?;
        Ok(RunReport {
            generated_at: Utc::now(),
            source: source.to_string(),
            split_percent: classifier.split(),
            test_records: classifier.test_len(),
            training_records: classifier.training_len(),
            accuracy,
            evaluation,
            bar: *classifier.bar(),
        })
    }

    pub fn render(&self, format: OutputFormat) -> serde_json::Result<String> {
        match format {
            OutputFormat::Text => Ok(self.accuracy.to_string()),
            OutputFormat::Json => serde_json::to_string_pretty(self),
        }
    }
}
