use std::fs::File;
use std::io::Read;
use std::path::PathBuf;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::dataset::{Outcome, RawRecord};
use crate::error::{ClassifierError, Result};

/// Number of columns in a well-formed census row.
pub const CSV_COLUMNS: usize = 15;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
const READ_TIMEOUT: Duration = Duration::from_secs(60);

/// Supplies the raw records the pipeline starts from.
pub trait RecordSource {
    fn load(&self) -> Result<Vec<RawRecord>>;

    /// Identifier used in diagnostics.
    fn describe(&self) -> String;
}

impl RecordSource for Vec<RawRecord> {
    fn load(&self) -> Result<Vec<RawRecord>> {
        Ok(self.clone())
    }

    fn describe(&self) -> String {
        format!("in-memory ({} records)", self.len())
    }
}

/// One row of the census layout. `fnlwgt`, `education` and `native_country`
/// are read only to keep the columns aligned.
#[derive(Debug, serde::Deserialize, Clone)]
pub struct CensusRow {
    pub age: String,
    pub workclass: String,
    pub fnlwgt: String,
    pub education: String,
    pub education_num: String,
    pub marital_status: String,
    pub occupation: String,
    pub relationship: String,
    pub race: String,
    pub sex: String,
    pub capital_gain: String,
    pub capital_loss: String,
    pub hours_per_week: String,
    pub native_country: String,
    pub income: String,
}

impl From<CensusRow> for RawRecord {
    fn from(row: CensusRow) -> Self {
        let outcome = Outcome::from_label(&row.income);
        RawRecord::new(
            [
                row.age,
                row.workclass,
                row.education_num,
                row.marital_status,
                row.occupation,
                row.relationship,
                row.race,
                row.sex,
                row.capital_gain,
                row.capital_loss,
                row.hours_per_week,
            ],
            outcome,
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Location {
    Url(String),
    Path(PathBuf),
}

impl Location {
    fn parse(source: &str) -> Self {
        if source.starts_with("http://") || source.starts_with("https://") {
            Location::Url(source.to_string())
        } else {
            Location::Path(PathBuf::from(source))
        }
    }
}

/// Census CSV read from a local file or fetched over HTTP.
#[derive(Debug, Clone)]
pub struct CsvSource {
    source: String,
    location: Location,
}

impl CsvSource {
    pub fn new(source: impl Into<String>) -> Self {
        let source = source.into();
        let location = Location::parse(&source);
        CsvSource { source, location }
    }

    pub fn is_remote(&self) -> bool {
        matches!(self.location, Location::Url(_))
    }

    fn open(&self) -> Result<Box<dyn Read>> {
        match &self.location {
            Location::Url(url) => {
                info!(url = %url, "fetching census data");
                let agent = ureq::AgentBuilder::new()
                    .timeout_connect(CONNECT_TIMEOUT)
                    .timeout_read(READ_TIMEOUT)
                    .build();
                let response = agent
                    .get(url)
                    .call()
                    .map_err(|err| ClassifierError::source_unavailable(&self.source, err))?;
                Ok(Box::new(response.into_reader()))
            }
            Location::Path(path) => {
                debug!(path = %path.display(), "opening census file");
                let file = File::open(path)
                    .map_err(|err| ClassifierError::source_unavailable(&self.source, err))?;
                Ok(Box::new(file))
            }
        }
    }
}

impl RecordSource for CsvSource {
    fn load(&self) -> Result<Vec<RawRecord>> {
        let reader = self.open()?;
        read_records(reader, &self.source)
    }

    fn describe(&self) -> String {
        self.source.clone()
    }
}

/// Parses headerless census rows, dropping any row without exactly
/// [`CSV_COLUMNS`] fields.
pub fn read_records<R: Read>(reader: R, source_id: &str) -> Result<Vec<RawRecord>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut records = Vec::<RawRecord>::new();
    let mut skipped = 0usize;
    for result in rdr.records() {
        let row = result.map_err(|err| ClassifierError::source_unavailable(source_id, err))?;
        if row.len() != CSV_COLUMNS {
            skipped += 1;
            continue;
        }
        let row: CensusRow = row
            .deserialize(None)
            .map_err(|err| ClassifierError::source_unavailable(source_id, err))?;
        records.push(row.into());
    }
    if skipped > 0 {
        warn!(source = source_id, skipped, "dropped rows with the wrong field count");
    }
    info!(source = source_id, records = records.len(), "loaded census records");
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Field;

    const SAMPLE: &str = "\
39, State-gov, 77516, Bachelors, 13, Never-married, Adm-clerical, Not-in-family, White, Male, 2174, 0, 40, United-States, <=50K
52, Self-emp-not-inc, 209642, HS-grad, 9, Married-civ-spouse, Exec-managerial, Husband, White, Male, 0, 0, 45, United-States, >50K
31, Private, 45781, Masters
";

    #[test]
    fn test_reads_fixed_layout() {
        let records = read_records(SAMPLE.as_bytes(), "sample").unwrap();
        assert_eq!(records.len(), 2);

        let first = &records[0];
        assert_eq!(first.value(Field::Age), "39");
        assert_eq!(first.value(Field::Workclass), "State-gov");
        assert_eq!(first.value(Field::EducationNum), "13");
        assert_eq!(first.value(Field::HoursPerWeek), "40");
        assert_eq!(first.outcome, Outcome::AtOrBelow);
        assert_eq!(records[1].outcome, Outcome::Above);
        assert_eq!(records[1].value(Field::Relationship), "Husband");
    }

    #[test]
    fn test_blank_and_short_rows_are_dropped() {
        let data = "\n1, a\n\n";
        let records = read_records(data.as_bytes(), "sparse").unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_location_detection() {
        assert!(CsvSource::new("http://example.org/adult.data").is_remote());
        assert!(CsvSource::new("https://example.org/adult.data").is_remote());
        assert!(!CsvSource::new("data/records.csv").is_remote());
    }

    #[test]
    fn test_missing_file_names_the_source() {
        let source = CsvSource::new("does/not/exist.csv");
        match source.load() {
            Err(ClassifierError::SourceUnavailable { source_id, .. }) => {
                assert_eq!(source_id, "does/not/exist.csv")
            }
            other => panic!("expected SourceUnavailable, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_utf8_is_a_source_error() {
        let mut data = b"39, State-gov, 77516, Bachelors, 13, Never-married, Adm-clerical, Not-in-family, White, Male, 2174, 0, 40, United-States, ".to_vec();
        data.extend_from_slice(&[0xff, 0xfe, b'\n']);
        let err = read_records(data.as_slice(), "binary").unwrap_err();
        assert!(matches!(err, ClassifierError::SourceUnavailable { .. }));
    }
}
