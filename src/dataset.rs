use std::fmt;

pub const FIELD_COUNT: usize = 11;

/// Label string of the above-threshold class.
pub const ABOVE_LABEL: &'static str = ">50K";
pub const AT_OR_BELOW_LABEL: &'static str = "<=50K";

/// The scored columns of a record, in canonical order.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Field {
    Age,
    Workclass,
    EducationNum,
    MaritalStatus,
    Occupation,
    Relationship,
    Race,
    Sex,
    CapitalGain,
    CapitalLoss,
    HoursPerWeek,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum FieldKind {
    /// Already a number in the source; parsed as-is.
    Numeric,
    /// Replaced by its within-class frequency.
    Categorical,
}

impl Field {
    pub const ALL: [Field; FIELD_COUNT] = [
        Field::Age,
        Field::Workclass,
        Field::EducationNum,
        Field::MaritalStatus,
        Field::Occupation,
        Field::Relationship,
        Field::Race,
        Field::Sex,
        Field::CapitalGain,
        Field::CapitalLoss,
        Field::HoursPerWeek,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            Field::Age => "age",
            Field::Workclass => "workclass",
            Field::EducationNum => "education_num",
            Field::MaritalStatus => "marital_status",
            Field::Occupation => "occupation",
            Field::Relationship => "relationship",
            Field::Race => "race",
            Field::Sex => "sex",
            Field::CapitalGain => "capital_gain",
            Field::CapitalLoss => "capital_loss",
            Field::HoursPerWeek => "hours_per_week",
        }
    }

    /// `education_num` looks numeric but is a category code, so it is weighted.
    pub fn kind(self) -> FieldKind {
        match self {
            Field::Age | Field::CapitalGain | Field::CapitalLoss | Field::HoursPerWeek => {
                FieldKind::Numeric
            }
            _ => FieldKind::Categorical,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Outcome {
    Above,
    AtOrBelow,
}

impl Outcome {
    /// Only an exact `>50K` is the above class; every other label falls into the other one.
    pub fn from_label(label: &str) -> Self {
        if label == ABOVE_LABEL {
            Outcome::Above
        } else {
            Outcome::AtOrBelow
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Outcome::Above => ABOVE_LABEL,
            Outcome::AtOrBelow => AT_OR_BELOW_LABEL,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Anything carrying an outcome label.
pub trait Labelled {
    fn outcome(&self) -> Outcome;
}

impl<T: Labelled> Labelled for &T {
    fn outcome(&self) -> Outcome {
        (**self).outcome()
    }
}

/// A record as delivered by a source: one string per field.
#[derive(Debug, Clone, PartialEq)]
pub struct RawRecord {
    values: [String; FIELD_COUNT],
    pub outcome: Outcome,
}

impl RawRecord {
    pub fn new(values: [String; FIELD_COUNT], outcome: Outcome) -> Self {
        RawRecord { values, outcome }
    }

    pub fn value(&self, field: Field) -> &str {
        &self.values[field.index()]
    }
}

impl Labelled for RawRecord {
    fn outcome(&self) -> Outcome {
        self.outcome
    }
}

/// A record after weighting: every field is a number, the outcome is untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightedRecord {
    values: [f64; FIELD_COUNT],
    pub outcome: Outcome,
}

impl WeightedRecord {
    pub fn new(values: [f64; FIELD_COUNT], outcome: Outcome) -> Self {
        WeightedRecord { values, outcome }
    }

    pub fn get(&self, field: Field) -> f64 {
        self.values[field.index()]
    }

    pub fn values(&self) -> &[f64; FIELD_COUNT] {
        &self.values
    }
}

impl Labelled for WeightedRecord {
    fn outcome(&self) -> Outcome {
        self.outcome
    }
}

/// Splits `items` into (above, at-or-below), keeping relative order within each side.
pub fn partition_by_outcome<T: Labelled>(items: impl IntoIterator<Item = T>) -> (Vec<T>, Vec<T>) {
    items
        .into_iter()
        .partition(|item| item.outcome() == Outcome::Above)
}
