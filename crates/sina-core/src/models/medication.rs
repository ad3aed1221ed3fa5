use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// A drug prescribed at a visit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Medication {
    pub name: String,
    /// Free-text dose as entered (usually mg).
    pub dose: String,
    pub times: Vec<DoseTime>,
}

impl Medication {
    pub fn new(name: impl Into<String>, dose: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            dose: dose.into(),
            times: Vec::new(),
        }
    }

    /// Lower-cased, trimmed name used to match the same drug across visits.
    pub fn normalized_name(&self) -> String {
        self.name.trim().to_lowercase()
    }
}

/// Time of day a dose is taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum DoseTime {
    Morning,
    Noon,
    Evening,
    Night,
}
