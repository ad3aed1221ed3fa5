use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::record::AssessmentRecord;

/// All records of one national id, ordered by assessment time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Patient {
    pub national_id: String,
    pub display_name: String,
    pub records: Vec<AssessmentRecord>,
}

impl Patient {
    /// Build a patient from records already known to share `national_id`.
    ///
    /// Records are sorted ascending by `assessed_at`; ties keep input order.
    pub fn from_records(national_id: impl Into<String>, mut records: Vec<AssessmentRecord>) -> Self {
        records.sort_by_key(|r| r.assessed_at);
        let display_name = records
            .iter()
            .map(|r| r.patient.display_name.trim())
            .find(|name| !name.is_empty())
            .unwrap_or_default()
            .to_string();
        Self {
            national_id: national_id.into(),
            display_name,
            records,
        }
    }

    pub fn summary(&self) -> PatientSummary {
        PatientSummary {
            national_id: self.national_id.clone(),
            display_name: self.display_name.clone(),
            record_count: self.records.len(),
            first_assessed_at: self.records.first().map(|r| r.assessed_at),
            last_assessed_at: self.records.last().map(|r| r.assessed_at),
        }
    }
}

/// Patient picker entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PatientSummary {
    pub national_id: String,
    pub display_name: String,
    pub record_count: usize,
    pub first_assessed_at: Option<jiff::Timestamp>,
    pub last_assessed_at: Option<jiff::Timestamp>,
}
