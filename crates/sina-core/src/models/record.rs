use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use super::medication::Medication;
use super::scale::ScaleResults;

/// Identity of the patient a record belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PatientRef {
    /// National identity number. Records without one cannot be grouped.
    pub national_id: Option<String>,
    pub display_name: String,
}

/// One clinical visit: scales, treatment and note as recorded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AssessmentRecord {
    pub id: Uuid,
    pub assessed_at: jiff::Timestamp,
    pub patient: PatientRef,
    pub scales: ScaleResults,
    pub medications: Vec<Medication>,
    pub note: Option<String>,
}

impl AssessmentRecord {
    /// The national id, with blank values treated as missing.
    pub fn national_id(&self) -> Option<&str> {
        self.patient
            .national_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
    }
}
