use std::collections::BTreeMap;

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use sina_core::models::medication::Medication;
use sina_core::models::patient::Patient;
use sina_core::models::record::AssessmentRecord;
use sina_core::models::scale::ScaleResults;
use sina_scoring::mood::{self, MoodState};
use sina_scoring::severity;
use ts_rs::TS;
use uuid::Uuid;

use crate::progress::{IntervalProgress, Progress};

/// One visit as shown on a patient's timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct VisitPoint {
    pub record_id: Uuid,
    pub assessed_at: Timestamp,
    /// Severity index; `None` when the visit recorded no scales.
    pub severity: Option<f64>,
    pub mood: MoodState,
    pub medications: Vec<Medication>,
    /// Raw scale values exactly as recorded.
    pub scales: ScaleResults,
    pub note: Option<String>,
}

impl VisitPoint {
    pub fn from_record(record: &AssessmentRecord) -> Self {
        Self {
            record_id: record.id,
            assessed_at: record.assessed_at,
            severity: severity::score(&record.scales),
            mood: mood::classify_results(&record.scales),
            medications: record.medications.clone(),
            scales: record.scales.clone(),
            note: record.note.clone(),
        }
    }
}

/// A patient's visits, oldest first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PatientTimeline {
    pub national_id: String,
    pub display_name: String,
    pub visits: Vec<VisitPoint>,
}

impl PatientTimeline {
    pub fn from_patient(patient: &Patient) -> Self {
        Self {
            national_id: patient.national_id.clone(),
            display_name: patient.display_name.clone(),
            visits: patient.records.iter().map(VisitPoint::from_record).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.visits.is_empty()
    }

    pub fn len(&self) -> usize {
        self.visits.len()
    }

    pub fn latest(&self) -> Option<&VisitPoint> {
        self.visits.last()
    }

    /// Visits that carry a severity index, with the index.
    pub fn scored_visits(&self) -> impl Iterator<Item = (&VisitPoint, f64)> {
        self.visits
            .iter()
            .filter_map(|v| v.severity.map(|score| (v, score)))
    }

    /// Progress from the first to the last scored visit. Needs two.
    pub fn overall_progress(&self) -> Option<Progress> {
        let mut scored = self.scored_visits();
        let (_, first) = scored.next()?;
        let (_, last) = scored.last()?;
        Some(Progress::between(first, last))
    }

    /// Progress across each pair of consecutive scored visits.
    pub fn interval_progress(&self) -> Vec<IntervalProgress> {
        let scored: Vec<_> = self.scored_visits().collect();
        scored
            .windows(2)
            .map(|pair| {
                let (from, first) = pair[0];
                let (to, last) = pair[1];
                IntervalProgress {
                    from: from.assessed_at,
                    to: to.assessed_at,
                    progress: Progress::between(first, last),
                }
            })
            .collect()
    }
}

/// Records grouped per patient.
#[derive(Debug, Clone, Default)]
pub struct PatientGroups {
    /// Sorted by national id; each patient's records oldest first.
    pub patients: Vec<Patient>,
    /// Records left out because they carry no national id.
    pub skipped_without_id: usize,
}

impl PatientGroups {
    pub fn timelines(&self) -> Vec<PatientTimeline> {
        self.patients.iter().map(PatientTimeline::from_patient).collect()
    }

    pub fn get(&self, national_id: &str) -> Option<&Patient> {
        self.patients.iter().find(|p| p.national_id == national_id)
    }
}

/// Group records by national id. Records without one are counted, not kept.
pub fn group_by_patient(records: &[AssessmentRecord]) -> PatientGroups {
    let mut by_id: BTreeMap<String, Vec<AssessmentRecord>> = BTreeMap::new();
    let mut skipped_without_id = 0;
    for record in records {
        match record.national_id() {
            Some(id) => by_id.entry(id.to_string()).or_default().push(record.clone()),
            None => skipped_without_id += 1,
        }
    }
    if skipped_without_id > 0 {
        tracing::warn!(skipped = skipped_without_id, "records without a national id left out of grouping");
    }
    PatientGroups {
        patients: by_id
            .into_iter()
            .map(|(id, records)| Patient::from_records(id, records))
            .collect(),
        skipped_without_id,
    }
}

/// Build one patient's timeline from a mixed batch of records.
///
/// Returns an empty timeline when no record matches `national_id`.
pub fn build_patient_timeline(records: &[AssessmentRecord], national_id: &str) -> PatientTimeline {
    let national_id = national_id.trim();
    let matching: Vec<_> = records
        .iter()
        .filter(|r| r.national_id() == Some(national_id))
        .cloned()
        .collect();
    let timeline = PatientTimeline::from_patient(&Patient::from_records(national_id, matching));
    tracing::debug!(patient = %national_id, visits = timeline.len(), "built patient timeline");
    timeline
}
