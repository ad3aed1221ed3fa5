use std::collections::BTreeMap;

use jiff::{SignedDuration, Timestamp};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::timeline::VisitPoint;

/// A span during which a drug is assumed to have been in use.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct MedicationInterval {
    pub drug_name: String,
    pub dose: String,
    pub start: Timestamp,
    pub end: Timestamp,
}

impl MedicationInterval {
    pub fn duration(&self) -> SignedDuration {
        self.end.duration_since(self.start)
    }
}

/// One interval per medication per visit.
///
/// A medication recorded at a visit runs until the next visit; medications
/// of the last visit run until `now`. Repeated prescriptions across visits
/// stay as separate adjacent intervals.
pub fn build_intervals(visits: &[VisitPoint], now: Timestamp) -> Vec<MedicationInterval> {
    let mut intervals = Vec::new();
    for (i, visit) in visits.iter().enumerate() {
        let end = visits.get(i + 1).map_or(now, |next| next.assessed_at);
        intervals.extend(visit.medications.iter().map(|med| MedicationInterval {
            drug_name: med.name.trim().to_string(),
            dose: med.dose.clone(),
            start: visit.assessed_at,
            end,
        }));
    }
    intervals
}

/// Intervals keyed by drug name, one Gantt row per drug.
pub fn group_by_drug(intervals: &[MedicationInterval]) -> BTreeMap<&str, Vec<&MedicationInterval>> {
    let mut rows: BTreeMap<&str, Vec<&MedicationInterval>> = BTreeMap::new();
    for interval in intervals {
        rows.entry(interval.drug_name.as_str()).or_default().push(interval);
    }
    rows
}
