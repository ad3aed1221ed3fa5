#![allow(dead_code)]

use jiff::Timestamp;
use sina_core::models::medication::Medication;
use sina_core::models::record::{AssessmentRecord, PatientRef};
use sina_core::models::scale::{ScaleId, ScaleResults};
use uuid::Uuid;

pub fn ts(s: &str) -> Timestamp {
    s.parse().unwrap()
}

pub fn record(national_id: Option<&str>, at: &str, scales: &[(ScaleId, f64)]) -> AssessmentRecord {
    AssessmentRecord {
        id: Uuid::new_v4(),
        assessed_at: ts(at),
        patient: PatientRef {
            national_id: national_id.map(str::to_string),
            display_name: "Test Patient".into(),
        },
        scales: scales.iter().copied().collect::<ScaleResults>(),
        medications: Vec::new(),
        note: None,
    }
}

pub fn with_drugs(mut record: AssessmentRecord, drugs: &[&str]) -> AssessmentRecord {
    record.medications = drugs.iter().map(|d| Medication::new(*d, "300 mg")).collect();
    record
}

/// Every scale at its worst end; index 100.0.
pub const HIGHEST: [(ScaleId, f64); 6] = [
    (ScaleId::Gaf, 95.0),
    (ScaleId::Alda, 0.0),
    (ScaleId::Sao, 30.0),
    (ScaleId::Spaq, 15.0),
    (ScaleId::Ymrs, 25.0),
    (ScaleId::Hdrs, 30.0),
];

/// Index 46.9.
pub const REFERENCE: [(ScaleId, f64); 6] = [
    (ScaleId::Gaf, 55.0),
    (ScaleId::Alda, 0.0),
    (ScaleId::Sao, 50.0),
    (ScaleId::Spaq, 0.0),
    (ScaleId::Ymrs, 0.0),
    (ScaleId::Hdrs, 0.0),
];

/// Index 0.0.
pub const LOWEST: [(ScaleId, f64); 6] = [
    (ScaleId::Gaf, 5.0),
    (ScaleId::Alda, 10.0),
    (ScaleId::Sao, 70.0),
    (ScaleId::Spaq, 0.0),
    (ScaleId::Ymrs, 0.0),
    (ScaleId::Hdrs, 0.0),
];

pub fn approx(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}
