//! Ingestion of stored assessment documents.
//!
//! Records are stored as loosely-typed JSON documents written by hand-filled
//! clinical forms. This module upgrades them to [`AssessmentRecord`] one at a
//! time, so a single malformed document is rejected and reported without
//! failing the rest of the batch.

use std::collections::BTreeMap;

use jiff::civil;
use jiff::tz::TimeZone;
use jiff::Timestamp;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use ts_rs::TS;
use uuid::Uuid;

use crate::error::CoreError;
use crate::models::medication::{DoseTime, Medication};
use crate::models::record::{AssessmentRecord, PatientRef};
use crate::models::scale::{ScaleId, ScaleResults};

/// Outcome of ingesting a batch of stored documents.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct IngestReport {
    pub records: Vec<AssessmentRecord>,
    pub rejected: Vec<RejectedRecord>,
}

/// A stored document that could not be turned into a record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RejectedRecord {
    /// Position of the document in the input batch.
    pub index: usize,
    pub record_id: Option<String>,
    pub reason: String,
}

#[derive(Debug, Default, Deserialize)]
struct StoredRecord {
    #[serde(rename = "degerlendirmeMeta", default, deserialize_with = "null_as_default")]
    meta: StoredMeta,
    #[serde(rename = "hastaBilgileri", default, deserialize_with = "null_as_default")]
    patient: StoredPatient,
    #[serde(rename = "klinikOlcekSonuclari", default, deserialize_with = "null_as_default")]
    scales: BTreeMap<String, Value>,
    #[serde(rename = "tedaviKayitlari", default, deserialize_with = "null_as_default")]
    treatment: StoredTreatment,
}

#[derive(Debug, Default, Deserialize)]
struct StoredMeta {
    #[serde(rename = "kayitId", default)]
    record_id: Option<Value>,
    #[serde(rename = "degerlendirmeTarihi", default)]
    assessed_at: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct StoredPatient {
    #[serde(rename = "sosyodemografik", default, deserialize_with = "null_as_default")]
    demographics: StoredDemographics,
}

#[derive(Debug, Default, Deserialize)]
struct StoredDemographics {
    #[serde(rename = "tcKimlikNo", default)]
    national_id: Option<Value>,
    #[serde(rename = "adSoyad", default)]
    full_name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct StoredTreatment {
    #[serde(rename = "ilaclar", default, deserialize_with = "null_as_default")]
    medications: Vec<Option<StoredMedication>>,
    #[serde(rename = "not", default)]
    note: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct StoredMedication {
    #[serde(rename = "ad", default)]
    name: Option<String>,
    #[serde(rename = "doz", default)]
    dose: Option<Value>,
    #[serde(rename = "zamanlar", default, deserialize_with = "null_as_default")]
    times: Vec<Value>,
}

/// Stored forms write `null` for sections left empty; read those as empty.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Parse a JSON array of stored documents.
///
/// Fails only when the payload is not JSON or not an array; individual bad
/// documents end up in [`IngestReport::rejected`].
pub fn ingest_json(json: &str) -> Result<IngestReport, CoreError> {
    match serde_json::from_str::<Value>(json)? {
        Value::Array(values) => Ok(ingest_values(values)),
        other => Err(CoreError::NotAnArray(json_kind(&other).to_string())),
    }
}

/// Ingest already-parsed documents.
pub fn ingest_values(values: Vec<Value>) -> IngestReport {
    let mut report = IngestReport::default();
    for (index, value) in values.into_iter().enumerate() {
        let record_id = value
            .pointer("/degerlendirmeMeta/kayitId")
            .and_then(value_to_string);
        match ingest_value(value) {
            Ok(record) => report.records.push(record),
            Err(e) => {
                tracing::warn!(index, record_id = ?record_id, error = %e, "stored record rejected");
                report.rejected.push(RejectedRecord {
                    index,
                    record_id,
                    reason: e.to_string(),
                });
            }
        }
    }
    tracing::debug!(
        accepted = report.records.len(),
        rejected = report.rejected.len(),
        "ingested stored records"
    );
    report
}

/// Convert one stored document into a canonical record.
pub fn ingest_value(value: Value) -> Result<AssessmentRecord, CoreError> {
    let stored: StoredRecord = serde_json::from_value(value)?;

    let assessed_at = stored
        .meta
        .assessed_at
        .as_deref()
        .ok_or_else(|| CoreError::MissingField("degerlendirmeMeta.degerlendirmeTarihi".into()))
        .and_then(parse_timestamp)?;

    let id = match stored.meta.record_id.as_ref().and_then(value_to_string) {
        Some(raw) => match Uuid::parse_str(&raw) {
            Ok(id) => id,
            Err(e) => {
                tracing::debug!(record_id = %raw, error = %e, "non-uuid record id, assigning a new one");
                Uuid::new_v4()
            }
        },
        None => Uuid::new_v4(),
    };

    let national_id = stored
        .patient
        .demographics
        .national_id
        .as_ref()
        .and_then(value_to_string)
        .filter(|id| !id.is_empty());

    let mut scales = ScaleResults::new();
    for (name, entry) in &stored.scales {
        let Ok(scale) = name.parse::<ScaleId>() else {
            tracing::debug!(scale = %name, "ignoring unrecognised scale");
            continue;
        };
        match raw_score(entry) {
            Some(raw) => {
                scales.insert(scale, raw);
            }
            None => {
                tracing::warn!(record = %id, %scale, "unreadable scale value, using fallback");
                scales.insert(scale, scale.default_raw());
            }
        }
    }
    if scales.upgrade_legacy_alda() {
        tracing::debug!(record = %id, "upgraded legacy ALDA_A/ALDA_B entry");
    }

    let medications = stored
        .treatment
        .medications
        .into_iter()
        .flatten()
        .filter_map(medication)
        .collect();

    let note = stored
        .treatment
        .note
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty());

    Ok(AssessmentRecord {
        id,
        assessed_at,
        patient: PatientRef {
            national_id,
            display_name: stored.patient.demographics.full_name.unwrap_or_default(),
        },
        scales,
        medications,
        note,
    })
}

/// Parse an assessment timestamp.
///
/// Accepts RFC 3339 instants, offset-less datetimes and plain dates. Values
/// without an offset are taken as UTC.
pub fn parse_timestamp(value: &str) -> Result<Timestamp, CoreError> {
    let trimmed = value.trim();
    if let Ok(ts) = trimmed.parse::<Timestamp>() {
        return Ok(ts);
    }
    let zoned = if let Ok(dt) = trimmed.parse::<civil::DateTime>() {
        dt.to_zoned(TimeZone::UTC)
    } else {
        match trimmed.parse::<civil::Date>() {
            Ok(date) => date.to_zoned(TimeZone::UTC),
            Err(e) => {
                return Err(CoreError::InvalidTimestamp {
                    value: value.to_string(),
                    reason: e.to_string(),
                });
            }
        }
    };
    zoned
        .map(|z| z.timestamp())
        .map_err(|e| CoreError::InvalidTimestamp {
            value: value.to_string(),
            reason: e.to_string(),
        })
}

fn medication(stored: StoredMedication) -> Option<Medication> {
    let name = stored.name?.trim().to_string();
    if name.is_empty() {
        return None;
    }
    let times = stored
        .times
        .iter()
        .filter_map(Value::as_str)
        .filter_map(dose_time)
        .collect();
    Some(Medication {
        name,
        dose: stored
            .dose
            .as_ref()
            .and_then(value_to_string)
            .unwrap_or_default(),
        times,
    })
}

fn dose_time(label: &str) -> Option<DoseTime> {
    match label.trim().to_lowercase().as_str() {
        "sabah" | "morning" => Some(DoseTime::Morning),
        "öğle" | "ogle" | "noon" => Some(DoseTime::Noon),
        "akşam" | "aksam" | "evening" => Some(DoseTime::Evening),
        "gece" | "night" => Some(DoseTime::Night),
        _ => None,
    }
}

fn raw_score(entry: &Value) -> Option<f64> {
    let score = match entry {
        Value::Object(map) => map.get("hamSkor")?,
        other => other,
    };
    let raw = match score {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    raw.filter(|v| v.is_finite())
}

fn value_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
