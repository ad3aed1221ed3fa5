//! Caller-owned, in-memory record collection.
//!
//! Mirrors the edit flows of the record store: records are appended, replaced
//! whole by id, or deleted by id. Nothing here touches storage.

use std::collections::BTreeMap;

use uuid::Uuid;

use crate::error::CoreError;
use crate::models::patient::{Patient, PatientSummary};
use crate::models::record::AssessmentRecord;

#[derive(Debug, Clone, Default)]
pub struct RecordBook {
    records: Vec<AssessmentRecord>,
}

impl RecordBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(records: Vec<AssessmentRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[AssessmentRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<AssessmentRecord> {
        self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: Uuid) -> Option<&AssessmentRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    pub fn insert(&mut self, record: AssessmentRecord) -> Result<(), CoreError> {
        if self.get(record.id).is_some() {
            return Err(CoreError::DuplicateRecord(record.id));
        }
        self.records.push(record);
        Ok(())
    }

    /// Replace the record stored under `id`, returning the previous version.
    ///
    /// The replacement keeps `id` regardless of the id it carries.
    pub fn replace(
        &mut self,
        id: Uuid,
        mut record: AssessmentRecord,
    ) -> Result<AssessmentRecord, CoreError> {
        let slot = self
            .records
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(CoreError::RecordNotFound(id))?;
        record.id = id;
        Ok(std::mem::replace(slot, record))
    }

    pub fn remove(&mut self, id: Uuid) -> Result<AssessmentRecord, CoreError> {
        let pos = self
            .records
            .iter()
            .position(|r| r.id == id)
            .ok_or(CoreError::RecordNotFound(id))?;
        Ok(self.records.remove(pos))
    }

    /// Records of one patient, oldest first.
    pub fn records_for(&self, national_id: &str) -> Vec<&AssessmentRecord> {
        let mut matching: Vec<_> = self
            .records
            .iter()
            .filter(|r| r.national_id() == Some(national_id))
            .collect();
        matching.sort_by_key(|r| r.assessed_at);
        matching
    }

    /// One entry per distinct national id, sorted by id.
    pub fn patients(&self) -> Vec<PatientSummary> {
        let mut by_id: BTreeMap<&str, Vec<AssessmentRecord>> = BTreeMap::new();
        for record in &self.records {
            if let Some(national_id) = record.national_id() {
                by_id.entry(national_id).or_default().push(record.clone());
            }
        }
        by_id
            .into_iter()
            .map(|(national_id, records)| Patient::from_records(national_id, records).summary())
            .collect()
    }
}
