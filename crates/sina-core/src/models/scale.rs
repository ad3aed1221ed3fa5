use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreError;

/// A clinical rating scale captured at a visit.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export)]
pub enum ScaleId {
    /// Global Assessment of Functioning. Higher = better functioning.
    Gaf,
    /// Young Mania Rating Scale.
    Ymrs,
    /// Hamilton Depression Rating Scale.
    Hdrs,
    /// Alda scale for lithium response. Higher = better response.
    Alda,
    /// Seasonal Pattern Assessment Questionnaire.
    Spaq,
    /// Morningness–eveningness questionnaire (chronotype).
    Sao,
    /// Legacy two-part ALDA, criterion A.
    AldaA,
    /// Legacy two-part ALDA, criterion B (subtracted from A).
    AldaB,
}

impl ScaleId {
    /// The six scales that feed the severity index, in weight-table order.
    pub const SCORED: [ScaleId; 6] = [
        ScaleId::Gaf,
        ScaleId::Alda,
        ScaleId::Sao,
        ScaleId::Spaq,
        ScaleId::Ymrs,
        ScaleId::Hdrs,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ScaleId::Gaf => "GAF",
            ScaleId::Ymrs => "YMRS",
            ScaleId::Hdrs => "HDRS",
            ScaleId::Alda => "ALDA",
            ScaleId::Spaq => "SPAQ",
            ScaleId::Sao => "SAO",
            ScaleId::AldaA => "ALDA_A",
            ScaleId::AldaB => "ALDA_B",
        }
    }

    /// Raw value assumed when a record has no entry for this scale.
    pub fn default_raw(self) -> f64 {
        match self {
            ScaleId::Gaf => 55.0,
            ScaleId::Sao => 50.0,
            _ => 0.0,
        }
    }

    pub fn is_legacy(self) -> bool {
        matches!(self, ScaleId::AldaA | ScaleId::AldaB)
    }
}

impl fmt::Display for ScaleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScaleId {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "GAF" => Ok(ScaleId::Gaf),
            "YMRS" => Ok(ScaleId::Ymrs),
            "HDRS" | "HAM-D" => Ok(ScaleId::Hdrs),
            "ALDA" => Ok(ScaleId::Alda),
            "SPAQ" => Ok(ScaleId::Spaq),
            "SAO" | "SAÖ" => Ok(ScaleId::Sao),
            "ALDA_A" => Ok(ScaleId::AldaA),
            "ALDA_B" => Ok(ScaleId::AldaB),
            _ => Err(CoreError::UnknownScale(s.to_string())),
        }
    }
}

/// One recorded scale value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ScaleResult {
    pub raw_score: f64,
}

/// Scale results of a single visit, keyed by scale.
///
/// Values are kept exactly as entered; fallbacks are applied on read.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ScaleResults(BTreeMap<ScaleId, ScaleResult>);

impl ScaleResults {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: ScaleId, raw_score: f64) -> Option<f64> {
        self.0
            .insert(id, ScaleResult { raw_score })
            .map(|prev| prev.raw_score)
    }

    pub fn remove(&mut self, id: ScaleId) -> Option<f64> {
        self.0.remove(&id).map(|r| r.raw_score)
    }

    /// The recorded raw value, if any.
    pub fn get(&self, id: ScaleId) -> Option<f64> {
        self.0.get(&id).map(|r| r.raw_score)
    }

    pub fn contains(&self, id: ScaleId) -> bool {
        self.0.contains_key(&id)
    }

    /// The recorded raw value, or the scale's fallback when absent.
    pub fn raw_or_default(&self, id: ScaleId) -> f64 {
        self.get(id).unwrap_or_else(|| id.default_raw())
    }

    /// Effective ALDA total: the single `ALDA` entry when present, otherwise
    /// `ALDA_A - ALDA_B` with missing parts counted as zero.
    pub fn alda_raw(&self) -> f64 {
        match self.get(ScaleId::Alda) {
            Some(alda) => alda,
            None => {
                self.raw_or_default(ScaleId::AldaA) - self.raw_or_default(ScaleId::AldaB)
            }
        }
    }

    /// Rewrite the legacy two-part ALDA into the single `ALDA` entry.
    ///
    /// Returns `true` when the record was upgraded. Records that already have
    /// `ALDA` only lose their stale legacy keys.
    pub fn upgrade_legacy_alda(&mut self) -> bool {
        let has_legacy = self.contains(ScaleId::AldaA) || self.contains(ScaleId::AldaB);
        if !has_legacy {
            return false;
        }
        let alda = self.alda_raw();
        let upgraded = !self.contains(ScaleId::Alda);
        self.remove(ScaleId::AldaA);
        self.remove(ScaleId::AldaB);
        self.insert(ScaleId::Alda, alda);
        upgraded
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ScaleId, f64)> + '_ {
        self.0.iter().map(|(id, r)| (*id, r.raw_score))
    }
}

impl FromIterator<(ScaleId, f64)> for ScaleResults {
    fn from_iter<I: IntoIterator<Item = (ScaleId, f64)>>(iter: I) -> Self {
        let mut results = ScaleResults::new();
        for (id, raw) in iter {
            results.insert(id, raw);
        }
        results
    }
}
