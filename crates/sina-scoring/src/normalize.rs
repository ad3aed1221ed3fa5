use serde::{Deserialize, Serialize};
use sina_core::models::scale::{ScaleId, ScaleResults};
use ts_rs::TS;

use crate::error::ScoringError;
use crate::scales::{alda::Alda, gaf::Gaf, hdrs::Hdrs, sao::Sao, spaq::Spaq, ymrs::Ymrs};
use crate::{get_scale, Scale};

/// Normalize one raw score of a scored scale.
pub fn normalize(scale: ScaleId, raw: f64) -> Result<f64, ScoringError> {
    get_scale(scale)
        .map(|s| s.normalize(raw))
        .ok_or(ScoringError::NotScored(scale))
}

/// Normalize by scale name, e.g. `"GAF"` or `"saö"`.
pub fn normalize_named(name: &str, raw: f64) -> Result<f64, ScoringError> {
    normalize(name.parse()?, raw)
}

/// Severity fractions of the six scored scales for one visit.
///
/// Missing scales take their fallback raw value first; ALDA resolves the
/// legacy two-part form.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NormalizedScales {
    pub gaf: f64,
    pub alda: f64,
    pub sao: f64,
    pub spaq: f64,
    pub ymrs: f64,
    pub hdrs: f64,
}

impl NormalizedScales {
    pub fn from_results(results: &ScaleResults) -> Self {
        Self {
            gaf: Gaf.normalize(results.raw_or_default(ScaleId::Gaf)),
            alda: Alda.normalize(results.alda_raw()),
            sao: Sao.normalize(results.raw_or_default(ScaleId::Sao)),
            spaq: Spaq.normalize(results.raw_or_default(ScaleId::Spaq)),
            ymrs: Ymrs.normalize(results.raw_or_default(ScaleId::Ymrs)),
            hdrs: Hdrs.normalize(results.raw_or_default(ScaleId::Hdrs)),
        }
    }

    pub fn get(&self, scale: ScaleId) -> Option<f64> {
        match scale {
            ScaleId::Gaf => Some(self.gaf),
            ScaleId::Alda => Some(self.alda),
            ScaleId::Sao => Some(self.sao),
            ScaleId::Spaq => Some(self.spaq),
            ScaleId::Ymrs => Some(self.ymrs),
            ScaleId::Hdrs => Some(self.hdrs),
            ScaleId::AldaA | ScaleId::AldaB => None,
        }
    }
}
