use serde::{Deserialize, Serialize};
use sina_core::models::scale::ScaleId;
use ts_rs::TS;

use crate::scoring::ScoreRange;
use crate::Scale;

/// SAO: morningness–eveningness questionnaire, 16–86.
/// Scored by chronotype; evening types carry the highest weight.
pub struct Sao;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Chronotype {
    Morning = 0,
    Intermediate = 1,
    Evening = 2,
}

impl Chronotype {
    pub fn from_raw(raw: f64) -> Self {
        if raw <= 41.0 {
            Chronotype::Evening
        } else if raw <= 58.0 {
            Chronotype::Intermediate
        } else {
            Chronotype::Morning
        }
    }

    pub fn bucket(self) -> u8 {
        self as u8
    }
}

impl Scale for Sao {
    fn id(&self) -> ScaleId {
        ScaleId::Sao
    }

    fn name(&self) -> &str {
        "Morningness–Eveningness Questionnaire"
    }

    fn range(&self) -> ScoreRange {
        ScoreRange::integer(16.0, 86.0)
    }

    fn normalize(&self, raw: f64) -> f64 {
        f64::from(Chronotype::from_raw(raw).bucket()) / 2.0
    }
}
