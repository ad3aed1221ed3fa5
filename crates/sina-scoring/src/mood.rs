use std::fmt;

use serde::{Deserialize, Serialize};
use sina_core::models::scale::{ScaleId, ScaleResults};
use ts_rs::TS;

/// YMRS at or above this is mania.
pub const MANIA_YMRS: f64 = 12.0;
/// YMRS at or above this (and below mania) is hypomania.
pub const HYPOMANIA_YMRS: f64 = 7.0;
/// HDRS at or above this is severe depression.
pub const SEVERE_DEPRESSION_HDRS: f64 = 17.0;
/// HDRS at or above this (and below severe) is mild depression.
pub const MILD_DEPRESSION_HDRS: f64 = 8.0;

/// Discrete mood polarity on the life chart, -2 to 2.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum MoodState {
    SevereDepression = -2,
    MildDepression = -1,
    Euthymia = 0,
    Hypomania = 1,
    Mania = 2,
}

impl MoodState {
    pub fn level(self) -> i8 {
        self as i8
    }

    pub fn from_level(level: i8) -> Option<Self> {
        match level {
            -2 => Some(MoodState::SevereDepression),
            -1 => Some(MoodState::MildDepression),
            0 => Some(MoodState::Euthymia),
            1 => Some(MoodState::Hypomania),
            2 => Some(MoodState::Mania),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MoodState::SevereDepression => "Severe depression",
            MoodState::MildDepression => "Mild depression",
            MoodState::Euthymia => "Euthymia",
            MoodState::Hypomania => "Hypomania",
            MoodState::Mania => "Mania",
        }
    }
}

impl fmt::Display for MoodState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Classify mood from raw YMRS and HDRS totals.
///
/// Elevation is checked before depression: a visit meeting both a mania and a
/// depression threshold classifies as (hypo)mania.
pub fn classify(ymrs: f64, hdrs: f64) -> MoodState {
    if ymrs >= MANIA_YMRS {
        MoodState::Mania
    } else if ymrs >= HYPOMANIA_YMRS {
        MoodState::Hypomania
    } else if hdrs >= SEVERE_DEPRESSION_HDRS {
        MoodState::SevereDepression
    } else if hdrs >= MILD_DEPRESSION_HDRS {
        MoodState::MildDepression
    } else {
        MoodState::Euthymia
    }
}

/// Classify a visit; missing YMRS/HDRS count as 0.
pub fn classify_results(results: &ScaleResults) -> MoodState {
    classify(
        results.raw_or_default(ScaleId::Ymrs),
        results.raw_or_default(ScaleId::Hdrs),
    )
}
