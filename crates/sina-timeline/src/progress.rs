use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Relative change of the severity index between two visits.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Progress {
    pub first_score: f64,
    pub last_score: f64,
    /// `(first - last) / first × 100`; positive means the index fell.
    pub raw_percent: f64,
    /// Sign-flipped `raw_percent` for display, where a drop reads as a
    /// negative delta.
    pub display_delta: f64,
}

impl Progress {
    pub fn between(first_score: f64, last_score: f64) -> Self {
        let raw_percent = progress_percent(first_score, last_score);
        let display_delta = if raw_percent == 0.0 { 0.0 } else { -raw_percent };
        Self {
            first_score,
            last_score,
            raw_percent,
            display_delta,
        }
    }

    pub fn improved(&self) -> bool {
        self.raw_percent > 0.0
    }
}

/// Percentage improvement from `first` to `last`; 0 when `first` is not
/// positive.
pub fn progress_percent(first: f64, last: f64) -> f64 {
    if first > 0.0 {
        (first - last) / first * 100.0
    } else {
        0.0
    }
}

/// Progress across one pair of consecutive scored visits.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct IntervalProgress {
    pub from: Timestamp,
    pub to: Timestamp,
    pub progress: Progress,
}
