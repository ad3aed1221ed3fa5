//! Composite severity index ("system score").
//!
//! `100 × Σ wᵢ·nᵢ` over the six scored scales, rounded to one decimal. The
//! weight table is a fixed clinical weighting; changing it breaks
//! comparability with every stored historical score.

use serde::{Deserialize, Serialize};
use sina_core::models::record::AssessmentRecord;
use sina_core::models::scale::{ScaleId, ScaleResults};
use ts_rs::TS;

use crate::normalize::NormalizedScales;

/// Scale weights, summing to 1.0. Summation follows this order.
pub const WEIGHTS: [(ScaleId, f64); 6] = [
    (ScaleId::Gaf, 0.35),
    (ScaleId::Alda, 0.20),
    (ScaleId::Sao, 0.15),
    (ScaleId::Spaq, 0.15),
    (ScaleId::Ymrs, 0.075),
    (ScaleId::Hdrs, 0.075),
];

/// Severity index of a visit, or `None` when no scale was recorded at all.
pub fn score(results: &ScaleResults) -> Option<f64> {
    if results.is_empty() {
        return None;
    }
    Some(round1(100.0 * weighted_sum(&NormalizedScales::from_results(results))))
}

pub fn score_record(record: &AssessmentRecord) -> Option<f64> {
    score(&record.scales)
}

fn weighted_sum(normalized: &NormalizedScales) -> f64 {
    WEIGHTS
        .iter()
        .filter_map(|(scale, weight)| normalized.get(*scale).map(|n| n * weight))
        .sum()
}

/// Round half away from zero to one decimal place.
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Per-scale contribution to a severity index.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Contribution {
    pub scale: ScaleId,
    /// Raw value used, after fallbacks.
    pub raw: f64,
    pub normalized: f64,
    pub weight: f64,
    /// `100 × weight × normalized`, unrounded.
    pub points: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ScoreBreakdown {
    pub score: f64,
    pub band: SeverityBand,
    pub contributions: Vec<Contribution>,
}

/// Explain a severity index scale by scale.
pub fn breakdown(results: &ScaleResults) -> Option<ScoreBreakdown> {
    let score = score(results)?;
    let normalized = NormalizedScales::from_results(results);
    let contributions = WEIGHTS
        .iter()
        .filter_map(|(scale, weight)| {
            let n = normalized.get(*scale)?;
            let raw = match scale {
                ScaleId::Alda => results.alda_raw(),
                other => results.raw_or_default(*other),
            };
            Some(Contribution {
                scale: *scale,
                raw,
                normalized: n,
                weight: *weight,
                points: 100.0 * weight * n,
            })
        })
        .collect();
    Some(ScoreBreakdown {
        score,
        band: SeverityBand::from_score(score),
        contributions,
    })
}

/// Dashboard gauge band of a severity index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum SeverityBand {
    /// Below 33.
    Low,
    /// 33 up to 66.
    Moderate,
    /// 66 and above.
    High,
}

impl SeverityBand {
    pub fn from_score(score: f64) -> Self {
        if score < 33.0 {
            SeverityBand::Low
        } else if score < 66.0 {
            SeverityBand::Moderate
        } else {
            SeverityBand::High
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SeverityBand::Low => "low",
            SeverityBand::Moderate => "moderate",
            SeverityBand::High => "high",
        }
    }
}
