//! sina-scoring
//!
//! Clinical scale definitions and the composite severity index. Pure
//! functions, no I/O. Each scale knows its nominal range and how a raw score
//! maps onto a severity fraction; the severity scorer combines the fractions
//! with a fixed weight table and the mood classifier reads YMRS/HDRS.

pub mod error;
pub mod mood;
pub mod normalize;
pub mod scales;
pub mod scoring;
pub mod severity;

use sina_core::models::scale::{ScaleId, ScaleResults};

use scoring::{ScoreRange, ValidationError};

/// Trait implemented by each scored clinical scale.
pub trait Scale: Send + Sync {
    fn id(&self) -> ScaleId;

    /// Human-readable name (e.g., "Young Mania Rating Scale").
    fn name(&self) -> &str;

    /// Nominal range of raw scores for this instrument.
    fn range(&self) -> ScoreRange;

    /// Map a raw score onto a severity fraction: 0 = least severe, 1 = most.
    ///
    /// Out-of-range raw scores pass through unclamped, so the result may
    /// leave [0, 1].
    fn normalize(&self, raw: f64) -> f64;

    /// Check a raw score against the nominal range.
    fn validate(&self, raw: f64) -> Option<ValidationError> {
        let range = self.range();
        if range.contains(raw) {
            return None;
        }
        Some(ValidationError {
            scale: self.id(),
            value: raw,
            expected_range: range,
            message: format!(
                "{}: score {} is outside range [{}, {}]",
                self.id(),
                raw,
                range.min,
                range.max,
            ),
        })
    }
}

/// All scales that feed the severity index.
pub fn all_scales() -> Vec<&'static dyn Scale> {
    ScaleId::SCORED.iter().filter_map(|id| get_scale(*id)).collect()
}

/// Look up a scored scale. Legacy ALDA parts have no scale of their own.
pub fn get_scale(id: ScaleId) -> Option<&'static dyn Scale> {
    match id {
        ScaleId::Gaf => Some(&scales::gaf::Gaf),
        ScaleId::Ymrs => Some(&scales::ymrs::Ymrs),
        ScaleId::Hdrs => Some(&scales::hdrs::Hdrs),
        ScaleId::Alda => Some(&scales::alda::Alda),
        ScaleId::Spaq => Some(&scales::spaq::Spaq),
        ScaleId::Sao => Some(&scales::sao::Sao),
        ScaleId::AldaA | ScaleId::AldaB => None,
    }
}

/// Range-check every recorded value of a visit. Advisory only: scoring never
/// rejects or clamps out-of-range values.
pub fn validate_results(results: &ScaleResults) -> Vec<ValidationError> {
    results
        .iter()
        .filter_map(|(id, raw)| match get_scale(id) {
            Some(scale) => scale.validate(raw),
            None => scales::alda::validate_part(id, raw),
        })
        .collect()
}
