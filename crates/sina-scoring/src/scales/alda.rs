use sina_core::models::scale::ScaleId;

use crate::scoring::{ScoreRange, ValidationError};
use crate::Scale;

/// ALDA: retrospective lithium response scale. Total = A - B, -10 to 10.
/// Higher = better response, so the severity fraction is inverted.
pub struct Alda;

/// Range of each part of the legacy two-part form.
pub const PART_RANGE: ScoreRange = ScoreRange::integer(0.0, 10.0);

impl Scale for Alda {
    fn id(&self) -> ScaleId {
        ScaleId::Alda
    }

    fn name(&self) -> &str {
        "Alda Lithium Response Scale"
    }

    fn range(&self) -> ScoreRange {
        ScoreRange::integer(-10.0, 10.0)
    }

    fn normalize(&self, raw: f64) -> f64 {
        1.0 - raw / 10.0
    }
}

/// Range check for legacy `ALDA_A` / `ALDA_B` entries.
pub fn validate_part(id: ScaleId, raw: f64) -> Option<ValidationError> {
    if !id.is_legacy() || PART_RANGE.contains(raw) {
        return None;
    }
    Some(ValidationError {
        scale: id,
        value: raw,
        expected_range: PART_RANGE,
        message: format!(
            "{id}: score {raw} is outside range [{}, {}]",
            PART_RANGE.min, PART_RANGE.max
        ),
    })
}
