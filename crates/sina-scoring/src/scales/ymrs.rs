use sina_core::models::scale::ScaleId;

use crate::scoring::ScoreRange;
use crate::Scale;

/// YMRS: Young Mania Rating Scale. 11 items, total 0–60.
pub struct Ymrs;

impl Scale for Ymrs {
    fn id(&self) -> ScaleId {
        ScaleId::Ymrs
    }

    fn name(&self) -> &str {
        "Young Mania Rating Scale"
    }

    fn range(&self) -> ScoreRange {
        ScoreRange::integer(0.0, 60.0)
    }

    fn normalize(&self, raw: f64) -> f64 {
        raw / 25.0
    }
}
