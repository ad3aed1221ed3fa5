use sina_core::models::scale::ScaleId;

use crate::scoring::ScoreRange;
use crate::Scale;

/// HDRS: Hamilton Depression Rating Scale (17-item), total 0–52.
pub struct Hdrs;

impl Scale for Hdrs {
    fn id(&self) -> ScaleId {
        ScaleId::Hdrs
    }

    fn name(&self) -> &str {
        "Hamilton Depression Rating Scale"
    }

    fn range(&self) -> ScoreRange {
        ScoreRange::integer(0.0, 52.0)
    }

    fn normalize(&self, raw: f64) -> f64 {
        raw / 30.0
    }
}
