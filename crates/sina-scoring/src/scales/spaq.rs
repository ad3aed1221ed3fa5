use sina_core::models::scale::ScaleId;

use crate::scoring::ScoreRange;
use crate::Scale;

/// SPAQ: Seasonal Pattern Assessment Questionnaire, global seasonality score.
pub struct Spaq;

impl Scale for Spaq {
    fn id(&self) -> ScaleId {
        ScaleId::Spaq
    }

    fn name(&self) -> &str {
        "Seasonal Pattern Assessment Questionnaire"
    }

    fn range(&self) -> ScoreRange {
        ScoreRange::integer(0.0, 50.0)
    }

    fn normalize(&self, raw: f64) -> f64 {
        raw / 15.0
    }
}
