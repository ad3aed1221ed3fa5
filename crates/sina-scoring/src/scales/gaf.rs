use sina_core::models::scale::ScaleId;

use crate::scoring::ScoreRange;
use crate::Scale;

/// GAF: Global Assessment of Functioning, 0–100. The fraction is taken from
/// the ten-point band as `1 - band/9`, the form historical indices were
/// computed with.
pub struct Gaf;

/// Lower bounds of the ten GAF bands, best band first.
const BAND_FLOORS: [f64; 9] = [90.0, 80.0, 70.0, 60.0, 50.0, 40.0, 31.0, 20.0, 10.0];

/// Ordinal band 0 (≥ 90) to 9 (< 10).
pub fn gaf_bucket(raw: f64) -> u8 {
    BAND_FLOORS
        .iter()
        .position(|floor| raw >= *floor)
        .unwrap_or(BAND_FLOORS.len()) as u8
}

impl Scale for Gaf {
    fn id(&self) -> ScaleId {
        ScaleId::Gaf
    }

    fn name(&self) -> &str {
        "Global Assessment of Functioning"
    }

    fn range(&self) -> ScoreRange {
        ScoreRange::integer(0.0, 100.0)
    }

    fn normalize(&self, raw: f64) -> f64 {
        1.0 - f64::from(gaf_bucket(raw)) / 9.0
    }
}
