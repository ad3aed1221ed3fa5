use sina_core::models::scale::{ScaleId, ScaleResults};
use sina_scoring::severity::{breakdown, round1, score, SeverityBand, WEIGHTS};

fn results(values: &[(ScaleId, f64)]) -> ScaleResults {
    values.iter().copied().collect()
}

#[test]
fn weights_sum_to_one() {
    let total: f64 = WEIGHTS.iter().map(|(_, w)| w).sum();
    assert!((total - 1.0).abs() < 1e-12);
}

#[test]
fn reference_visit_at_fallback_values() {
    // GAF 55 -> band 4 -> 5/9; ALDA 0 -> 1.0; SAO 50 -> 0.5; the rest 0.
    // 100 × (0.35 × 5/9 + 0.20 × 1.0 + 0.15 × 0.5) = 46.94…
    let explicit = results(&[
        (ScaleId::Gaf, 55.0),
        (ScaleId::Ymrs, 0.0),
        (ScaleId::Hdrs, 0.0),
        (ScaleId::Alda, 0.0),
        (ScaleId::Sao, 50.0),
        (ScaleId::Spaq, 0.0),
    ]);
    assert_eq!(score(&explicit), Some(46.9));

    // A single recorded scale at its fallback value gives the same index.
    assert_eq!(score(&results(&[(ScaleId::Gaf, 55.0)])), Some(46.9));
}

#[test]
fn empty_results_have_no_score() {
    assert_eq!(score(&ScaleResults::new()), None);
    assert!(breakdown(&ScaleResults::new()).is_none());
}

#[test]
fn index_extremes() {
    let lowest = results(&[
        (ScaleId::Gaf, 5.0),
        (ScaleId::Alda, 10.0),
        (ScaleId::Sao, 70.0),
        (ScaleId::Spaq, 0.0),
        (ScaleId::Ymrs, 0.0),
        (ScaleId::Hdrs, 0.0),
    ]);
    assert_eq!(score(&lowest), Some(0.0));

    let highest = results(&[
        (ScaleId::Gaf, 95.0),
        (ScaleId::Alda, 0.0),
        (ScaleId::Sao, 30.0),
        (ScaleId::Spaq, 15.0),
        (ScaleId::Ymrs, 25.0),
        (ScaleId::Hdrs, 30.0),
    ]);
    assert_eq!(score(&highest), Some(100.0));
}

#[test]
fn insertion_order_does_not_matter() {
    let entries = [
        (ScaleId::Gaf, 62.0),
        (ScaleId::Ymrs, 9.0),
        (ScaleId::Hdrs, 14.0),
        (ScaleId::Alda, 4.0),
        (ScaleId::Spaq, 7.0),
        (ScaleId::Sao, 44.0),
    ];
    let forward = score(&results(&entries));
    let mut reversed = entries;
    reversed.reverse();
    let mut rotated = entries;
    rotated.rotate_left(2);
    assert_eq!(forward, score(&results(&reversed)));
    assert_eq!(forward, score(&results(&rotated)));
}

#[test]
fn legacy_alda_scores_like_single_alda() {
    let legacy = results(&[(ScaleId::Gaf, 70.0), (ScaleId::AldaA, 7.0), (ScaleId::AldaB, 2.0)]);
    let single = results(&[(ScaleId::Gaf, 70.0), (ScaleId::Alda, 5.0)]);
    assert_eq!(score(&legacy), score(&single));
}

#[test]
fn out_of_range_inputs_are_not_clamped() {
    let extreme = results(&[
        (ScaleId::Gaf, 0.0),
        (ScaleId::Alda, -10.0),
        (ScaleId::Sao, 16.0),
        (ScaleId::Spaq, 45.0),
        (ScaleId::Ymrs, 60.0),
        (ScaleId::Hdrs, 52.0),
    ]);
    assert!(score(&extreme).unwrap() > 100.0);
}

#[test]
fn breakdown_adds_up() {
    let visit = results(&[(ScaleId::Gaf, 45.0), (ScaleId::Hdrs, 20.0), (ScaleId::Spaq, 6.0)]);
    let b = breakdown(&visit).unwrap();
    assert_eq!(b.contributions.len(), 6);
    let total: f64 = b.contributions.iter().map(|c| c.points).sum();
    assert_eq!(round1(total), b.score);
    assert_eq!(b.band, SeverityBand::from_score(b.score));

    let gaf = &b.contributions[0];
    assert_eq!(gaf.scale, ScaleId::Gaf);
    assert_eq!(gaf.raw, 45.0);
    let sao = b.contributions.iter().find(|c| c.scale == ScaleId::Sao).unwrap();
    assert_eq!(sao.raw, 50.0);
}

#[test]
fn gauge_bands() {
    assert_eq!(SeverityBand::from_score(0.0), SeverityBand::Low);
    assert_eq!(SeverityBand::from_score(32.9), SeverityBand::Low);
    assert_eq!(SeverityBand::from_score(33.0), SeverityBand::Moderate);
    assert_eq!(SeverityBand::from_score(65.9), SeverityBand::Moderate);
    assert_eq!(SeverityBand::from_score(66.0), SeverityBand::High);
}

#[test]
fn rounding_to_one_decimal() {
    assert_eq!(round1(46.944), 46.9);
    assert_eq!(round1(12.36), 12.4);
    assert_eq!(round1(0.0), 0.0);
}

#[test]
fn visit_with_only_unreadable_scales_is_scored_at_fallbacks() {
    let record = sina_core::ingest::ingest_value(serde_json::json!({
        "degerlendirmeMeta": { "degerlendirmeTarihi": "2024-01-01" },
        "klinikOlcekSonuclari": { "YMRS": {} }
    }))
    .unwrap();

    assert_eq!(score(&record.scales), Some(46.9));
}
