//! Consecutive-visit rows for the treatment-response model.
//!
//! Each row pairs two consecutive scored visits of one patient: features come
//! from the earlier visit (baseline index, baseline raw scales, drugs in use),
//! the label is the progress percentage to the later visit.

use std::collections::{BTreeMap, BTreeSet};

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use sina_core::models::record::AssessmentRecord;
use sina_core::models::scale::ScaleId;
use ts_rs::TS;

use crate::progress::progress_percent;
use crate::timeline::group_by_patient;

/// Baseline scales every row must carry, in feature order.
pub const BASELINE_SCALES: [ScaleId; 6] = [
    ScaleId::Gaf,
    ScaleId::Ymrs,
    ScaleId::Hdrs,
    ScaleId::Alda,
    ScaleId::Spaq,
    ScaleId::Sao,
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TrainingRow {
    pub national_id: String,
    pub from: Timestamp,
    pub to: Timestamp,
    pub baseline_score: f64,
    pub baseline_scales: BTreeMap<ScaleId, f64>,
    /// Normalized drug names in use at the earlier visit.
    pub medications: BTreeSet<String>,
    /// Label: `(baseline - next) / baseline × 100`.
    pub progress_percent: f64,
}

impl TrainingRow {
    /// Numeric feature vector matching [`TrainingSet::feature_names`].
    pub fn features(&self, drug_vocabulary: &[String]) -> Vec<f64> {
        let mut features = Vec::with_capacity(1 + BASELINE_SCALES.len() + drug_vocabulary.len());
        features.push(self.baseline_score);
        features.extend(
            BASELINE_SCALES
                .iter()
                .map(|id| self.baseline_scales.get(id).copied().unwrap_or_default()),
        );
        features.extend(
            drug_vocabulary
                .iter()
                .map(|drug| if self.medications.contains(drug) { 1.0 } else { 0.0 }),
        );
        features
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TrainingSet {
    /// Every normalized drug name seen on a scored visit, sorted.
    pub drug_vocabulary: Vec<String>,
    pub rows: Vec<TrainingRow>,
    /// Pairs dropped because the earlier visit lacks a baseline scale.
    pub skipped_incomplete: usize,
    /// Records left out because they carry no national id.
    pub skipped_without_id: usize,
}

impl TrainingSet {
    pub fn feature_names(&self) -> Vec<String> {
        let mut names = vec!["baseline_score".to_string()];
        names.extend(
            BASELINE_SCALES
                .iter()
                .map(|id| format!("baseline_{}", id.as_str().to_lowercase())),
        );
        names.extend(self.drug_vocabulary.iter().map(|drug| format!("drug_{drug}")));
        names
    }
}

/// Build training rows from every patient's consecutive scored visits.
///
/// Pairs whose earlier index is not positive produce no row.
pub fn build_training_set(records: &[AssessmentRecord]) -> TrainingSet {
    let groups = group_by_patient(records);
    let timelines = groups.timelines();

    let drug_vocabulary: Vec<String> = timelines
        .iter()
        .flat_map(|t| t.scored_visits())
        .flat_map(|(visit, _)| visit.medications.iter().map(|m| m.normalized_name()))
        .filter(|name| !name.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let mut rows = Vec::new();
    let mut skipped_incomplete = 0;
    for timeline in &timelines {
        let scored: Vec<_> = timeline.scored_visits().collect();
        for pair in scored.windows(2) {
            let (earlier, baseline_score) = pair[0];
            let (later, next_score) = pair[1];
            if baseline_score <= 0.0 {
                continue;
            }
            let baseline_scales: Option<BTreeMap<_, _>> = BASELINE_SCALES
                .iter()
                .map(|&id| earlier.scales.get(id).map(|raw| (id, raw)))
                .collect();
            let Some(baseline_scales) = baseline_scales else {
                skipped_incomplete += 1;
                continue;
            };
            rows.push(TrainingRow {
                national_id: timeline.national_id.clone(),
                from: earlier.assessed_at,
                to: later.assessed_at,
                baseline_score,
                baseline_scales,
                medications: earlier
                    .medications
                    .iter()
                    .map(|m| m.normalized_name())
                    .filter(|name| !name.is_empty())
                    .collect(),
                progress_percent: progress_percent(baseline_score, next_score),
            });
        }
    }

    if skipped_incomplete > 0 {
        tracing::warn!(skipped = skipped_incomplete, "visit pairs without full baseline scales dropped");
    }
    tracing::debug!(rows = rows.len(), drugs = drug_vocabulary.len(), "built training set");

    TrainingSet {
        drug_vocabulary,
        rows,
        skipped_incomplete,
        skipped_without_id: groups.skipped_without_id,
    }
}
