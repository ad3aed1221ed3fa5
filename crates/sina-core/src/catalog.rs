//! Built-in psychiatric drug catalog.
//!
//! Used to annotate medication entries with their therapeutic group. Lookup
//! is case-insensitive and also matches the local spellings used in older
//! records.

use std::sync::LazyLock;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum DrugGroup {
    MoodStabilizer,
    AtypicalAntipsychotic,
    SsriAntidepressant,
    SnriAntidepressant,
    AtypicalAntidepressant,
    NassaAntidepressant,
}

impl DrugGroup {
    pub fn label(self) -> &'static str {
        match self {
            DrugGroup::MoodStabilizer => "Mood stabilizer",
            DrugGroup::AtypicalAntipsychotic => "Atypical antipsychotic",
            DrugGroup::SsriAntidepressant => "SSRI antidepressant",
            DrugGroup::SnriAntidepressant => "SNRI antidepressant",
            DrugGroup::AtypicalAntidepressant => "Atypical antidepressant",
            DrugGroup::NassaAntidepressant => "NaSSA antidepressant",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DrugInfo {
    pub name: String,
    pub aliases: Vec<String>,
    pub group: DrugGroup,
    pub note: String,
}

impl DrugInfo {
    fn matches(&self, query: &str) -> bool {
        self.name.to_lowercase() == query || self.aliases.iter().any(|a| a.to_lowercase() == query)
    }
}

static CATALOG: LazyLock<Vec<DrugInfo>> = LazyLock::new(|| {
    use DrugGroup::*;
    let entries: [(&str, &[&str], DrugGroup, &str); 16] = [
        ("Lithium", &["Lityum"], MoodStabilizer, "First-line for bipolar disorder; monitor serum levels."),
        ("Valproic Acid", &["Valproik Asit", "Valproate"], MoodStabilizer, "Monitor liver function."),
        ("Carbamazepine", &["Karbamazepin"], MoodStabilizer, "Also used for neuropathic pain; monitor serum levels."),
        ("Lamotrigine", &["Lamotrijin"], MoodStabilizer, "Watch for rash during titration."),
        ("Olanzapine", &["Olanzapin"], AtypicalAntipsychotic, "Metabolic side effects."),
        ("Risperidone", &["Risperidon"], AtypicalAntipsychotic, "Extrapyramidal side effects possible."),
        ("Quetiapine", &["Seroquel", "Ketiapin"], AtypicalAntipsychotic, "Strongly sedating."),
        ("Aripiprazole", &["Aripiprazol"], AtypicalAntipsychotic, "Partial dopamine agonist."),
        ("Fluoxetine", &["Fluoksetin"], SsriAntidepressant, ""),
        ("Sertraline", &["Sertralin"], SsriAntidepressant, ""),
        ("Paroxetine", &["Paroksetin"], SsriAntidepressant, "Short half-life."),
        ("Escitalopram", &[], SsriAntidepressant, "Well tolerated."),
        ("Venlafaxine", &["Venlafaksin"], SnriAntidepressant, "Titrate carefully."),
        ("Duloxetine", &["Duloksetin"], SnriAntidepressant, "Also used for neuropathic pain."),
        ("Bupropion", &[], AtypicalAntidepressant, "Dopamine and norepinephrine reuptake inhibitor."),
        ("Mirtazapine", &["Mirtazapin"], NassaAntidepressant, ""),
    ];
    entries
        .iter()
        .map(|(name, aliases, group, note)| DrugInfo {
            name: name.to_string(),
            aliases: aliases.iter().map(|a| a.to_string()).collect(),
            group: *group,
            note: note.to_string(),
        })
        .collect()
});

pub fn all_drugs() -> &'static [DrugInfo] {
    &CATALOG
}

/// Look up a drug by name or alias.
pub fn find_drug(name: &str) -> Option<&'static DrugInfo> {
    let query = name.trim().to_lowercase();
    CATALOG.iter().find(|d| d.matches(&query))
}
