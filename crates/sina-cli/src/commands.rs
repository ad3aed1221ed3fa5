use std::path::{Path, PathBuf};

use eyre::Result;
use jiff::Timestamp;
use serde::Serialize;
use sina_core::catalog;
use sina_core::ingest::{self, IngestReport};
use sina_scoring::severity::SeverityBand;
use sina_timeline::medication::{self, MedicationInterval};
use sina_timeline::progress::{IntervalProgress, Progress};
use sina_timeline::timeline::{self, PatientTimeline};
use sina_timeline::training;

use crate::config::{self, LogFormat, SinaConfig};

pub fn load_records(path: &Path) -> Result<IngestReport> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| eyre::eyre!("failed to read records at {}: {e}", path.display()))?;
    let report = ingest::ingest_json(&contents)?;
    tracing::info!(
        path = %path.display(),
        records = report.records.len(),
        rejected = report.rejected.len(),
        "records loaded"
    );
    Ok(report)
}

fn print_rejected(report: &IngestReport) {
    for rejected in &report.rejected {
        eprintln!(
            "rejected record #{} ({}): {}",
            rejected.index,
            rejected.record_id.as_deref().unwrap_or("no id"),
            rejected.reason
        );
    }
}

pub fn patients(report: &IngestReport) -> Result<()> {
    let groups = timeline::group_by_patient(&report.records);
    let summaries: Vec<_> = groups.patients.iter().map(|p| p.summary()).collect();
    if summaries.is_empty() {
        println!("No patients found.");
    }
    for summary in &summaries {
        let last = summary
            .last_assessed_at
            .map(|t| t.strftime("%Y-%m-%d").to_string())
            .unwrap_or_default();
        println!(
            "{:<14} {:<28} {:>4} visits  last {last}",
            summary.national_id, summary.display_name, summary.record_count
        );
    }

    let skipped = groups.skipped_without_id;
    if skipped > 0 {
        eprintln!("{skipped} record(s) without a national id were left out");
    }
    print_rejected(report);
    Ok(())
}

fn patient_timeline(report: &IngestReport, patient: &str) -> Result<PatientTimeline> {
    let timeline = timeline::build_patient_timeline(&report.records, patient);
    if timeline.is_empty() {
        return Err(eyre::eyre!("no records for patient {patient}"));
    }
    Ok(timeline)
}

#[derive(Serialize)]
struct TimelineReport {
    #[serde(flatten)]
    timeline: PatientTimeline,
    overall_progress: Option<Progress>,
    interval_progress: Vec<IntervalProgress>,
}

pub fn timeline(report: &IngestReport, patient: &str, json: bool) -> Result<()> {
    let timeline = patient_timeline(report, patient)?;
    let overall_progress = timeline.overall_progress();

    if json {
        let interval_progress = timeline.interval_progress();
        let out = TimelineReport {
            timeline,
            overall_progress,
            interval_progress,
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!("{} ({})", timeline.display_name, timeline.national_id);
    for visit in &timeline.visits {
        let (score, band) = match visit.severity {
            Some(score) => (format!("{score:.1}"), SeverityBand::from_score(score).label()),
            None => ("-".to_string(), "-"),
        };
        let drugs: Vec<_> = visit.medications.iter().map(|m| m.name.as_str()).collect();
        println!(
            "{}  {:>6}  {:<9}  {:<18}  {}",
            visit.assessed_at.strftime("%Y-%m-%d %H:%M"),
            score,
            band,
            visit.mood.label(),
            drugs.join(", ")
        );
    }
    match overall_progress {
        Some(p) => println!(
            "Progress: {:+.1}% ({:.1} -> {:.1})",
            p.display_delta, p.first_score, p.last_score
        ),
        None => println!("Progress: needs at least two scored visits"),
    }
    Ok(())
}

pub fn medications(report: &IngestReport, patient: &str, now: Option<&str>, json: bool) -> Result<()> {
    let timeline = patient_timeline(report, patient)?;
    let now = match now {
        Some(value) => ingest::parse_timestamp(value)?,
        None => Timestamp::now(),
    };
    let intervals = medication::build_intervals(&timeline.visits, now);

    if json {
        println!("{}", serde_json::to_string_pretty(&intervals)?);
        return Ok(());
    }
    if intervals.is_empty() {
        println!("No medications recorded.");
    }
    for (drug, rows) in medication::group_by_drug(&intervals) {
        let group = catalog::find_drug(drug)
            .map(|info| info.group.label())
            .unwrap_or("unlisted");
        println!("{drug} [{group}]");
        for MedicationInterval { dose, start, end, .. } in rows {
            println!(
                "  {} .. {}  {dose}",
                start.strftime("%Y-%m-%d"),
                end.strftime("%Y-%m-%d")
            );
        }
    }
    Ok(())
}

pub fn training(report: &IngestReport, out: Option<&Path>) -> Result<()> {
    let set = training::build_training_set(&report.records);
    let json = serde_json::to_string_pretty(&set)?;
    match out {
        Some(path) => {
            std::fs::write(path, json.as_bytes())
                .map_err(|e| eyre::eyre!("failed to write {}: {e}", path.display()))?;
            tracing::info!(path = %path.display(), rows = set.rows.len(), "training rows written");
        }
        None => println!("{json}"),
    }
    if set.skipped_incomplete > 0 {
        eprintln!("{} visit pair(s) lacked baseline scales", set.skipped_incomplete);
    }
    Ok(())
}

pub fn validate(report: &IngestReport) -> Result<()> {
    let mut issues = 0;
    for record in &report.records {
        for error in sina_scoring::validate_results(&record.scales) {
            issues += 1;
            println!(
                "{} {}: {}",
                record.id,
                record.assessed_at.strftime("%Y-%m-%d"),
                error
            );
        }
    }
    print_rejected(report);
    println!(
        "{} record(s) checked, {issues} out-of-range value(s), {} rejected",
        report.records.len(),
        report.rejected.len()
    );
    Ok(())
}

pub struct ConfigUpdate {
    pub records_path: Option<PathBuf>,
    pub log_level: Option<String>,
    pub log_format: Option<LogFormat>,
}

impl ConfigUpdate {
    fn is_empty(&self) -> bool {
        self.records_path.is_none() && self.log_level.is_none() && self.log_format.is_none()
    }
}

pub fn config(path: &Path, mut current: SinaConfig, update: ConfigUpdate) -> Result<()> {
    if !update.is_empty() {
        if let Some(records_path) = update.records_path {
            current.records_path = Some(records_path);
        }
        if let Some(log_level) = update.log_level {
            current.log_level = log_level;
        }
        if let Some(log_format) = update.log_format {
            current.log_format = log_format;
        }
        config::save_config(path, &current)?;
    }
    println!("# {}", path.display());
    println!("{}", serde_json::to_string_pretty(&current)?);
    Ok(())
}
