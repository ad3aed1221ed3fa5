//! sina-timeline
//!
//! Longitudinal views over assessment records: per-patient timelines with
//! severity and mood per visit, progress between visits, medication usage
//! intervals for Gantt-style display, and consecutive-visit training rows.
//!
//! Every dashboard and report derives these through this crate rather than
//! recomputing them, so all views agree.

pub mod medication;
pub mod progress;
pub mod timeline;
pub mod training;
