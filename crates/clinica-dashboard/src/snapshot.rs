//! Patient snapshot input and the dashboard summary built from it.

use std::collections::BTreeSet;
use std::path::Path;

use clinica_core::lenient;
use clinica_core::models::assessment::AssessmentRecord;
use clinica_core::models::treatment::TreatmentPlan;
use clinica_instruments::InstrumentTable;
use clinica_instruments::definition::InstrumentDefinition;
use clinica_instruments::scoring::Interpretation;
use clinica_instruments::trend::{
    self, AssessmentStats, BaselineComparison, ComparisonSummary, TrendResult,
};
use clinica_progress::adherence::{AdherenceOptions, AdherenceSnapshot, compute_adherence_with};
use clinica_progress::roadmap::{self, RoadmapPeriod};
use jiff::{SignedDuration, Timestamp};
use serde::{Deserialize, Serialize};

use crate::config::DashboardConfig;

/// Everything the data-access layer exports for one patient.
#[derive(Debug, Clone, Deserialize)]
pub struct PatientSnapshot {
    /// Reference instant. Defaults to now when absent.
    #[serde(default)]
    pub as_of: Option<Timestamp>,
    /// Extra instruments beyond the built-in table.
    #[serde(default)]
    pub instruments: Vec<InstrumentDefinition>,
    /// Records that cannot be read are skipped.
    #[serde(default, deserialize_with = "lenient::skip_invalid")]
    pub assessments: Vec<AssessmentRecord>,
    #[serde(default)]
    pub plan: Option<TreatmentPlan>,
}

/// Latest standing on one instrument.
#[derive(Debug, Clone, Serialize)]
pub struct InstrumentStanding {
    pub instrument_id: String,
    pub name: String,
    pub latest_score: i32,
    pub administered_at: Timestamp,
    pub interpretation: Interpretation,
    pub trend: Option<TrendResult>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardSummary {
    pub as_of: Timestamp,
    pub stats: AssessmentStats,
    pub assessments: Vec<InstrumentStanding>,
    pub comparisons: Vec<BaselineComparison>,
    pub comparison_summary: Option<ComparisonSummary>,
    pub adherence: Option<AdherenceSnapshot>,
    pub roadmap: Vec<RoadmapPeriod>,
}

pub fn load(path: &Path) -> eyre::Result<PatientSnapshot> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| eyre::eyre!("failed to read snapshot at {}: {e}", path.display()))?;
    let snapshot: PatientSnapshot = serde_json::from_str(&contents)?;
    tracing::info!(
        path = %path.display(),
        assessments = snapshot.assessments.len(),
        has_plan = snapshot.plan.is_some(),
        "snapshot loaded"
    );
    Ok(snapshot)
}

pub fn build_summary(
    snapshot: &PatientSnapshot,
    table: &InstrumentTable,
    config: &DashboardConfig,
    as_of: Timestamp,
) -> DashboardSummary {
    let records = &snapshot.assessments;

    let since = config.comparison_window_days.and_then(|days| {
        as_of
            .checked_sub(SignedDuration::from_hours(24 * i64::from(days)))
            .ok()
    });
    let comparisons = table.compare_all(records, since);
    let comparison_summary = trend::summarize(&comparisons);

    let options = AdherenceOptions {
        weekly_buckets: config.weekly_buckets,
    };
    let adherence = snapshot
        .plan
        .as_ref()
        .map(|plan| compute_adherence_with(&plan.tasks, &plan.goals, as_of, &options));
    let roadmap = snapshot
        .plan
        .as_ref()
        .map(|plan| roadmap::roadmap(&plan.goals, as_of, config.roadmap_timeframe))
        .unwrap_or_default();

    DashboardSummary {
        as_of,
        stats: trend::assessment_stats(records, as_of),
        assessments: standings(table, records),
        comparisons,
        comparison_summary,
        adherence,
        roadmap,
    }
}

fn standings(table: &InstrumentTable, records: &[AssessmentRecord]) -> Vec<InstrumentStanding> {
    let ids: BTreeSet<&str> = records.iter().map(|r| r.instrument_id.as_str()).collect();

    ids.into_iter()
        .filter_map(|id| {
            let latest = records
                .iter()
                .filter(|r| r.instrument_id == id)
                .max_by_key(|r| r.administered_at)?;
            let name = table.get(id).map_or(id, |i| i.name()).to_string();
            Some(InstrumentStanding {
                instrument_id: id.to_string(),
                name,
                latest_score: latest.score,
                administered_at: latest.administered_at,
                interpretation: table.interpret(id, latest.score),
                trend: table.analyze_trend(id, records),
            })
        })
        .collect()
}
