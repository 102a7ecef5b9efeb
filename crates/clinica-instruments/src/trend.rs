//! Longitudinal comparison of repeated administrations of one instrument.

use std::collections::BTreeSet;

use clinica_core::models::assessment::AssessmentRecord;
use jiff::{SignedDuration, Timestamp};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::scoring::Polarity;

const SECONDS_PER_DAY: i64 = 86_400;

/// Administrations younger than this count as recent.
pub const RECENT_WINDOW_DAYS: i64 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Direction {
    Up,
    Down,
    Stable,
}

impl Direction {
    fn of(change: i32) -> Self {
        match change {
            c if c > 0 => Direction::Up,
            c if c < 0 => Direction::Down,
            _ => Direction::Stable,
        }
    }
}

/// Change between two administrations. Carries no display strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TrendResult {
    pub direction: Direction,
    /// Absolute score difference.
    pub change: u32,
    /// `|change / from| * 100`, rounded to the nearest whole percent.
    pub percent_change: u32,
    pub is_improvement: bool,
}

impl TrendResult {
    /// Compare two scores. Without a polarity the change is never reported
    /// as an improvement.
    pub fn between(from: i32, to: i32, polarity: Option<Polarity>) -> Self {
        let signed = to.saturating_sub(from);
        let change = signed.unsigned_abs();
        Self {
            direction: Direction::of(signed),
            change,
            percent_change: percent_change(from, change),
            is_improvement: polarity.is_some_and(|p| p.is_improvement(signed)),
        }
    }
}

// A zero baseline has no defined ratio: report 0% for no change, 100% otherwise.
fn percent_change(from: i32, change: u32) -> u32 {
    if from == 0 {
        return if change == 0 { 0 } else { 100 };
    }
    let ratio = f64::from(change) / f64::from(from);
    (ratio.abs() * 100.0).round() as u32
}

/// Records for `instrument_id`, oldest first. Administrations sharing a
/// timestamp keep their input order.
fn chronological<'a>(instrument_id: &str, series: &'a [AssessmentRecord]) -> Vec<&'a AssessmentRecord> {
    let mut records: Vec<_> = series
        .iter()
        .filter(|r| r.instrument_id == instrument_id)
        .collect();
    records.sort_by_key(|r| r.administered_at);
    records
}

/// Trend between the two most recent administrations of an instrument.
///
/// `series` may be in any order. Returns `None` when fewer than two
/// administrations exist.
pub fn analyze_trend(
    instrument_id: &str,
    polarity: Option<Polarity>,
    series: &[AssessmentRecord],
) -> Option<TrendResult> {
    let records = chronological(instrument_id, series);
    let [.., previous, latest] = records.as_slice() else {
        return None;
    };
    Some(TrendResult::between(previous.score, latest.score, polarity))
}

/// First-versus-latest comparison of an instrument over a whole treatment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct BaselineComparison {
    pub instrument_id: String,
    pub polarity: Option<Polarity>,
    pub baseline: AssessmentRecord,
    pub latest: AssessmentRecord,
    pub trend: TrendResult,
    /// Number of administrations considered.
    pub sessions: usize,
    /// Whole days between baseline and latest administration.
    pub timespan_days: u32,
}

impl BaselineComparison {
    /// A non-stable change in the wrong direction for a known polarity.
    pub fn is_deterioration(&self) -> bool {
        self.polarity.is_some()
            && self.trend.direction != Direction::Stable
            && !self.trend.is_improvement
    }
}

pub fn compare_to_baseline(
    instrument_id: &str,
    polarity: Option<Polarity>,
    series: &[AssessmentRecord],
) -> Option<BaselineComparison> {
    let records = chronological(instrument_id, series);
    let [baseline, .., latest] = records.as_slice() else {
        return None;
    };

    let elapsed = latest.administered_at.duration_since(baseline.administered_at);
    let timespan_days = u32::try_from(elapsed.as_secs() / SECONDS_PER_DAY).unwrap_or(u32::MAX);

    Some(BaselineComparison {
        instrument_id: instrument_id.to_string(),
        polarity,
        baseline: (*baseline).clone(),
        latest: (*latest).clone(),
        trend: TrendResult::between(baseline.score, latest.score, polarity),
        sessions: records.len(),
        timespan_days,
    })
}

/// Baseline comparisons for every instrument present in a mixed history.
///
/// `polarity_of` resolves each instrument id. Comparisons whose latest
/// administration precedes `since` are dropped. Sorted by percent change,
/// largest first, then by instrument id.
pub fn compare_all<F>(
    records: &[AssessmentRecord],
    since: Option<jiff::Timestamp>,
    polarity_of: F,
) -> Vec<BaselineComparison>
where
    F: Fn(&str) -> Option<Polarity>,
{
    let ids: BTreeSet<&str> = records.iter().map(|r| r.instrument_id.as_str()).collect();

    let mut comparisons: Vec<_> = ids
        .into_iter()
        .filter_map(|id| compare_to_baseline(id, polarity_of(id), records))
        .filter(|c| since.is_none_or(|cutoff| c.latest.administered_at >= cutoff))
        .collect();

    comparisons.sort_by(|a, b| {
        b.trend
            .percent_change
            .cmp(&a.trend.percent_change)
            .then_with(|| a.instrument_id.cmp(&b.instrument_id))
    });
    comparisons
}

/// Aggregate view over a set of baseline comparisons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ComparisonSummary {
    pub total: usize,
    pub improvements: usize,
    pub deteriorations: usize,
    pub unchanged: usize,
    /// Non-stable changes on instruments without a known polarity.
    pub unclassified: usize,
    /// Share of comparisons that improved, rounded percent.
    pub improvement_rate: u32,
    pub average_percent_change: u32,
    pub average_timespan_days: u32,
}

/// Summarize comparisons. Returns `None` for an empty set.
pub fn summarize(comparisons: &[BaselineComparison]) -> Option<ComparisonSummary> {
    if comparisons.is_empty() {
        return None;
    }

    let total = comparisons.len();
    let improvements = comparisons.iter().filter(|c| c.trend.is_improvement).count();
    let deteriorations = comparisons.iter().filter(|c| c.is_deterioration()).count();
    let unchanged = comparisons
        .iter()
        .filter(|c| c.trend.direction == Direction::Stable)
        .count();
    let unclassified = total - improvements - deteriorations - unchanged;

    let mean = |sum: f64| (sum / total as f64).round() as u32;
    let percent_sum: f64 = comparisons.iter().map(|c| f64::from(c.trend.percent_change)).sum();
    let days_sum: f64 = comparisons.iter().map(|c| f64::from(c.timespan_days)).sum();

    Some(ComparisonSummary {
        total,
        improvements,
        deteriorations,
        unchanged,
        unclassified,
        improvement_rate: mean(improvements as f64 * 100.0),
        average_percent_change: mean(percent_sum),
        average_timespan_days: mean(days_sum),
    })
}

/// Volume of a subject's assessment history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AssessmentStats {
    pub total: usize,
    /// Administered within the last [`RECENT_WINDOW_DAYS`] before `as_of`.
    pub recent: usize,
    /// Distinct instruments administered.
    pub instruments: usize,
}

pub fn assessment_stats(records: &[AssessmentRecord], as_of: Timestamp) -> AssessmentStats {
    let window = SignedDuration::from_hours(24 * RECENT_WINDOW_DAYS);
    let cutoff = as_of.checked_sub(window).unwrap_or(Timestamp::MIN);

    AssessmentStats {
        total: records.len(),
        recent: records
            .iter()
            .filter(|r| cutoff < r.administered_at && r.administered_at <= as_of)
            .count(),
        instruments: records
            .iter()
            .map(|r| r.instrument_id.as_str())
            .collect::<BTreeSet<_>>()
            .len(),
    }
}
