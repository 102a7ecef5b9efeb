use clinica_core::lenient::clamp_progress;
use clinica_core::models::treatment::{TreatmentGoal, TreatmentPlan, TreatmentTask};
use jiff::{SignedDuration, Timestamp};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

pub const DEFAULT_WEEKLY_BUCKETS: usize = 4;

const WEEK_SECS: i64 = 7 * 86_400;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AdherenceOptions {
    /// Number of trailing 7-day windows to report.
    pub weekly_buckets: usize,
}

impl Default for AdherenceOptions {
    fn default() -> Self {
        Self {
            weekly_buckets: DEFAULT_WEEKLY_BUCKETS,
        }
    }
}

/// Coarse adherence band used to flag plans that need attention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum AdherenceLevel {
    /// 85% or more.
    High,
    /// 70% up to 85%.
    Moderate,
    Low,
}

impl AdherenceLevel {
    pub fn from_rate(rate: f64) -> Self {
        if rate >= 85.0 {
            AdherenceLevel::High
        } else if rate >= 70.0 {
            AdherenceLevel::Moderate
        } else {
            AdherenceLevel::Low
        }
    }
}

/// Tasks due within one trailing 7-day window `(start, end]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct WeeklyBucket {
    /// 1 is the oldest window; the highest number ends at the reference instant.
    pub week: u32,
    pub start: Timestamp,
    pub end: Timestamp,
    pub completed: usize,
    pub total: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct GoalRollup {
    pub goal_id: String,
    /// The goal's own progress value, not derived from milestones.
    pub progress: f64,
    pub milestones_completed: usize,
    pub milestones_total: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AdherenceSnapshot {
    /// Completed tasks over all tasks, 0–100. Zero when there are no tasks.
    pub overall_rate: f64,
    pub total_tasks: usize,
    pub completed_tasks: usize,
    pub overdue_tasks: usize,
    pub level: AdherenceLevel,
    pub weekly: Vec<WeeklyBucket>,
    pub goals: Vec<GoalRollup>,
    /// Rounded mean of goal progress, 0 when there are no goals.
    pub overall_progress: u8,
}

/// Adherence snapshot with the default options.
pub fn compute_adherence(
    tasks: &[TreatmentTask],
    goals: &[TreatmentGoal],
    as_of: Timestamp,
) -> AdherenceSnapshot {
    compute_adherence_with(tasks, goals, as_of, &AdherenceOptions::default())
}

pub fn compute_adherence_with(
    tasks: &[TreatmentTask],
    goals: &[TreatmentGoal],
    as_of: Timestamp,
    options: &AdherenceOptions,
) -> AdherenceSnapshot {
    let total_tasks = tasks.len();
    let completed_tasks = tasks.iter().filter(|t| t.completed).count();
    let overdue_tasks = tasks.iter().filter(|t| t.is_overdue(as_of)).count();
    let overall_rate = completion_rate(completed_tasks, total_tasks);

    AdherenceSnapshot {
        overall_rate,
        total_tasks,
        completed_tasks,
        overdue_tasks,
        level: AdherenceLevel::from_rate(overall_rate),
        weekly: weekly_buckets(tasks, as_of, options.weekly_buckets),
        goals: goal_rollups(goals),
        overall_progress: overall_progress(goals),
    }
}

/// Adherence straight from a loaded plan.
pub trait TreatmentPlanExt {
    fn adherence(&self, as_of: Timestamp) -> AdherenceSnapshot;
}

impl TreatmentPlanExt for TreatmentPlan {
    fn adherence(&self, as_of: Timestamp) -> AdherenceSnapshot {
        compute_adherence(&self.tasks, &self.goals, as_of)
    }
}

fn completion_rate(completed: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    completed as f64 / total as f64 * 100.0
}

/// Group dated tasks into trailing 7-day windows ending at `as_of`.
///
/// Window `i` (0 = most recent) holds tasks due in
/// `(as_of - 7(i+1) days, as_of - 7i days]`. Undated tasks and tasks due
/// after `as_of` are left out. Buckets are returned oldest first.
pub fn weekly_buckets(tasks: &[TreatmentTask], as_of: Timestamp, weeks: usize) -> Vec<WeeklyBucket> {
    let mut counts = vec![(0usize, 0usize); weeks];

    for task in tasks {
        let Some(due) = task.due_date else {
            continue;
        };
        let elapsed = as_of.duration_since(due);
        if elapsed.is_negative() {
            continue;
        }
        let Ok(index) = usize::try_from(elapsed.as_secs() / WEEK_SECS) else {
            continue;
        };
        if let Some((completed, total)) = counts.get_mut(index) {
            *total += 1;
            if task.completed {
                *completed += 1;
            }
        }
    }

    counts
        .iter()
        .enumerate()
        .rev()
        .zip(1u32..)
        .map(|((index, &(completed, total)), week)| WeeklyBucket {
            week,
            start: weeks_before(as_of, index as i64 + 1),
            end: weeks_before(as_of, index as i64),
            completed,
            total,
        })
        .collect()
}

fn weeks_before(as_of: Timestamp, weeks: i64) -> Timestamp {
    as_of
        .checked_sub(SignedDuration::from_secs(WEEK_SECS.saturating_mul(weeks)))
        .unwrap_or(Timestamp::MIN)
}

/// Per-goal progress next to its milestone counts. The two are reported
/// side by side and never reconciled.
pub fn goal_rollups(goals: &[TreatmentGoal]) -> Vec<GoalRollup> {
    goals
        .iter()
        .map(|goal| GoalRollup {
            goal_id: goal.id.clone(),
            progress: clamp_progress(goal.progress),
            milestones_completed: goal.milestones_completed(),
            milestones_total: goal.milestones.len(),
        })
        .collect()
}

pub fn overall_progress(goals: &[TreatmentGoal]) -> u8 {
    if goals.is_empty() {
        return 0;
    }
    let sum: f64 = goals.iter().map(|g| clamp_progress(g.progress)).sum();
    (sum / goals.len() as f64).round() as u8
}
