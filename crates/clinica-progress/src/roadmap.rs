//! Forward-looking timeline of goal and milestone target dates.

use clinica_core::models::treatment::TreatmentGoal;
use jiff::{SignedDuration, Timestamp};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Timeframe {
    Week,
    #[default]
    Month,
    Quarter,
}

impl Timeframe {
    pub fn period_days(self) -> i64 {
        match self {
            Timeframe::Week => 7,
            Timeframe::Month => 30,
            Timeframe::Quarter => 90,
        }
    }

    pub fn period_count(self) -> u32 {
        match self {
            Timeframe::Week => 12,
            Timeframe::Month => 6,
            Timeframe::Quarter => 4,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RoadmapMilestone {
    pub goal_id: String,
    pub title: String,
    pub completed: bool,
    pub target_date: Timestamp,
}

/// One period `[start, end)` of the roadmap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RoadmapPeriod {
    /// 1-based; period 1 starts at the reference instant.
    pub index: u32,
    pub start: Timestamp,
    pub end: Timestamp,
    pub goal_ids: Vec<String>,
    pub milestones: Vec<RoadmapMilestone>,
}

/// Split the time ahead of `as_of` into consecutive periods and place every
/// goal and milestone target date in the period containing it. Targets in
/// the past or beyond the last period are not listed.
pub fn roadmap(goals: &[TreatmentGoal], as_of: Timestamp, timeframe: Timeframe) -> Vec<RoadmapPeriod> {
    let period = SignedDuration::from_hours(24 * timeframe.period_days());

    let mut periods = Vec::new();
    let mut start = as_of;
    for index in 1..=timeframe.period_count() {
        let end = start.checked_add(period).unwrap_or(Timestamp::MAX);
        let within = |date: Timestamp| start <= date && date < end;

        let goal_ids = goals
            .iter()
            .filter(|g| g.target_date.is_some_and(within))
            .map(|g| g.id.clone())
            .collect();

        let milestones = goals
            .iter()
            .flat_map(|g| g.milestones.iter().map(move |m| (&g.id, m)))
            .filter_map(|(goal_id, m)| {
                let target_date = m.target_date.filter(|d| within(*d))?;
                Some(RoadmapMilestone {
                    goal_id: goal_id.clone(),
                    title: m.title.clone(),
                    completed: m.completed,
                    target_date,
                })
            })
            .collect();

        periods.push(RoadmapPeriod {
            index,
            start,
            end,
            goal_ids,
            milestones,
        });
        if end == Timestamp::MAX {
            break;
        }
        start = end;
    }
    periods
}
