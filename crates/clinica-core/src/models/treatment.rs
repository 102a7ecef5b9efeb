use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::error::CoreError;
use crate::lenient;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Priority {
    #[serde(alias = "alta")]
    High,
    #[default]
    #[serde(alias = "media")]
    Medium,
    #[serde(alias = "baja")]
    Low,
}

/// A task assigned within a treatment plan.
///
/// "Overdue" is a derived read against a reference instant, never a stored
/// state: tasks do not expire on their own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TreatmentTask {
    #[serde(deserialize_with = "lenient::id")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient::timestamp")]
    pub due_date: Option<Timestamp>,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub completed: bool,
    /// Set only while `completed` is true.
    #[serde(default, deserialize_with = "lenient::timestamp")]
    pub completed_at: Option<Timestamp>,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub priority: Priority,
}

impl TreatmentTask {
    pub fn new(title: impl Into<String>, due_date: Option<Timestamp>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: title.into(),
            due_date,
            completed: false,
            completed_at: None,
            priority: Priority::default(),
        }
    }

    /// Toggle completion, keeping `completed_at` in step with the flag.
    pub fn set_completed(&mut self, completed: bool, at: Timestamp) {
        self.completed = completed;
        self.completed_at = completed.then_some(at);
    }

    pub fn is_overdue(&self, as_of: Timestamp) -> bool {
        !self.completed && self.due_date.is_some_and(|due| due < as_of)
    }
}

/// A named checkpoint inside a goal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Milestone {
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub completed: bool,
    #[serde(default, deserialize_with = "lenient::timestamp")]
    pub target_date: Option<Timestamp>,
}

impl Milestone {
    pub fn new(title: impl Into<String>, completed: bool) -> Self {
        Self {
            title: title.into(),
            completed,
            target_date: None,
        }
    }
}

/// A treatment goal.
///
/// `progress` is the clinician's own 0–100 judgement. It is not derived from
/// the milestones and is never reconciled with them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TreatmentGoal {
    #[serde(deserialize_with = "lenient::id")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient::progress")]
    pub progress: f64,
    #[serde(default, deserialize_with = "lenient::timestamp")]
    pub target_date: Option<Timestamp>,
    #[serde(default, deserialize_with = "lenient::skip_invalid")]
    pub milestones: Vec<Milestone>,
}

impl TreatmentGoal {
    pub fn new(title: impl Into<String>, progress: f64) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: title.into(),
            progress: lenient::clamp_progress(progress),
            target_date: None,
            milestones: Vec::new(),
        }
    }

    pub fn with_milestones(mut self, milestones: Vec<Milestone>) -> Self {
        self.milestones = milestones;
        self
    }

    pub fn milestones_completed(&self) -> usize {
        self.milestones.iter().filter(|m| m.completed).count()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TreatmentPlan {
    #[serde(deserialize_with = "lenient::id")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient::skip_invalid")]
    pub tasks: Vec<TreatmentTask>,
    #[serde(default, deserialize_with = "lenient::skip_invalid")]
    pub goals: Vec<TreatmentGoal>,
}

impl TreatmentPlan {
    /// Parse a plan. Tasks and goals that cannot be read at all (no id, not
    /// an object) are skipped; the rest of the plan still loads.
    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        Ok(serde_json::from_str(json)?)
    }
}
