use clinica_core::models::treatment::{Milestone, TreatmentGoal, TreatmentPlan, TreatmentTask};
use clinica_progress::adherence::{
    AdherenceLevel, TreatmentPlanExt, goal_rollups, overall_progress, weekly_buckets,
};
use clinica_progress::{AdherenceOptions, compute_adherence, compute_adherence_with};
use jiff::{SignedDuration, Timestamp};

fn as_of() -> Timestamp {
    "2025-04-30T12:00:00Z".parse().unwrap()
}

fn days_ago(days: i64) -> Timestamp {
    as_of() - SignedDuration::from_hours(24 * days)
}

fn task(due_days_ago: Option<i64>, completed: bool) -> TreatmentTask {
    let mut task = TreatmentTask::new("Tarea", due_days_ago.map(days_ago));
    if completed {
        task.set_completed(true, as_of());
    }
    task
}

#[test]
fn empty_plan_is_zero_not_an_error() {
    let snapshot = compute_adherence(&[], &[], as_of());
    assert_eq!(snapshot.overall_rate, 0.0);
    assert_eq!(snapshot.total_tasks, 0);
    assert_eq!(snapshot.completed_tasks, 0);
    assert_eq!(snapshot.overdue_tasks, 0);
    assert_eq!(snapshot.level, AdherenceLevel::Low);
    assert_eq!(snapshot.weekly.len(), 4);
    assert!(snapshot.weekly.iter().all(|b| b.total == 0 && b.completed == 0));
    assert!(snapshot.goals.is_empty());
    assert_eq!(snapshot.overall_progress, 0);
}

#[test]
fn overall_rate_counts_every_task() {
    let tasks = vec![
        task(Some(1), true),
        task(None, true),
        task(Some(3), false),
        task(None, false),
    ];
    let snapshot = compute_adherence(&tasks, &[], as_of());
    assert_eq!(snapshot.total_tasks, 4);
    assert_eq!(snapshot.completed_tasks, 2);
    assert_eq!(snapshot.overall_rate, 50.0);
}

#[test]
fn overdue_requires_a_due_date() {
    let undated = vec![task(None, false), task(None, false)];
    for instant in [as_of(), "2099-12-31T00:00:00Z".parse().unwrap()] {
        assert_eq!(compute_adherence(&undated, &[], instant).overdue_tasks, 0);
    }
}

#[test]
fn overdue_counts_only_open_past_due_tasks() {
    let tasks = vec![
        task(Some(2), false),  // overdue
        task(Some(2), true),   // done
        task(Some(0), false),  // due exactly now
        task(Some(-3), false), // due in the future
        task(None, false),
    ];
    assert_eq!(compute_adherence(&tasks, &[], as_of()).overdue_tasks, 1);
}

#[test]
fn weekly_buckets_cover_trailing_windows() {
    let tasks = vec![
        task(Some(0), true),   // week 4 (current)
        task(Some(6), false),  // week 4
        task(Some(7), true),   // week 3: exactly 7 days back opens the previous window
        task(Some(20), true),  // week 2
        task(Some(27), false), // week 1
        task(Some(28), true),  // beyond 4 weeks
        task(Some(-1), true),  // future
        task(None, true),      // undated
    ];

    let buckets = weekly_buckets(&tasks, as_of(), 4);
    let summary: Vec<(u32, usize, usize)> =
        buckets.iter().map(|b| (b.week, b.completed, b.total)).collect();
    assert_eq!(summary, vec![(1, 0, 1), (2, 1, 1), (3, 1, 1), (4, 1, 2)]);

    assert_eq!(buckets[3].end, as_of());
    assert_eq!(buckets[3].start, days_ago(7));
    assert_eq!(buckets[0].start, days_ago(28));
}

#[test]
fn bucket_count_is_configurable() {
    let tasks = vec![task(Some(40), true)];
    let snapshot = compute_adherence_with(&tasks, &[], as_of(), &AdherenceOptions { weekly_buckets: 8 });
    assert_eq!(snapshot.weekly.len(), 8);
    assert_eq!(snapshot.weekly[2].total, 1);

    let none = compute_adherence_with(&tasks, &[], as_of(), &AdherenceOptions { weekly_buckets: 0 });
    assert!(none.weekly.is_empty());
}

#[test]
fn goal_progress_is_not_recomputed_from_milestones() {
    let goal = TreatmentGoal::new("Retomar actividades sociales", 40.0).with_milestones(vec![
        Milestone::new("Llamar a un amigo", true),
        Milestone::new("Asistir a una reunión", true),
        Milestone::new("Organizar una cena", true),
    ]);
    let rollups = goal_rollups(std::slice::from_ref(&goal));
    assert_eq!(rollups[0].goal_id, goal.id);
    assert_eq!(rollups[0].progress, 40.0);
    assert_eq!(rollups[0].milestones_completed, 3);
    assert_eq!(rollups[0].milestones_total, 3);

    let untouched = TreatmentGoal::new("Higiene del sueño", 90.0)
        .with_milestones(vec![Milestone::new("Horario fijo", false)]);
    let rollups = goal_rollups(std::slice::from_ref(&untouched));
    assert_eq!(rollups[0].progress, 90.0);
    assert_eq!(rollups[0].milestones_completed, 0);
}

#[test]
fn out_of_range_progress_is_clamped_in_rollups() {
    let mut goal = TreatmentGoal::new("Meta", 50.0);
    goal.progress = 180.0;
    assert_eq!(goal_rollups(&[goal.clone()])[0].progress, 100.0);
    assert_eq!(overall_progress(&[goal]), 100);
}

#[test]
fn overall_progress_is_rounded_mean() {
    let goals = vec![
        TreatmentGoal::new("A", 40.0),
        TreatmentGoal::new("B", 75.0),
        TreatmentGoal::new("C", 10.0),
    ];
    // 125 / 3 = 41.67
    assert_eq!(overall_progress(&goals), 42);
    assert_eq!(overall_progress(&[]), 0);
}

#[test]
fn adherence_levels() {
    assert_eq!(AdherenceLevel::from_rate(100.0), AdherenceLevel::High);
    assert_eq!(AdherenceLevel::from_rate(85.0), AdherenceLevel::High);
    assert_eq!(AdherenceLevel::from_rate(84.9), AdherenceLevel::Moderate);
    assert_eq!(AdherenceLevel::from_rate(70.0), AdherenceLevel::Moderate);
    assert_eq!(AdherenceLevel::from_rate(69.9), AdherenceLevel::Low);
    assert_eq!(AdherenceLevel::from_rate(0.0), AdherenceLevel::Low);
}

#[test]
fn snapshot_is_idempotent_and_leaves_input_alone() {
    let tasks = vec![task(Some(3), true), task(Some(10), false), task(None, false)];
    let goals = vec![
        TreatmentGoal::new("Meta", 30.0).with_milestones(vec![Milestone::new("Hito", true)]),
    ];
    let (tasks_before, goals_before) = (tasks.clone(), goals.clone());

    let first = compute_adherence(&tasks, &goals, as_of());
    let second = compute_adherence(&tasks, &goals, as_of());
    assert_eq!(first, second);
    assert_eq!(tasks, tasks_before);
    assert_eq!(goals, goals_before);
}

#[test]
fn malformed_due_date_degrades_to_undated() {
    let json = r#"{
        "id": "plan-1",
        "tasks": [
            {"id": "a", "due_date": "2025-04-20T00:00:00Z", "completed": false},
            {"id": "b", "due_date": ["not", "a", "date"], "completed": false},
            {"id": "c", "due_date": true, "completed": true}
        ]
    }"#;

    let plan = TreatmentPlan::from_json(json).unwrap();
    let snapshot = plan.adherence(as_of());
    assert_eq!(snapshot.total_tasks, 3);
    assert_eq!(snapshot.completed_tasks, 1);
    assert_eq!(snapshot.overdue_tasks, 1);
    assert_eq!(snapshot.weekly.iter().map(|b| b.total).sum::<usize>(), 1);
}

#[test]
fn badly_shaped_task_does_not_hide_its_neighbours() {
    let json = r#"{
        "id": "Qm3xPlanDoc",
        "tasks": [
            {"id": "Xy7FirestoreDoc1", "completed": "yes", "priority": "urgente"},
            {"id": "Xy7FirestoreDoc2", "completed": true, "due_date": "2025-04-28"},
            {"id": "Xy7FirestoreDoc3", "completed": false, "due_date": "2025-04-27"}
        ],
        "goals": [
            {"id": "goal-1", "progress": "half", "milestones": [{"title": "m", "completed": 1}]}
        ]
    }"#;

    let plan = TreatmentPlan::from_json(json).unwrap();
    let snapshot = plan.adherence(as_of());
    assert_eq!(snapshot.total_tasks, 3);
    assert_eq!(snapshot.completed_tasks, 1);
    assert_eq!(snapshot.overdue_tasks, 1);
    assert_eq!(snapshot.goals[0].goal_id, "goal-1");
    assert_eq!(snapshot.goals[0].milestones_completed, 0);
    assert_eq!(snapshot.goals[0].milestones_total, 1);
}

#[test]
fn snapshot_serializes_for_the_ui() {
    let snapshot = compute_adherence(&[task(Some(1), true)], &[], as_of());
    let json = serde_json::to_value(&snapshot).unwrap();
    assert_eq!(json["overall_rate"], 100.0);
    assert_eq!(json["level"], "high");
    assert_eq!(json["weekly"].as_array().unwrap().len(), 4);
}
