use clinica_core::models::treatment::{Milestone, TreatmentGoal};
use clinica_progress::roadmap::{Timeframe, roadmap};
use jiff::{SignedDuration, Timestamp};

fn as_of() -> Timestamp {
    "2025-04-30T12:00:00Z".parse().unwrap()
}

fn in_days(days: i64) -> Timestamp {
    as_of() + SignedDuration::from_hours(24 * days)
}

fn milestone(title: &str, completed: bool, days: i64) -> Milestone {
    Milestone {
        title: title.to_string(),
        completed,
        target_date: Some(in_days(days)),
    }
}

#[test]
fn period_layout_follows_timeframe() {
    let cases = [
        (Timeframe::Week, 12, 7),
        (Timeframe::Month, 6, 30),
        (Timeframe::Quarter, 4, 90),
    ];
    for (timeframe, count, days) in cases {
        let periods = roadmap(&[], as_of(), timeframe);
        assert_eq!(periods.len(), count);
        assert_eq!(periods[0].index, 1);
        assert_eq!(periods[0].start, as_of());
        assert_eq!(periods[0].end, in_days(days));
        assert_eq!(periods[count - 1].end, in_days(days * count as i64));
    }
}

#[test]
fn goals_and_milestones_land_in_their_period() {
    let mut goal = TreatmentGoal::new("Reducir crisis de pánico", 35.0).with_milestones(vec![
        milestone("Psicoeducación", true, 3),
        milestone("Exposición interoceptiva", false, 45),
        milestone("Sin fecha", false, 0),
    ]);
    goal.milestones[2].target_date = None;
    goal.target_date = Some(in_days(75));

    let periods = roadmap(std::slice::from_ref(&goal), as_of(), Timeframe::Month);

    assert_eq!(periods[0].milestones.len(), 1);
    assert_eq!(periods[0].milestones[0].title, "Psicoeducación");
    assert!(periods[0].milestones[0].completed);
    assert_eq!(periods[0].milestones[0].goal_id, goal.id);

    assert_eq!(periods[1].milestones[0].title, "Exposición interoceptiva");
    assert_eq!(periods[2].goal_ids, vec![goal.id.clone()]);

    let listed: usize = periods.iter().map(|p| p.milestones.len()).sum();
    assert_eq!(listed, 2);
}

#[test]
fn boundaries_belong_to_the_later_period() {
    let goal = TreatmentGoal::new("Meta", 0.0).with_milestones(vec![milestone("Borde", false, 7)]);
    let periods = roadmap(&[goal], as_of(), Timeframe::Week);
    assert!(periods[0].milestones.is_empty());
    assert_eq!(periods[1].milestones.len(), 1);
}

#[test]
fn past_and_distant_targets_are_not_listed() {
    let goal = TreatmentGoal::new("Meta", 0.0).with_milestones(vec![
        milestone("Pasado", true, -2),
        milestone("Lejano", false, 400),
    ]);
    let periods = roadmap(&[goal], as_of(), Timeframe::Quarter);
    assert!(periods.iter().all(|p| p.milestones.is_empty() && p.goal_ids.is_empty()));
}
