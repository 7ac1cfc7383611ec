//! Goal expansion: turning "N minutes of X" into flexible task blocks.
//!
//! A goal never places anything itself. It emits ordinary flexible
//! tasks sized to fit around the day's fixed commitments and leaves the
//! final placement to the scheduler.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::store::{Priority, TaskDraft, TaskStore};

/// A chunk of repeated work to spread across free time. When both
/// dates are present the total is distributed over the range;
/// otherwise everything lands on the base day.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoalSpec {
    pub title: String,
    pub total_minutes: i64,
    #[serde(default = "default_block_size")]
    pub max_block_size: i64,
    #[serde(default)]
    pub rest_between: i64,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
}

fn default_block_size() -> i64 {
    60
}

/// Expand a goal into stored tasks. Returns how many tasks were added.
pub fn expand(
    store: &mut TaskStore,
    base_time: NaiveDateTime,
    day_start: NaiveTime,
    spec: &GoalSpec,
) -> usize {
    match (spec.start_date, spec.end_date) {
        (Some(start), Some(end)) => expand_periodic(store, day_start, spec, start, end),
        _ => expand_hybrid(store, base_time, spec),
    }
}

/// Fill the base day's free gaps with blocks of at most
/// `max_block_size` minutes, walking the fixed tasks in start order and
/// optionally inserting a low-priority rest between blocks.
pub fn expand_hybrid(store: &mut TaskStore, base_time: NaiveDateTime, spec: &GoalSpec) -> usize {
    let day = base_time.date();
    let mut fixed: Vec<(NaiveDateTime, NaiveDateTime)> = store
        .all()
        .iter()
        .filter(|task| task.fixed && task.date == Some(day))
        .filter_map(|task| {
            let start = day.and_time(task.start_time?);
            Some((start, start + Duration::minutes(task.duration)))
        })
        .collect();
    fixed.sort_by_key(|block| block.0);

    let mut added = 0;
    let mut remaining = spec.total_minutes;
    let mut cursor = base_time;

    // Blocks before and between the fixed tasks.
    for (start, end) in fixed {
        let mut gap = (start - cursor).num_minutes();
        while remaining > 0 && gap > 0 {
            let block = spec.max_block_size.min(remaining).min(gap);
            emit_block(store, spec, block, cursor.date());
            added += 1;
            remaining -= block;
            gap -= block;
            if spec.rest_between > 0 && remaining > 0 {
                emit_rest(store, spec.rest_between, cursor.date());
                added += 1;
                cursor += Duration::minutes(spec.rest_between);
            }
        }
        cursor = cursor.max(end);
    }

    // Whatever is left goes after the last fixed task.
    while remaining > 0 {
        let block = spec.max_block_size.min(remaining);
        emit_block(store, spec, block, cursor.date());
        added += 1;
        remaining -= block;
        if spec.rest_between > 0 && remaining > 0 {
            emit_rest(store, spec.rest_between, cursor.date());
            added += 1;
            cursor += Duration::minutes(spec.rest_between);
        }
    }

    added
}

/// Distribute the goal evenly across `[start_date, end_date]`, the
/// first `total % days` days receiving one extra minute, and expand
/// each day's share in place.
pub fn expand_periodic(
    store: &mut TaskStore,
    day_start: NaiveTime,
    spec: &GoalSpec,
    start_date: NaiveDate,
    end_date: NaiveDate,
) -> usize {
    let mut days = Vec::new();
    let mut day = start_date;
    while day <= end_date {
        days.push(day);
        day += Duration::days(1);
    }
    if days.is_empty() {
        return 0;
    }

    let per_day = spec.total_minutes / days.len() as i64;
    let remainder = spec.total_minutes % days.len() as i64;

    let mut added = 0;
    for (index, day) in days.iter().enumerate() {
        let extra = if (index as i64) < remainder { 1 } else { 0 };
        let daily = GoalSpec {
            total_minutes: per_day + extra,
            start_date: None,
            end_date: None,
            ..spec.clone()
        };
        added += expand_hybrid(store, day.and_time(day_start), &daily);
    }
    added
}

fn emit_block(store: &mut TaskStore, spec: &GoalSpec, minutes: i64, day: NaiveDate) {
    store.add(
        TaskDraft {
            title: spec.title.clone(),
            duration: minutes,
            priority: spec.priority,
            ..TaskDraft::default()
        },
        day,
    );
}

fn emit_rest(store: &mut TaskStore, minutes: i64, day: NaiveDate) {
    store.add(
        TaskDraft {
            title: "Rest".to_string(),
            duration: minutes,
            priority: Priority::Low,
            ..TaskDraft::default()
        },
        day,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Task;

    fn base() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 7, 1)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap()
    }

    fn day_start() -> NaiveTime {
        NaiveTime::from_hms_opt(9, 0, 0).unwrap()
    }

    fn goal(title: &str, total: i64, block: i64) -> GoalSpec {
        GoalSpec {
            title: title.to_string(),
            total_minutes: total,
            max_block_size: block,
            rest_between: 0,
            priority: Priority::Medium,
            start_date: None,
            end_date: None,
        }
    }

    fn durations<'a>(tasks: impl Iterator<Item = &'a Task>) -> Vec<i64> {
        tasks.map(|task| task.duration).collect()
    }

    #[test]
    fn hybrid_splits_around_fixed_tasks() {
        let mut store = TaskStore::default();
        store.add(
            TaskDraft {
                title: "Meeting".to_string(),
                duration: 60,
                fixed: true,
                start_time: NaiveTime::from_hms_opt(11, 0, 0),
                ..TaskDraft::default()
            },
            base().date(),
        );

        let added = expand_hybrid(&mut store, base(), &goal("Deep work", 150, 60));

        assert_eq!(added, 3);
        let blocks: Vec<&Task> = store
            .all()
            .iter()
            .filter(|task| task.title == "Deep work")
            .collect();
        // Two full blocks fit into the 09:00-11:00 gap, the remainder
        // lands after the meeting.
        assert_eq!(durations(blocks.into_iter()), vec![60, 60, 30]);
    }

    #[test]
    fn hybrid_inserts_rests_between_blocks() {
        let mut store = TaskStore::default();
        let spec = GoalSpec {
            rest_between: 15,
            ..goal("Practice", 120, 60)
        };

        let added = expand_hybrid(&mut store, base(), &spec);

        assert_eq!(added, 3);
        let titles: Vec<&str> = store.all().iter().map(|task| task.title.as_str()).collect();
        assert_eq!(titles, vec!["Practice", "Rest", "Practice"]);
        let rest = &store.all()[1];
        assert_eq!(rest.duration, 15);
        assert_eq!(rest.priority, Priority::Low);
        assert!(!rest.fixed);
    }

    #[test]
    fn periodic_spreads_minutes_with_remainder_up_front() {
        let mut store = TaskStore::default();
        let start = base().date();
        let end = start + Duration::days(2);

        let added = expand_periodic(&mut store, day_start(), &goal("Reading", 100, 60), start, end);

        assert_eq!(added, 3);
        let by_day: Vec<(NaiveDate, i64)> = store
            .all()
            .iter()
            .map(|task| (task.date.unwrap(), task.duration))
            .collect();
        // 100 minutes over 3 days: 34 + 33 + 33.
        assert_eq!(
            by_day,
            vec![
                (start, 34),
                (start + Duration::days(1), 33),
                (start + Duration::days(2), 33),
            ]
        );
    }

    #[test]
    fn periodic_with_an_empty_range_adds_nothing() {
        let mut store = TaskStore::default();
        let start = base().date();
        let added = expand_periodic(
            &mut store,
            day_start(),
            &goal("Reading", 100, 60),
            start,
            start - Duration::days(1),
        );
        assert_eq!(added, 0);
        assert!(store.is_empty());
    }

    #[test]
    fn expand_picks_periodic_only_when_both_dates_are_set() {
        let mut store = TaskStore::default();
        let spec = GoalSpec {
            start_date: Some(base().date()),
            end_date: Some(base().date() + Duration::days(1)),
            ..goal("Split", 120, 60)
        };
        let added = expand(&mut store, base(), day_start(), &spec);
        assert_eq!(added, 2);

        let mut store = TaskStore::default();
        let spec = GoalSpec {
            start_date: Some(base().date()),
            ..goal("Whole", 120, 60)
        };
        let added = expand(&mut store, base(), day_start(), &spec);
        assert_eq!(added, 2);
        assert!(store.all().iter().all(|task| task.date == Some(base().date())));
    }
}
