//! Priority scheduler that places fixed and flexible tasks into days.
//!
//! Fixed tasks claim their exact slots. Flexible tasks are placed in
//! priority order into the earliest gap their window admits; when no
//! gap fits, already-placed work of strictly lower priority can be
//! pushed aside and re-slotted.

use std::collections::BTreeMap;

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::Serialize;

use crate::core::time;
use crate::store::{Priority, Task};

pub mod goals;

/// One placed task in the final schedule.
#[derive(Debug, Clone, Serialize)]
pub struct ScheduledTask {
    pub id: String,
    pub title: String,
    pub duration: i64,
    pub priority: Priority,
    pub fixed: bool,
    pub date: NaiveDate,
    #[serde(with = "time::hhmm")]
    pub start_time: NaiveTime,
    #[serde(with = "time::hhmm")]
    pub end_time: NaiveTime,
}

/// First fixed task missing a start time, if any. The API rejects the
/// whole schedule request when one exists.
pub fn find_startless_fixed(tasks: &[Task]) -> Option<&Task> {
    tasks.iter().find(|task| task.fixed && task.start_time.is_none())
}

pub struct Scheduler {
    base_time: NaiveDateTime,
}

impl Scheduler {
    pub fn new(base_time: NaiveDateTime) -> Self {
        Self { base_time }
    }

    /// Anchor to today at the given day start.
    pub fn for_today(day_start: NaiveTime) -> Self {
        Self::new(chrono::Local::now().date_naive().and_time(day_start))
    }

    /// Group tasks by date, plan each day independently, and return the
    /// combined schedule sorted by `(date, start_time)`.
    pub fn schedule(&self, tasks: &[Task]) -> Vec<ScheduledTask> {
        let mut by_date: BTreeMap<NaiveDate, Vec<&Task>> = BTreeMap::new();
        for task in tasks {
            let date = task.date.unwrap_or_else(|| self.base_time.date());
            by_date.entry(date).or_default().push(task);
        }

        let mut full = Vec::new();
        for (day, day_tasks) in by_date {
            let base = day.and_time(self.base_time.time());
            let mut planner = DayPlanner::new(base);
            planner.plan(&day_tasks);
            full.extend(planner.into_scheduled());
        }
        full.sort_by_key(|placed| (placed.date, placed.start_time));
        full
    }
}

fn day_end() -> NaiveTime {
    NaiveTime::from_hms_opt(23, 59, 0).expect("valid time")
}

struct Block {
    start: NaiveDateTime,
    end: NaiveDateTime,
    task: Task,
}

struct DayPlanner {
    base: NaiveDateTime,
    blocked: Vec<Block>,
}

impl DayPlanner {
    fn new(base: NaiveDateTime) -> Self {
        Self {
            base,
            blocked: Vec::new(),
        }
    }

    fn plan(&mut self, tasks: &[&Task]) {
        // Fixed tasks claim their slots first.
        for task in tasks.iter().filter(|task| task.fixed) {
            let Some(start_time) = task.start_time else {
                tracing::debug!("Skipping fixed task '{}' without a start time", task.title);
                continue;
            };
            let start = self.base.date().and_time(start_time);
            self.add_block((*task).clone(), start);
        }

        // Flexible tasks by priority, then by how early their window opens.
        let mut flex: Vec<&Task> = tasks.iter().filter(|task| !task.fixed).copied().collect();
        flex.sort_by_key(|task| (task.priority.rank(), task.earliest_time.unwrap_or(NaiveTime::MIN)));

        for task in flex {
            self.slot(task, true);
        }
    }

    fn add_block(&mut self, task: Task, start: NaiveDateTime) {
        let end = start + Duration::minutes(task.duration);
        self.blocked.push(Block { start, end, task });
    }

    /// Earliest candidate start in `[earliest, latest]` that avoids
    /// every block. `latest` arrives already pulled back by the task
    /// duration and the fit check subtracts the duration again, so a
    /// placement always leaves a full task-length margin before the
    /// window closes.
    fn find_gap(
        &self,
        duration: i64,
        earliest: NaiveDateTime,
        latest: NaiveDateTime,
    ) -> Option<NaiveDateTime> {
        let length = Duration::minutes(duration);
        let mut candidate = earliest;
        let mut blocks: Vec<(NaiveDateTime, NaiveDateTime)> =
            self.blocked.iter().map(|block| (block.start, block.end)).collect();
        blocks.sort_by_key(|block| block.0);

        for (start, end) in blocks {
            if candidate + length <= start && candidate + length <= latest {
                return Some(candidate);
            }
            candidate = candidate.max(end);
            if candidate > latest {
                break;
            }
        }
        if candidate + length <= latest {
            return Some(candidate);
        }
        None
    }

    /// Place one flexible task. Returns whether it found a home.
    fn slot(&mut self, task: &Task, allow_slide: bool) -> bool {
        let earliest_time = task.earliest_time.unwrap_or_else(|| self.base.time());
        let earliest = self.base.date().and_time(earliest_time);
        let latest_time = task.latest_time.unwrap_or_else(day_end);
        let latest = self.base.date().and_time(latest_time) - Duration::minutes(task.duration);

        if let Some(start) = self.find_gap(task.duration, earliest, latest) {
            self.add_block(task.clone(), start);
            return true;
        }
        if allow_slide {
            return self.slide_and_reschedule(task, earliest, latest);
        }
        false
    }

    /// Push aside strictly lower-priority flexible blocks, lowest
    /// priority first, until the task fits. Displaced blocks are
    /// re-slotted afterwards without further sliding; when nothing
    /// helps they all go back and the task is dropped.
    fn slide_and_reschedule(
        &mut self,
        task: &Task,
        earliest: NaiveDateTime,
        latest: NaiveDateTime,
    ) -> bool {
        let mut removed: Vec<Task> = Vec::new();

        loop {
            let mut victim: Option<(usize, u8)> = None;
            for (index, block) in self.blocked.iter().enumerate() {
                if block.task.fixed || block.task.priority.rank() <= task.priority.rank() {
                    continue;
                }
                let rank = block.task.priority.rank();
                if victim.is_none_or(|(_, best)| rank > best) {
                    victim = Some((index, rank));
                }
            }
            let Some((index, _)) = victim else { break };
            removed.push(self.blocked.remove(index).task);

            if let Some(start) = self.find_gap(task.duration, earliest, latest) {
                self.add_block(task.clone(), start);
                for displaced in removed {
                    self.slot(&displaced, false);
                }
                return true;
            }
        }

        for displaced in removed {
            self.slot(&displaced, false);
        }
        false
    }

    fn into_scheduled(self) -> Vec<ScheduledTask> {
        let mut scheduled: Vec<ScheduledTask> = self
            .blocked
            .into_iter()
            .map(|block| ScheduledTask {
                id: block.task.id,
                title: block.task.title,
                duration: block.task.duration,
                priority: block.task.priority,
                fixed: block.task.fixed,
                date: block.start.date(),
                start_time: block.start.time(),
                end_time: block.end.time(),
            })
            .collect();
        scheduled.sort_by_key(|placed| placed.start_time);
        scheduled
    }
}
