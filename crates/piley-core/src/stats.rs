//! Completion statistics.
//!
//! The weekly histogram counts every recorded completion of recently
//! finished tasks, bucketed by the calendar date of the caller's time zone.
//! Index 0 is six days ago and index 6 is today.

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use std::collections::HashMap;

use crate::models::{PileWithTasks, Task, TaskStatus};

/// Length of the trailing window, today included.
pub const WEEK_DAYS: usize = 7;

/// Completion counts for the seven days ending on `end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeeklyHistogram {
    /// Local date of the last bucket (today).
    pub end: NaiveDate,
    /// Oldest first.
    pub counts: [u32; WEEK_DAYS],
}

impl WeeklyHistogram {
    /// Local date of the first bucket.
    pub fn start(&self) -> NaiveDate {
        self.end - Duration::days(WEEK_DAYS as i64 - 1)
    }

    /// `(date, count)` pairs, oldest first.
    pub fn days(&self) -> impl Iterator<Item = (NaiveDate, u32)> + '_ {
        let start = self.start();
        self.counts
            .iter()
            .enumerate()
            .map(move |(i, &count)| (start + Duration::days(i as i64), count))
    }

    pub fn total(&self) -> u32 {
        self.counts.iter().sum()
    }
}

/// Builds the weekly histogram for a flat list of tasks.
pub fn completion_histogram<Tz: TimeZone>(
    tasks: &[Task],
    now: DateTime<Utc>,
    tz: &Tz,
) -> WeeklyHistogram {
    let window_start = now - Duration::days(WEEK_DAYS as i64);

    let mut tally: HashMap<NaiveDate, u32> = HashMap::new();
    for task in tasks
        .iter()
        .filter(|t| t.status == TaskStatus::Done && t.modified_at > window_start)
    {
        for completed_at in &task.completion_times {
            *tally.entry(completed_at.with_timezone(tz).date_naive()).or_insert(0) += 1;
        }
    }

    let today = now.with_timezone(tz).date_naive();
    let mut counts: Vec<u32> = (0..WEEK_DAYS as i64)
        .map(|offset| {
            let day = today - Duration::days(offset);
            tally.get(&day).copied().unwrap_or(0)
        })
        .collect();
    counts.reverse();

    let mut fixed = [0u32; WEEK_DAYS];
    fixed.copy_from_slice(&counts);
    WeeklyHistogram { end: today, counts: fixed }
}

/// Completions per day over the last week, oldest first, today last.
pub fn build_weekly_completion_histogram<Tz: TimeZone>(
    tasks: &[Task],
    now: DateTime<Utc>,
    tz: &Tz,
) -> [u32; WEEK_DAYS] {
    completion_histogram(tasks, now, tz).counts
}

/// Status counts and the weekly histogram of one pile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PileSummary {
    pub pile_name: String,
    pub active: usize,
    pub done: usize,
    /// Deleted tasks still on record.
    pub deleted: usize,
    /// Running counter kept on the pile itself.
    pub deleted_total: u32,
    pub weekly: WeeklyHistogram,
}

pub fn pile_summary<Tz: TimeZone>(
    pile: &PileWithTasks,
    now: DateTime<Utc>,
    tz: &Tz,
) -> PileSummary {
    let count = |status: TaskStatus| pile.tasks.iter().filter(|t| t.status == status).count();
    PileSummary {
        pile_name: pile.pile.name.clone(),
        active: count(TaskStatus::Default),
        done: count(TaskStatus::Done),
        deleted: count(TaskStatus::Deleted),
        deleted_total: pile.pile.deleted_count,
        weekly: completion_histogram(&pile.tasks, now, tz),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Pile;
    use chrono_tz::Tz;
    use rstest::rstest;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 18, 15, 0, 0).unwrap()
    }

    fn done_task(modified_at: DateTime<Utc>, completion_times: Vec<DateTime<Utc>>) -> Task {
        Task {
            id: 1,
            title: "Water plants".to_string(),
            status: TaskStatus::Done,
            modified_at,
            completion_times,
            ..Default::default()
        }
    }

    #[test]
    fn test_empty_input_is_all_zeros() {
        assert_eq!(build_weekly_completion_histogram(&[], now(), &Utc), [0; 7]);
    }

    #[test]
    fn test_today_and_yesterday_land_in_last_buckets() {
        let now = now();
        let task = done_task(now, vec![now, now - Duration::days(1)]);
        assert_eq!(
            build_weekly_completion_histogram(&[task], now, &Utc),
            [0, 0, 0, 0, 0, 1, 1]
        );
    }

    #[test]
    fn test_stale_task_is_ignored_even_with_recent_completion() {
        let now = now();
        let task = done_task(now - Duration::days(10), vec![now - Duration::days(2)]);
        assert_eq!(build_weekly_completion_histogram(&[task], now, &Utc), [0; 7]);
    }

    #[rstest]
    #[case(TaskStatus::Default)]
    #[case(TaskStatus::Deleted)]
    fn test_only_done_tasks_count(#[case] status: TaskStatus) {
        let now = now();
        let mut task = done_task(now, vec![now]);
        task.status = status;
        assert_eq!(build_weekly_completion_histogram(&[task], now, &Utc), [0; 7]);
    }

    #[test]
    fn test_same_day_completions_are_tallied() {
        let now = now();
        let task = done_task(
            now,
            vec![now - Duration::hours(3), now - Duration::hours(2), now - Duration::days(6)],
        );
        assert_eq!(
            build_weekly_completion_histogram(&[task], now, &Utc),
            [1, 0, 0, 0, 0, 0, 2]
        );
    }

    #[test]
    fn test_completions_older_than_window_fall_out() {
        let now = now();
        let task = done_task(now, vec![now - Duration::days(7), now - Duration::days(30), now]);
        assert_eq!(
            build_weekly_completion_histogram(&[task], now, &Utc),
            [0, 0, 0, 0, 0, 0, 1]
        );
    }

    #[test]
    fn test_empty_history_contributes_nothing() {
        let now = now();
        let tasks = vec![done_task(now, vec![]), done_task(now, vec![now])];
        assert_eq!(
            build_weekly_completion_histogram(&tasks, now, &Utc),
            [0, 0, 0, 0, 0, 0, 1]
        );
    }

    #[test]
    fn test_buckets_follow_local_date() {
        // 15:00 UTC on the 18th is already the 19th in Auckland (UTC+13).
        let now = now();
        let tz: Tz = "Pacific/Auckland".parse().unwrap();
        // 10:30 UTC on the 18th is 23:30 on the 18th in Auckland: yesterday there.
        let completed = Utc.with_ymd_and_hms(2026, 3, 18, 10, 30, 0).unwrap();
        let task = done_task(now, vec![completed]);

        assert_eq!(
            build_weekly_completion_histogram(&[task.clone()], now, &tz),
            [0, 0, 0, 0, 0, 1, 0]
        );
        assert_eq!(
            build_weekly_completion_histogram(&[task], now, &Utc),
            [0, 0, 0, 0, 0, 0, 1]
        );
    }

    #[test]
    fn test_weekly_histogram_days_are_labelled_oldest_first() {
        let now = now();
        let task = done_task(now, vec![now]);
        let histogram = completion_histogram(&[task], now, &Utc);
        let days: Vec<_> = histogram.days().collect();

        assert_eq!(days.len(), 7);
        assert_eq!(days[0].0, NaiveDate::from_ymd_opt(2026, 3, 12).unwrap());
        assert_eq!(days[6], (NaiveDate::from_ymd_opt(2026, 3, 18).unwrap(), 1));
        assert_eq!(histogram.total(), 1);
    }

    #[test]
    fn test_pile_summary_counts_statuses() {
        let now = now();
        let pile = PileWithTasks::new(
            Pile { id: 2, name: "Home".to_string(), deleted_count: 4, ..Default::default() },
            vec![
                done_task(now, vec![now]),
                Task { id: 2, ..Default::default() },
                Task { id: 3, status: TaskStatus::Deleted, ..Default::default() },
            ],
        );

        let summary = pile_summary(&pile, now, &Utc);
        assert_eq!(summary.pile_name, "Home");
        assert_eq!((summary.active, summary.done, summary.deleted), (1, 1, 1));
        assert_eq!(summary.deleted_total, 4);
        assert_eq!(summary.weekly.counts, build_weekly_completion_histogram(&pile.tasks, now, &Utc));
    }
}
