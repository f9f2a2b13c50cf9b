//! Pile policies: task limits and completion ordering.

use crate::error::CoreError;
use crate::models::{Pile, PileMode, Task};

/// Fails when the pile already holds `max_tasks` active tasks.
pub fn ensure_capacity(pile: &Pile, tasks: &[Task]) -> Result<(), CoreError> {
    if pile.max_tasks == 0 {
        return Ok(());
    }
    let active = tasks.iter().filter(|t| t.is_active()).count();
    if active >= pile.max_tasks as usize {
        return Err(CoreError::PileFull { name: pile.name.clone(), limit: pile.max_tasks });
    }
    Ok(())
}

/// The only task the pile mode allows to be completed next, if the mode
/// restricts it.
pub fn next_in_line<'a>(mode: PileMode, tasks: &'a [Task]) -> Option<&'a Task> {
    let mut active = tasks.iter().filter(|t| t.is_active());
    match mode {
        PileMode::Free => None,
        PileMode::Fifo => active.min_by_key(|t| (t.created_at, t.id)),
        PileMode::Lifo => active.max_by_key(|t| (t.created_at, t.id)),
    }
}

/// Fails when the pile mode requires another task to be completed first.
pub fn ensure_completable(pile: &Pile, tasks: &[Task], task_id: i64) -> Result<(), CoreError> {
    match next_in_line(pile.mode, tasks) {
        Some(expected) if expected.id != task_id => {
            Err(CoreError::CompletionOrder { expected: expected.id })
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TaskStatus;
    use chrono::{Duration, TimeZone, Utc};
    use rstest::rstest;

    fn pile(mode: PileMode, max_tasks: u32) -> Pile {
        Pile { id: 1, name: "Errands".to_string(), mode, max_tasks, ..Default::default() }
    }

    fn tasks() -> Vec<Task> {
        let t0 = Utc.with_ymd_and_hms(2026, 1, 10, 9, 0, 0).unwrap();
        vec![
            Task { id: 1, created_at: t0, status: TaskStatus::Done, ..Default::default() },
            Task { id: 2, created_at: t0 + Duration::hours(1), ..Default::default() },
            Task { id: 3, created_at: t0 + Duration::hours(2), ..Default::default() },
            Task { id: 4, created_at: t0 + Duration::hours(3), ..Default::default() },
            Task {
                id: 5,
                created_at: t0 + Duration::hours(4),
                status: TaskStatus::Deleted,
                ..Default::default()
            },
        ]
    }

    #[rstest]
    #[case(0, true)]
    #[case(4, true)]
    #[case(3, false)]
    #[case(2, false)]
    fn test_capacity_counts_active_tasks(#[case] max_tasks: u32, #[case] ok: bool) {
        let result = ensure_capacity(&pile(PileMode::Free, max_tasks), &tasks());
        assert_eq!(result.is_ok(), ok);
    }

    #[test]
    fn test_full_pile_error_names_pile() {
        match ensure_capacity(&pile(PileMode::Free, 1), &tasks()) {
            Err(CoreError::PileFull { name, limit }) => {
                assert_eq!(name, "Errands");
                assert_eq!(limit, 1);
            }
            other => panic!("expected PileFull, got {:?}", other),
        }
    }

    #[rstest]
    #[case(PileMode::Free, 3, true)]
    #[case(PileMode::Fifo, 2, true)]
    #[case(PileMode::Fifo, 3, false)]
    #[case(PileMode::Lifo, 4, true)]
    #[case(PileMode::Lifo, 2, false)]
    fn test_completion_order(#[case] mode: PileMode, #[case] id: i64, #[case] ok: bool) {
        assert_eq!(ensure_completable(&pile(mode, 0), &tasks(), id).is_ok(), ok);
    }

    #[test]
    fn test_completion_order_reports_expected_task() {
        let result = ensure_completable(&pile(PileMode::Lifo, 0), &tasks(), 2);
        assert!(matches!(result, Err(CoreError::CompletionOrder { expected: 4 })));
    }

    #[test]
    fn test_same_creation_time_breaks_ties_by_id() {
        let at = Utc.with_ymd_and_hms(2026, 1, 10, 9, 0, 0).unwrap();
        let tasks = vec![
            Task { id: 8, created_at: at, ..Default::default() },
            Task { id: 6, created_at: at, ..Default::default() },
        ];
        assert_eq!(next_in_line(PileMode::Fifo, &tasks).map(|t| t.id), Some(6));
        assert_eq!(next_in_line(PileMode::Lifo, &tasks).map(|t| t.id), Some(8));
    }

    #[test]
    fn test_no_active_tasks_allows_anything() {
        assert!(next_in_line(PileMode::Fifo, &[]).is_none());
    }
}
