//! Selection of the soonest pending reminders across piles.

use crate::models::{PileWithTasks, Task, TaskStatus};

/// Maximum number of entries returned by [`select_upcoming_tasks`].
pub const UPCOMING_LIMIT: usize = 10;

/// A task with a pending reminder and the name of its pile.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UpcomingTask<'a> {
    pub pile_name: &'a str,
    pub task: &'a Task,
}

/// Whether a task still has a reminder to fire.
///
/// Recurring tasks stay upcoming after a completion because the next cycle
/// reactivates them; only deletion removes them.
pub fn has_pending_reminder(task: &Task) -> bool {
    task.reminder.is_some()
        && (task.status == TaskStatus::Default
            || (task.is_recurring && task.status != TaskStatus::Deleted))
}

/// The soonest reminders across all piles, earliest first, at most
/// [`UPCOMING_LIMIT`] entries. Equal reminders keep their input order.
pub fn select_upcoming_tasks(piles: &[PileWithTasks]) -> Vec<UpcomingTask<'_>> {
    let mut upcoming: Vec<UpcomingTask<'_>> = piles
        .iter()
        .flat_map(|p| {
            p.tasks
                .iter()
                .filter(|t| has_pending_reminder(t))
                .map(move |task| UpcomingTask { pile_name: p.pile.name.as_str(), task })
        })
        .collect();

    upcoming.sort_by_key(|u| u.task.reminder);
    upcoming.truncate(UPCOMING_LIMIT);
    upcoming
}
