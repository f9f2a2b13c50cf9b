//! Reminder scheduling for recurring tasks.
//!
//! Cycles are counted on the local wall clock of the user's time zone, so a
//! reminder at 09:00 stays at 09:00 across DST transitions.

use chrono::{DateTime, Datelike, Duration, Months, TimeZone, Utc};

use crate::error::CoreError;
use crate::models::{RecurrenceRange, Task};
use crate::timezone::resolve_local;

/// Upper bound on single steps taken by [`next_reminder_after`] once whole
/// cycles have been skipped.
const MAX_CATCHUP_CYCLES: usize = 10_000;

/// The reminder one cycle after `reminder`.
pub fn next_reminder<T: TimeZone>(
    reminder: DateTime<Utc>,
    range: RecurrenceRange,
    frequency: u32,
    tz: &T,
) -> Result<DateTime<Utc>, CoreError> {
    if frequency == 0 {
        return Err(CoreError::InvalidInput(
            "Recurrence frequency must be at least 1".to_string(),
        ));
    }

    let local = reminder.with_timezone(tz).naive_local();
    let advanced = match range {
        RecurrenceRange::Daily => local.checked_add_signed(Duration::days(frequency as i64)),
        RecurrenceRange::Weekly => local.checked_add_signed(Duration::weeks(frequency as i64)),
        // Clamps to the last day of shorter months.
        RecurrenceRange::Monthly => local.checked_add_months(Months::new(frequency)),
    }
    .ok_or_else(|| CoreError::InvalidInput(format!("Reminder overflow after {}", reminder)))?;

    resolve_local(tz, advanced).ok_or_else(|| {
        CoreError::InvalidInput(format!("No valid local time for reminder {}", advanced))
    })
}

/// Moves `reminder` forward by whole cycles in one step, stopping at least
/// one cycle before `now`. Reminders that are not behind come back unchanged.
fn skip_missed_cycles<T: TimeZone>(
    reminder: DateTime<Utc>,
    range: RecurrenceRange,
    frequency: u32,
    now: DateTime<Utc>,
    tz: &T,
) -> Result<DateTime<Utc>, CoreError> {
    let local = reminder.with_timezone(tz).naive_local();
    let now_local = now.with_timezone(tz).naive_local();
    let frequency = i64::from(frequency.max(1));

    let skipped = match range {
        RecurrenceRange::Daily | RecurrenceRange::Weekly => {
            let period_days = match range {
                RecurrenceRange::Weekly => 7 * frequency,
                _ => frequency,
            };
            let cycles = now_local.signed_duration_since(local).num_days() / period_days - 1;
            if cycles < 1 {
                return Ok(reminder);
            }
            cycles
                .checked_mul(period_days)
                .and_then(|days| local.checked_add_signed(Duration::days(days)))
        }
        RecurrenceRange::Monthly => {
            let months = i64::from(now_local.year() - local.year()) * 12
                + i64::from(now_local.month())
                - i64::from(local.month());
            let cycles = months / frequency - 1;
            if cycles < 1 {
                return Ok(reminder);
            }
            u32::try_from(cycles * frequency)
                .ok()
                .and_then(|m| local.checked_add_months(Months::new(m)))
        }
    }
    .ok_or_else(|| CoreError::InvalidInput(format!("Reminder overflow after {}", reminder)))?;

    resolve_local(tz, skipped).ok_or_else(|| {
        CoreError::InvalidInput(format!("No valid local time for reminder {}", skipped))
    })
}

/// The first reminder of the cycle sequence that is strictly after `now`.
pub fn next_reminder_after<T: TimeZone>(
    reminder: DateTime<Utc>,
    range: RecurrenceRange,
    frequency: u32,
    now: DateTime<Utc>,
    tz: &T,
) -> Result<DateTime<Utc>, CoreError> {
    let start = skip_missed_cycles(reminder, range, frequency, now, tz)?;
    let mut next = next_reminder(start, range, frequency, tz)?;
    for _ in 0..MAX_CATCHUP_CYCLES {
        if next > now {
            return Ok(next);
        }
        next = next_reminder(next, range, frequency, tz)?;
    }
    Err(CoreError::InvalidInput(format!(
        "Reminder {} is too far behind {}",
        reminder, now
    )))
}

/// Next reminder of a recurring task, `None` for one-off tasks or tasks
/// without a reminder.
pub fn next_task_reminder<T: TimeZone>(
    task: &Task,
    now: DateTime<Utc>,
    tz: &T,
) -> Result<Option<DateTime<Utc>>, CoreError> {
    match task.reminder {
        Some(reminder) if task.is_recurring => next_reminder_after(
            reminder,
            task.recurrence_range,
            task.recurrence_frequency,
            now,
            tz,
        )
        .map(Some),
        _ => Ok(None),
    }
}
