use chrono::{DateTime, Utc};
use chrono_humanize::Humanize;
use chrono_tz::Tz;
use comfy_table::{Attribute, Cell, Color, Row, Table};
use piley_core::models::{PileMode, RecurrenceRange, TaskStatus};
use piley_core::timezone::format_with_timezone;

const REMINDER_FORMAT: &str = "%a %d %b %H:%M";

#[derive(Debug, Clone)]
pub struct ViewTask {
    pub id: i64,
    pub title: String,
    pub status: TaskStatus,
    pub pile_name: String,
    pub reminder: Option<DateTime<Utc>>,
    pub recurrence: Option<(RecurrenceRange, u32)>,
}

#[derive(Debug, Clone)]
pub struct ViewPile {
    pub position: usize,
    pub id: i64,
    pub name: String,
    pub mode: PileMode,
    pub active: usize,
    pub done: usize,
    pub max_tasks: u32,
    pub is_default: bool,
}

#[derive(Debug, Clone)]
pub struct ViewUpcoming {
    pub id: i64,
    pub title: String,
    pub pile_name: String,
    pub reminder: DateTime<Utc>,
    pub recurring: bool,
}

fn recurrence_label(recurrence: Option<(RecurrenceRange, u32)>) -> String {
    match recurrence {
        None => "-".to_string(),
        Some((range, 1)) => range.to_string(),
        Some((range, n)) => format!("{} x{}", range, n),
    }
}

fn reminder_cell(reminder: DateTime<Utc>, tz: &Tz) -> Cell {
    let text = format!(
        "{} ({})",
        format_with_timezone(reminder, tz, REMINDER_FORMAT),
        reminder.humanize()
    );
    if reminder < Utc::now() {
        Cell::new(text).fg(Color::Red) // Overdue
    } else {
        Cell::new(text)
    }
}

pub fn display_tasks(tasks: &[ViewTask], tz: &Tz) {
    if tasks.is_empty() {
        println!("No tasks found.");
        return;
    }

    let mut table = Table::new();
    table.set_header(vec!["ID", "Title", "Pile", "Status", "Reminder", "Repeats"]);

    for task in tasks {
        let mut row = Row::new();
        row.add_cell(Cell::new(task.id));

        let mut display_title = String::new();
        if task.recurrence.is_some() {
            display_title.push('↻'); // Recurring symbol
            display_title.push(' ');
        }
        display_title.push_str(&task.title);

        let title_cell = match task.status {
            TaskStatus::Done | TaskStatus::Deleted => Cell::new(display_title)
                .add_attribute(Attribute::CrossedOut)
                .fg(Color::DarkGrey),
            TaskStatus::Default => Cell::new(display_title),
        };
        row.add_cell(title_cell);
        row.add_cell(Cell::new(&task.pile_name));

        let status_cell = Cell::new(task.status.to_string());
        row.add_cell(match task.status {
            TaskStatus::Done => status_cell.fg(Color::Green),
            TaskStatus::Deleted => status_cell.fg(Color::DarkGrey),
            TaskStatus::Default => status_cell,
        });

        row.add_cell(match task.reminder {
            Some(reminder) if task.status == TaskStatus::Default => reminder_cell(reminder, tz),
            Some(reminder) => Cell::new(format_with_timezone(reminder, tz, REMINDER_FORMAT)),
            None => Cell::new("None"),
        });
        row.add_cell(Cell::new(recurrence_label(task.recurrence)));
        table.add_row(row);
    }

    println!("{table}");
}

pub fn display_piles(piles: &[ViewPile]) {
    if piles.is_empty() {
        println!("No piles found.");
        return;
    }

    let mut table = Table::new();
    table.set_header(vec!["#", "ID", "Name", "Mode", "Active", "Done", "Limit"]);

    for pile in piles {
        let mut row = Row::new();
        row.add_cell(Cell::new(pile.position));
        row.add_cell(Cell::new(pile.id));

        let mut name_cell = Cell::new(if pile.is_default {
            format!("{} (default)", pile.name)
        } else {
            pile.name.clone()
        });
        if pile.is_default {
            name_cell = name_cell.add_attribute(Attribute::Bold);
        }
        row.add_cell(name_cell);
        row.add_cell(Cell::new(pile.mode.to_string().to_uppercase()));

        let full = pile.max_tasks > 0 && pile.active >= pile.max_tasks as usize;
        let active_cell = Cell::new(pile.active);
        row.add_cell(if full { active_cell.fg(Color::Yellow) } else { active_cell });
        row.add_cell(Cell::new(pile.done));
        row.add_cell(Cell::new(if pile.max_tasks == 0 {
            "-".to_string()
        } else {
            pile.max_tasks.to_string()
        }));
        table.add_row(row);
    }

    println!("{table}");
}

pub fn display_upcoming(upcoming: &[ViewUpcoming], tz: &Tz) {
    if upcoming.is_empty() {
        println!("No upcoming reminders.");
        return;
    }

    let mut table = Table::new();
    table.set_header(vec!["When", "ID", "Task", "Pile"]);

    for entry in upcoming {
        let mut row = Row::new();
        row.add_cell(reminder_cell(entry.reminder, tz));
        row.add_cell(Cell::new(entry.id));
        let title = if entry.recurring {
            format!("↻ {}", entry.title)
        } else {
            entry.title.clone()
        };
        row.add_cell(Cell::new(title));
        row.add_cell(Cell::new(&entry.pile_name));
        table.add_row(row);
    }

    println!("{table}");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recurrence_label() {
        assert_eq!(recurrence_label(None), "-");
        assert_eq!(recurrence_label(Some((RecurrenceRange::Daily, 1))), "daily");
        assert_eq!(recurrence_label(Some((RecurrenceRange::Monthly, 3))), "monthly x3");
    }
}
