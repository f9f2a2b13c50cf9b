use anyhow::Result;
use chrono::Utc;
use chrono_tz::Tz;
use owo_colors::{OwoColorize, Style};
use piley_core::models::{NewTaskData, RecurrenceRange};
use piley_core::repository::Repository;
use piley_core::timezone::format_with_timezone;

use crate::cli::AddCommand;
use crate::parser::parse_reminder;
use crate::util::resolve_pile;

pub async fn add_task(repo: &impl Repository, command: AddCommand, tz: &Tz) -> Result<()> {
    let pile = match &command.pile {
        Some(reference) => resolve_pile(repo, reference).await?,
        None => repo.find_default_pile().await?,
    };
    let reminder = command
        .remind
        .as_deref()
        .map(|r| parse_reminder(r, Utc::now(), tz))
        .transpose()?;

    let new_task_data = NewTaskData {
        title: command.title,
        description: command.description.unwrap_or_default(),
        pile_id: Some(pile.id),
        reminder,
        is_recurring: command.every.is_some(),
        recurrence_range: command.every.unwrap_or(RecurrenceRange::Daily),
        recurrence_frequency: command.frequency,
    };
    let added_task = repo.add_task(new_task_data).await?;

    let success_style = Style::new().green().bold();
    let info_style = Style::new().blue();

    let kind = if added_task.is_recurring { "recurring task" } else { "task" };
    println!(
        "{} Created {}: {}",
        "✓".style(success_style),
        kind,
        added_task.title.bright_white().bold()
    );
    println!("  {} Task ID: {}", "→".style(info_style), added_task.id);
    println!("  {} Pile: {}", "→".style(info_style), pile.name);

    if let Some(reminder) = added_task.reminder {
        println!(
            "  {} Reminder: {}",
            "→".style(info_style),
            format_with_timezone(reminder, tz, "%Y-%m-%d %H:%M %Z").cyan()
        );
    }
    if added_task.is_recurring {
        let every = match added_task.recurrence_frequency {
            1 => added_task.recurrence_range.to_string(),
            n => format!("every {} ({})", n, added_task.recurrence_range),
        };
        println!("  {} Repeats: {}", "→".style(info_style), every);
    }

    Ok(())
}
