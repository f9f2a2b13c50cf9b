use anyhow::Result;
use chrono_tz::Tz;
use piley_core::repository::Repository;
use piley_core::upcoming::select_upcoming_tasks;

use crate::views::table::{display_upcoming, ViewUpcoming};

pub async fn upcoming_tasks(repo: &impl Repository, tz: &Tz) -> Result<()> {
    let piles = repo.find_piles_with_tasks().await?;

    let view: Vec<ViewUpcoming> = select_upcoming_tasks(&piles)
        .into_iter()
        .filter_map(|u| {
            u.task.reminder.map(|reminder| ViewUpcoming {
                id: u.task.id,
                title: u.task.title.clone(),
                pile_name: u.pile_name.to_string(),
                reminder,
                recurring: u.task.is_recurring,
            })
        })
        .collect();

    display_upcoming(&view, tz);
    Ok(())
}
