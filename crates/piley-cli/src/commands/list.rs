use anyhow::Result;
use chrono_tz::Tz;
use piley_core::models::TaskStatus;
use piley_core::ordering::resolve_pile_order;
use piley_core::repository::Repository;

use crate::cli::ListCommand;
use crate::util::resolve_pile;
use crate::views::table::{display_tasks, ViewTask};

pub async fn list_tasks(repo: &impl Repository, command: ListCommand, tz: &Tz) -> Result<()> {
    let only_pile = match &command.pile {
        Some(reference) => Some(resolve_pile(repo, reference).await?.id),
        None => None,
    };

    let show_all = command.all;
    let piles = repo.find_piles_with_tasks().await?;
    let order = repo.pile_order().await?;

    let view_tasks: Vec<ViewTask> = resolve_pile_order(&piles, &order)
        .into_iter()
        .filter(|p| only_pile.map_or(true, |id| p.pile.id == id))
        .flat_map(|p| {
            p.tasks
                .iter()
                .filter(move |t| show_all || t.status == TaskStatus::Default)
                .map(move |t| ViewTask {
                    id: t.id,
                    title: t.title.clone(),
                    status: t.status,
                    pile_name: p.pile.name.clone(),
                    reminder: t.reminder,
                    recurrence: t
                        .is_recurring
                        .then_some((t.recurrence_range, t.recurrence_frequency)),
                })
        })
        .collect();

    display_tasks(&view_tasks, tz);

    Ok(())
}
