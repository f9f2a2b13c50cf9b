use anyhow::Result;
use chrono::Utc;
use chrono_tz::Tz;
use owo_colors::OwoColorize;
use piley_core::models::Task;
use piley_core::ordering::resolve_pile_order;
use piley_core::repository::Repository;
use piley_core::stats::{completion_histogram, pile_summary};

use crate::cli::StatsCommand;
use crate::util::resolve_pile;
use crate::views::chart::{display_histogram, display_summary};

pub async fn show_stats(repo: &impl Repository, command: StatsCommand, tz: &Tz) -> Result<()> {
    let only_pile = match &command.pile {
        Some(reference) => Some(resolve_pile(repo, reference).await?.id),
        None => None,
    };

    let now = Utc::now();
    let piles = repo.find_piles_with_tasks().await?;
    let order = repo.pile_order().await?;

    let selected: Vec<_> = resolve_pile_order(&piles, &order)
        .into_iter()
        .filter(|p| only_pile.map_or(true, |id| p.pile.id == id))
        .collect();

    if only_pile.is_none() {
        let all_tasks: Vec<Task> = piles.iter().flat_map(|p| p.tasks.iter().cloned()).collect();
        println!("{}", "All piles".bold());
        display_histogram(&completion_histogram(&all_tasks, now, tz));
        println!();
    }

    for pile in selected {
        display_summary(&pile_summary(pile, now, tz));
        println!();
    }

    Ok(())
}
