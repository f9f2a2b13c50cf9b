use anyhow::{anyhow, Result};
use dialoguer::Confirm;
use piley_core::error::CoreError;
use piley_core::models::{NewPileData, PileWithTasks, TaskStatus};
use piley_core::ordering::{move_pile, resolve_pile_order};
use piley_core::repository::Repository;

use crate::cli::{AddPileCommand, DeletePileCommand, MovePileCommand, PileCommand, PileSubcommand};
use crate::util::resolve_pile;
use crate::views::table::{display_piles, ViewPile};

pub async fn pile_command(repo: &impl Repository, command: PileCommand) -> Result<()> {
    match command.command {
        PileSubcommand::Add(command) => add_pile(repo, command).await,
        PileSubcommand::List => list_piles(repo).await,
        PileSubcommand::Move(command) => move_pile_position(repo, command).await,
        PileSubcommand::Delete(command) => delete_pile(repo, command).await,
    }
}

async fn add_pile(repo: &impl Repository, command: AddPileCommand) -> Result<()> {
    let pile = repo
        .add_pile(NewPileData {
            name: command.name,
            description: command.description,
            mode: command.mode,
            max_tasks: command.limit,
            color: command.color,
        })
        .await?;
    println!("Created pile: '{}' (ID {}, {})", pile.name, pile.id, pile.mode);
    Ok(())
}

fn view_piles(ordered: &[&PileWithTasks]) -> Vec<ViewPile> {
    ordered
        .iter()
        .enumerate()
        .map(|(i, p)| ViewPile {
            position: i + 1,
            id: p.pile.id,
            name: p.pile.name.clone(),
            mode: p.pile.mode,
            active: p.active_tasks().count(),
            done: p.tasks.iter().filter(|t| t.status == TaskStatus::Done).count(),
            max_tasks: p.pile.max_tasks,
            is_default: p.pile.is_default,
        })
        .collect()
}

async fn list_piles(repo: &impl Repository) -> Result<()> {
    let piles = repo.find_piles_with_tasks().await?;
    let order = repo.pile_order().await?;
    display_piles(&view_piles(&resolve_pile_order(&piles, &order)));
    Ok(())
}

async fn move_pile_position(repo: &impl Repository, command: MovePileCommand) -> Result<()> {
    let (from, to) = match (command.from.checked_sub(1), command.to.checked_sub(1)) {
        (Some(from), Some(to)) => (from, to),
        _ => {
            return Err(anyhow!(CoreError::InvalidInput(
                "Positions start at 1".to_string()
            )))
        }
    };

    let piles = repo.find_piles_with_tasks().await?;
    let order = repo.pile_order().await?;
    let displayed: Vec<i64> = resolve_pile_order(&piles, &order)
        .iter()
        .map(|p| p.pile.id)
        .collect();

    let new_order = move_pile(&displayed, from, to)?;
    repo.set_pile_order(&new_order).await?;
    tracing::debug!(?new_order, "piles reordered");

    display_piles(&view_piles(&resolve_pile_order(&piles, &new_order)));
    Ok(())
}

async fn delete_pile(repo: &impl Repository, command: DeletePileCommand) -> Result<()> {
    let pile = resolve_pile(repo, &command.pile).await?;

    if !command.force {
        let confirmation = Confirm::new()
            .with_prompt(format!(
                "Are you sure you want to delete pile '{}' and all its tasks?",
                pile.name
            ))
            .default(false)
            .interact()
            .unwrap_or(false);

        if !confirmation {
            println!("Deletion cancelled.");
            return Ok(());
        }
    }

    repo.delete_pile(pile.id).await?;
    println!("Deleted pile: '{}'", pile.name);
    Ok(())
}
