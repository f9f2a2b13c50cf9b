use anyhow::Result;
use dialoguer::Confirm;
use piley_core::error::CoreError;
use piley_core::repository::Repository;

use crate::cli::DeleteCommand;

pub async fn delete_task(repo: &impl Repository, command: DeleteCommand) -> Result<()> {
    let task = repo
        .find_task_by_id(command.id)
        .await?
        .ok_or_else(|| CoreError::NotFound(format!("Task {} not found", command.id)))?;

    if !command.force {
        let confirmation = Confirm::new()
            .with_prompt(format!("Are you sure you want to delete task '{}'?", task.title))
            .default(false)
            .interact()
            .unwrap_or(false);

        if !confirmation {
            println!("Deletion cancelled.");
            return Ok(());
        }
    }

    let deleted = repo.delete_task(task.id).await?;
    println!("Deleted task: '{}'", deleted.title);
    Ok(())
}
