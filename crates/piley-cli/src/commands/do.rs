use anyhow::{anyhow, Result};
use chrono::Utc;
use chrono_tz::Tz;
use piley_core::error::CoreError;
use piley_core::models::CompletionResult;
use piley_core::repository::Repository;
use piley_core::timezone::format_with_timezone;

use crate::cli::DoCommand;

pub async fn do_task(repo: &impl Repository, command: DoCommand, tz: &Tz) -> Result<()> {
    let result = repo.complete_task(command.id, Utc::now(), tz).await;

    match result {
        Ok(CompletionResult::Single(task)) => {
            println!("Completed task: '{}'", task.title);
        }
        Ok(CompletionResult::Recurring { task, next_reminder }) => {
            println!("Completed task: '{}'", task.title);
            println!(
                "Next reminder: {}",
                format_with_timezone(next_reminder, tz, "%Y-%m-%d %H:%M %Z")
            );
        }
        Err(CoreError::CompletionOrder { expected }) => {
            let title = repo
                .find_task_by_id(expected)
                .await?
                .map(|t| t.title)
                .unwrap_or_else(|| expected.to_string());
            return Err(anyhow!(
                "This pile completes tasks in order: finish '{}' (ID {}) first",
                title,
                expected
            ));
        }
        Err(e) => return Err(e.into()),
    }

    Ok(())
}
