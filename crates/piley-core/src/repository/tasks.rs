use crate::error::CoreError;
use crate::models::{CompletionResult, NewTaskData, Task, TaskStatus, UpdateTaskData};
use crate::policy;
use crate::recurrence;
use crate::repository::{
    fetch_default_pile, fetch_pile, fetch_pile_tasks, fetch_task, SqliteRepository, TaskRow,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use sqlx::SqliteConnection;

impl SqliteRepository {
    async fn require_task(conn: &mut SqliteConnection, id: i64) -> Result<Task, CoreError> {
        fetch_task(conn, id)
            .await?
            .ok_or_else(|| CoreError::NotFound(format!("Task {} not found", id)))
    }
}

#[async_trait]
impl super::TaskRepository for SqliteRepository {
    async fn add_task(&self, data: NewTaskData) -> Result<Task, CoreError> {
        data.validate()?;
        let mut tx = self.pool().begin().await?;

        let pile = match data.pile_id {
            Some(pile_id) => fetch_pile(&mut tx, pile_id)
                .await?
                .ok_or_else(|| CoreError::NotFound(format!("Pile {} not found", pile_id)))?,
            None => fetch_default_pile(&mut tx).await?,
        };
        let existing = fetch_pile_tasks(&mut tx, pile.id).await?;
        policy::ensure_capacity(&pile, &existing)?;

        let now = Utc::now();
        let row: TaskRow = sqlx::query_as(
            r#"INSERT INTO tasks (title, description, status, pile_id, created_at, modified_at,
                reminder, is_recurring, recurrence_range, recurrence_frequency)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING *
            "#,
        )
        .bind(data.title.trim())
        .bind(&data.description)
        .bind(TaskStatus::Default)
        .bind(pile.id)
        .bind(now)
        .bind(now)
        .bind(data.reminder)
        .bind(data.is_recurring)
        .bind(data.recurrence_range)
        .bind(i64::from(data.recurrence_frequency))
        .fetch_one(&mut *tx)
        .await?;
        tx.commit().await?;

        let task = row.into_task(Vec::new());
        tracing::debug!(task_id = task.id, pile_id = pile.id, "task created");
        Ok(task)
    }

    async fn find_task_by_id(&self, id: i64) -> Result<Option<Task>, CoreError> {
        let mut conn = self.pool().acquire().await?;
        fetch_task(&mut conn, id).await
    }

    async fn update_task(&self, id: i64, data: UpdateTaskData) -> Result<Task, CoreError> {
        let mut tx = self.pool().begin().await?;
        let mut task = Self::require_task(&mut tx, id).await?;

        if let Some(pile_id) = data.pile_id.filter(|&p| p != task.pile_id) {
            let pile = fetch_pile(&mut tx, pile_id)
                .await?
                .ok_or_else(|| CoreError::NotFound(format!("Pile {} not found", pile_id)))?;
            if task.is_active() {
                let existing = fetch_pile_tasks(&mut tx, pile.id).await?;
                policy::ensure_capacity(&pile, &existing)?;
            }
            task.pile_id = pile.id;
        }
        if let Some(title) = data.title {
            if title.trim().is_empty() {
                return Err(CoreError::InvalidInput("Task title cannot be empty".to_string()));
            }
            task.title = title.trim().to_string();
        }
        if let Some(description) = data.description {
            task.description = description;
        }
        if let Some(reminder) = data.reminder {
            task.reminder = reminder;
        }
        if let Some(is_recurring) = data.is_recurring {
            task.is_recurring = is_recurring;
        }
        if let Some(range) = data.recurrence_range {
            task.recurrence_range = range;
        }
        if let Some(frequency) = data.recurrence_frequency {
            if frequency == 0 {
                return Err(CoreError::InvalidInput(
                    "Recurrence frequency must be at least 1".to_string(),
                ));
            }
            task.recurrence_frequency = frequency;
        }
        if task.is_recurring && task.reminder.is_none() {
            return Err(CoreError::InvalidInput("Recurring tasks need a reminder".to_string()));
        }

        sqlx::query(
            r#"UPDATE tasks SET title = ?, description = ?, pile_id = ?, reminder = ?,
                is_recurring = ?, recurrence_range = ?, recurrence_frequency = ?, modified_at = ?
            WHERE id = ?"#,
        )
        .bind(&task.title)
        .bind(&task.description)
        .bind(task.pile_id)
        .bind(task.reminder)
        .bind(task.is_recurring)
        .bind(task.recurrence_range)
        .bind(i64::from(task.recurrence_frequency))
        .bind(Utc::now())
        .bind(id)
        .execute(&mut *tx)
        .await?;

        let updated = Self::require_task(&mut tx, id).await?;
        tx.commit().await?;
        Ok(updated)
    }

    async fn complete_task(
        &self,
        id: i64,
        now: DateTime<Utc>,
        tz: &Tz,
    ) -> Result<CompletionResult, CoreError> {
        let mut tx = self.pool().begin().await?;
        let task = Self::require_task(&mut tx, id).await?;

        match task.status {
            TaskStatus::Deleted => {
                return Err(CoreError::InvalidInput(format!("Task {} is deleted", id)))
            }
            TaskStatus::Done => {
                return Err(CoreError::InvalidInput(format!("Task {} is already done", id)))
            }
            TaskStatus::Default => {}
        }

        let pile = fetch_pile(&mut tx, task.pile_id)
            .await?
            .ok_or_else(|| CoreError::NotFound(format!("Pile {} not found", task.pile_id)))?;
        let siblings = fetch_pile_tasks(&mut tx, pile.id).await?;
        policy::ensure_completable(&pile, &siblings, id)?;

        let next_reminder = recurrence::next_task_reminder(&task, now, tz)?;

        sqlx::query("INSERT INTO task_completions (task_id, completed_at) VALUES (?, ?)")
            .bind(id)
            .bind(now)
            .execute(&mut *tx)
            .await?;
        sqlx::query("UPDATE tasks SET status = ?, reminder = COALESCE(?, reminder), modified_at = ? WHERE id = ?")
            .bind(TaskStatus::Done)
            .bind(next_reminder)
            .bind(now)
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let completed = Self::require_task(&mut tx, id).await?;
        tx.commit().await?;
        tracing::debug!(task_id = id, recurring = completed.is_recurring, "task completed");

        Ok(match next_reminder {
            Some(next_reminder) => CompletionResult::Recurring { task: completed, next_reminder },
            None => CompletionResult::Single(completed),
        })
    }

    async fn delete_task(&self, id: i64) -> Result<Task, CoreError> {
        let mut tx = self.pool().begin().await?;
        let task = Self::require_task(&mut tx, id).await?;
        if task.status == TaskStatus::Deleted {
            return Err(CoreError::InvalidInput(format!("Task {} is already deleted", id)));
        }

        sqlx::query("UPDATE tasks SET status = ?, modified_at = ? WHERE id = ?")
            .bind(TaskStatus::Deleted)
            .bind(Utc::now())
            .bind(id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("UPDATE piles SET deleted_count = deleted_count + 1 WHERE id = ?")
            .bind(task.pile_id)
            .execute(&mut *tx)
            .await?;

        let deleted = Self::require_task(&mut tx, id).await?;
        tx.commit().await?;
        tracing::debug!(task_id = id, pile_id = deleted.pile_id, "task deleted");
        Ok(deleted)
    }

    async fn reactivate_recurring(&self, now: DateTime<Utc>) -> Result<u64, CoreError> {
        let due: Vec<(i64, Option<DateTime<Utc>>)> = sqlx::query_as(
            "SELECT id, reminder FROM tasks WHERE is_recurring = 1 AND status = ?",
        )
        .bind(TaskStatus::Done)
        .fetch_all(self.pool())
        .await?;

        let mut tx = self.pool().begin().await?;
        let mut reactivated = 0;
        for (id, _) in due
            .into_iter()
            .filter(|(_, reminder)| reminder.map_or(false, |r| r <= now))
        {
            sqlx::query("UPDATE tasks SET status = ?, modified_at = ? WHERE id = ?")
                .bind(TaskStatus::Default)
                .bind(now)
                .bind(id)
                .execute(&mut *tx)
                .await?;
            reactivated += 1;
        }
        tx.commit().await?;

        if reactivated > 0 {
            tracing::info!(count = reactivated, "recurring tasks reactivated");
        }
        Ok(reactivated)
    }
}
