use crate::error::CoreError;
use crate::models::{NewPileData, Pile, PileWithTasks};
use crate::repository::preferences::{load_pile_order, store_pile_order};
use crate::repository::{
    attach_completions, fetch_default_pile, fetch_pile, CompletionRow, PileRow, SqliteRepository,
    TaskRow,
};
use async_trait::async_trait;
use std::collections::HashMap;

#[async_trait]
impl super::PileRepository for SqliteRepository {
    async fn add_pile(&self, data: NewPileData) -> Result<Pile, CoreError> {
        data.validate()?;

        let row: PileRow = sqlx::query_as(
            r#"INSERT INTO piles (name, description, mode, max_tasks, color)
            VALUES (?, ?, ?, ?, ?)
            RETURNING *
            "#,
        )
        .bind(data.name.trim())
        .bind(&data.description)
        .bind(data.mode)
        .bind(i64::from(data.max_tasks))
        .bind(&data.color)
        .fetch_one(self.pool())
        .await?;

        let pile = Pile::from(row);
        tracing::debug!(pile_id = pile.id, name = %pile.name, "pile created");
        Ok(pile)
    }

    async fn find_pile_by_id(&self, id: i64) -> Result<Option<Pile>, CoreError> {
        let mut conn = self.pool().acquire().await?;
        fetch_pile(&mut conn, id).await
    }

    async fn find_pile_by_name(&self, name: &str) -> Result<Option<Pile>, CoreError> {
        let row: Option<PileRow> =
            sqlx::query_as("SELECT * FROM piles WHERE name = ? ORDER BY id LIMIT 1")
                .bind(name)
                .fetch_optional(self.pool())
                .await?;
        Ok(row.map(Pile::from))
    }

    async fn find_default_pile(&self) -> Result<Pile, CoreError> {
        let mut conn = self.pool().acquire().await?;
        fetch_default_pile(&mut conn).await
    }

    async fn find_piles(&self) -> Result<Vec<Pile>, CoreError> {
        let rows: Vec<PileRow> = sqlx::query_as("SELECT * FROM piles ORDER BY id")
            .fetch_all(self.pool())
            .await?;
        Ok(rows.into_iter().map(Pile::from).collect())
    }

    async fn find_piles_with_tasks(&self) -> Result<Vec<PileWithTasks>, CoreError> {
        let mut conn = self.pool().acquire().await?;

        let piles: Vec<PileRow> = sqlx::query_as("SELECT * FROM piles ORDER BY id")
            .fetch_all(&mut *conn)
            .await?;
        let rows: Vec<TaskRow> = sqlx::query_as("SELECT * FROM tasks ORDER BY created_at, id")
            .fetch_all(&mut *conn)
            .await?;
        let completions: Vec<CompletionRow> =
            sqlx::query_as("SELECT task_id, completed_at FROM task_completions")
                .fetch_all(&mut *conn)
                .await?;

        let mut by_pile: HashMap<i64, Vec<_>> = HashMap::new();
        for task in attach_completions(rows, completions) {
            by_pile.entry(task.pile_id).or_default().push(task);
        }

        Ok(piles
            .into_iter()
            .map(|row| {
                let pile = Pile::from(row);
                let tasks = by_pile.remove(&pile.id).unwrap_or_default();
                PileWithTasks::new(pile, tasks)
            })
            .collect())
    }

    async fn delete_pile(&self, id: i64) -> Result<(), CoreError> {
        let mut tx = self.pool().begin().await?;

        let pile = fetch_pile(&mut tx, id)
            .await?
            .ok_or_else(|| CoreError::NotFound(format!("Pile {} not found", id)))?;
        if pile.is_default {
            return Err(CoreError::DefaultPileProtected(pile.name));
        }

        sqlx::query(
            "DELETE FROM task_completions WHERE task_id IN (SELECT id FROM tasks WHERE pile_id = ?)",
        )
        .bind(id)
        .execute(&mut *tx)
        .await?;
        let removed = sqlx::query("DELETE FROM tasks WHERE pile_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM piles WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let order = load_pile_order(&mut tx).await?;
        if order.contains(&id) {
            let remaining: Vec<i64> = order.into_iter().filter(|&p| p != id).collect();
            store_pile_order(&mut tx, &remaining).await?;
        }
        tx.commit().await?;

        tracing::info!(pile_id = id, tasks_removed = removed.rows_affected(), "pile deleted");
        Ok(())
    }
}
