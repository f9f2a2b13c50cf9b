use crate::db::DbPool;
use crate::error::CoreError;
use crate::models::{
    CompletionResult, NewPileData, NewTaskData, Pile, PileMode, PileWithTasks, RecurrenceRange,
    Task, TaskStatus, UpdateTaskData,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use sqlx::{FromRow, SqliteConnection};

pub mod piles;
pub mod preferences;
pub mod tasks;

// Traits are defined in this module and implemented in respective domain modules

/// Domain-specific trait for pile operations
#[async_trait]
pub trait PileRepository {
    async fn add_pile(&self, data: NewPileData) -> Result<Pile, CoreError>;
    async fn find_pile_by_id(&self, id: i64) -> Result<Option<Pile>, CoreError>;
    /// First pile (lowest id) with this name.
    async fn find_pile_by_name(&self, name: &str) -> Result<Option<Pile>, CoreError>;
    async fn find_default_pile(&self) -> Result<Pile, CoreError>;
    async fn find_piles(&self) -> Result<Vec<Pile>, CoreError>;
    async fn find_piles_with_tasks(&self) -> Result<Vec<PileWithTasks>, CoreError>;
    /// Removes the pile, its tasks and their history. The default pile is protected.
    async fn delete_pile(&self, id: i64) -> Result<(), CoreError>;
}

/// Domain-specific trait for task operations
#[async_trait]
pub trait TaskRepository {
    async fn add_task(&self, data: NewTaskData) -> Result<Task, CoreError>;
    async fn find_task_by_id(&self, id: i64) -> Result<Option<Task>, CoreError>;
    async fn update_task(&self, id: i64, data: UpdateTaskData) -> Result<Task, CoreError>;
    async fn complete_task(
        &self,
        id: i64,
        now: DateTime<Utc>,
        tz: &Tz,
    ) -> Result<CompletionResult, CoreError>;
    /// Marks the task deleted; the record stays.
    async fn delete_task(&self, id: i64) -> Result<Task, CoreError>;
    /// Puts recurring done tasks whose reminder has come back to active.
    async fn reactivate_recurring(&self, now: DateTime<Utc>) -> Result<u64, CoreError>;
}

/// Domain-specific trait for user preferences
#[async_trait]
pub trait PreferenceRepository {
    async fn pile_order(&self) -> Result<Vec<i64>, CoreError>;
    async fn set_pile_order(&self, order: &[i64]) -> Result<(), CoreError>;
}

/// Main repository trait that composes all domain traits
pub trait Repository: PileRepository + TaskRepository + PreferenceRepository + Sync {}

/// SQLite implementation of the repository pattern
pub struct SqliteRepository {
    pool: DbPool,
}

impl SqliteRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Get a reference to the database pool for internal use across modules
    pub(crate) fn pool(&self) -> &DbPool {
        &self.pool
    }
}

impl Repository for SqliteRepository {}

// Row types: SQLite stores counters as signed integers and completion
// history in its own table.

#[derive(Debug, FromRow)]
pub(crate) struct PileRow {
    id: i64,
    name: String,
    description: String,
    mode: PileMode,
    max_tasks: i64,
    color: String,
    deleted_count: i64,
    is_default: bool,
}

impl From<PileRow> for Pile {
    fn from(row: PileRow) -> Self {
        Pile {
            id: row.id,
            name: row.name,
            description: row.description,
            mode: row.mode,
            max_tasks: u32::try_from(row.max_tasks).unwrap_or(0),
            color: row.color,
            deleted_count: u32::try_from(row.deleted_count).unwrap_or(0),
            is_default: row.is_default,
        }
    }
}

#[derive(Debug, FromRow)]
pub(crate) struct TaskRow {
    id: i64,
    title: String,
    description: String,
    status: TaskStatus,
    pile_id: i64,
    created_at: DateTime<Utc>,
    modified_at: DateTime<Utc>,
    reminder: Option<DateTime<Utc>>,
    is_recurring: bool,
    recurrence_range: RecurrenceRange,
    recurrence_frequency: i64,
}

impl TaskRow {
    pub(crate) fn into_task(self, mut completion_times: Vec<DateTime<Utc>>) -> Task {
        completion_times.sort();
        Task {
            id: self.id,
            title: self.title,
            description: self.description,
            status: self.status,
            pile_id: self.pile_id,
            created_at: self.created_at,
            modified_at: self.modified_at,
            reminder: self.reminder,
            is_recurring: self.is_recurring,
            recurrence_range: self.recurrence_range,
            recurrence_frequency: u32::try_from(self.recurrence_frequency).unwrap_or(1),
            completion_times,
        }
    }
}

#[derive(Debug, FromRow)]
pub(crate) struct CompletionRow {
    pub(crate) task_id: i64,
    pub(crate) completed_at: DateTime<Utc>,
}

pub(crate) async fn fetch_pile(conn: &mut SqliteConnection, id: i64) -> Result<Option<Pile>, CoreError> {
    let row: Option<PileRow> = sqlx::query_as("SELECT * FROM piles WHERE id = ?")
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;
    Ok(row.map(Pile::from))
}

pub(crate) async fn fetch_default_pile(conn: &mut SqliteConnection) -> Result<Pile, CoreError> {
    let row: Option<PileRow> = sqlx::query_as("SELECT * FROM piles WHERE is_default = 1")
        .fetch_optional(&mut *conn)
        .await?;
    row.map(Pile::from)
        .ok_or_else(|| CoreError::NotFound("Default pile is missing".to_string()))
}

pub(crate) async fn fetch_task(conn: &mut SqliteConnection, id: i64) -> Result<Option<Task>, CoreError> {
    let row: Option<TaskRow> = sqlx::query_as("SELECT * FROM tasks WHERE id = ?")
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;
    let Some(row) = row else {
        return Ok(None);
    };

    let completions: Vec<(DateTime<Utc>,)> =
        sqlx::query_as("SELECT completed_at FROM task_completions WHERE task_id = ?")
            .bind(id)
            .fetch_all(&mut *conn)
            .await?;
    Ok(Some(row.into_task(completions.into_iter().map(|(at,)| at).collect())))
}

/// Tasks of one pile in creation order, with their completion history.
pub(crate) async fn fetch_pile_tasks(
    conn: &mut SqliteConnection,
    pile_id: i64,
) -> Result<Vec<Task>, CoreError> {
    let rows: Vec<TaskRow> =
        sqlx::query_as("SELECT * FROM tasks WHERE pile_id = ? ORDER BY created_at, id")
            .bind(pile_id)
            .fetch_all(&mut *conn)
            .await?;
    let completions: Vec<CompletionRow> = sqlx::query_as(
        r#"SELECT c.task_id, c.completed_at FROM task_completions c
        INNER JOIN tasks t ON t.id = c.task_id
        WHERE t.pile_id = ?"#,
    )
    .bind(pile_id)
    .fetch_all(&mut *conn)
    .await?;

    Ok(attach_completions(rows, completions))
}

pub(crate) fn attach_completions(rows: Vec<TaskRow>, completions: Vec<CompletionRow>) -> Vec<Task> {
    let mut by_task: std::collections::HashMap<i64, Vec<DateTime<Utc>>> =
        std::collections::HashMap::new();
    for c in completions {
        by_task.entry(c.task_id).or_default().push(c.completed_at);
    }
    rows.into_iter()
        .map(|row| {
            let times = by_task.remove(&row.id).unwrap_or_default();
            row.into_task(times)
        })
        .collect()
}
