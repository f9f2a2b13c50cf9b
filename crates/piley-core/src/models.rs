use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

use crate::error::CoreError;

/// Maximum number of characters in a pile name.
pub const PILE_NAME_MAX_LEN: usize = 30;
/// Maximum number of characters in a pile description.
pub const PILE_DESCRIPTION_MAX_LEN: usize = 200;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "TEXT", rename_all = "lowercase")]
pub enum TaskStatus {
    Default,
    Done,
    Deleted,
}

#[derive(Error, Debug, PartialEq)]
#[error("Invalid task status: {0}")]
pub struct ParseTaskStatusError(String);

impl FromStr for TaskStatus {
    type Err = ParseTaskStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "default" | "active" => Ok(TaskStatus::Default),
            "done" => Ok(TaskStatus::Done),
            "deleted" => Ok(TaskStatus::Deleted),
            _ => Err(ParseTaskStatusError(s.to_string())),
        }
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TaskStatus::Default => write!(f, "active"),
            TaskStatus::Done => write!(f, "done"),
            TaskStatus::Deleted => write!(f, "deleted"),
        }
    }
}

/// Completion-ordering policy of a pile.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "TEXT", rename_all = "lowercase")]
pub enum PileMode {
    /// Any active task may be completed.
    Free,
    /// Only the oldest active task may be completed.
    Fifo,
    /// Only the newest active task may be completed.
    Lifo,
}

#[derive(Error, Debug, PartialEq)]
#[error("Invalid pile mode: {0}")]
pub struct ParsePileModeError(String);

impl FromStr for PileMode {
    type Err = ParsePileModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "free" => Ok(PileMode::Free),
            "fifo" => Ok(PileMode::Fifo),
            "lifo" => Ok(PileMode::Lifo),
            _ => Err(ParsePileModeError(s.to_string())),
        }
    }
}

impl std::fmt::Display for PileMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PileMode::Free => write!(f, "free"),
            PileMode::Fifo => write!(f, "fifo"),
            PileMode::Lifo => write!(f, "lifo"),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "TEXT", rename_all = "lowercase")]
pub enum RecurrenceRange {
    Daily,
    Weekly,
    Monthly,
}

#[derive(Error, Debug, PartialEq)]
#[error("Invalid recurrence range: {0}")]
pub struct ParseRecurrenceRangeError(String);

impl FromStr for RecurrenceRange {
    type Err = ParseRecurrenceRangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "daily" | "day" => Ok(RecurrenceRange::Daily),
            "weekly" | "week" => Ok(RecurrenceRange::Weekly),
            "monthly" | "month" => Ok(RecurrenceRange::Monthly),
            _ => Err(ParseRecurrenceRangeError(s.to_string())),
        }
    }
}

impl std::fmt::Display for RecurrenceRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecurrenceRange::Daily => write!(f, "daily"),
            RecurrenceRange::Weekly => write!(f, "weekly"),
            RecurrenceRange::Monthly => write!(f, "monthly"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
    pub pile_id: i64,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
    pub reminder: Option<DateTime<Utc>>,
    pub is_recurring: bool,
    pub recurrence_range: RecurrenceRange,
    pub recurrence_frequency: u32,
    /// Every recorded completion, oldest first.
    pub completion_times: Vec<DateTime<Utc>>,
}

impl Default for Task {
    fn default() -> Self {
        let now = Utc::now();
        Self {
            id: 0,
            title: String::new(),
            description: String::new(),
            status: TaskStatus::Default,
            pile_id: 0,
            created_at: now,
            modified_at: now,
            reminder: None,
            is_recurring: false,
            recurrence_range: RecurrenceRange::Daily,
            recurrence_frequency: 1,
            completion_times: Vec::new(),
        }
    }
}

impl Task {
    /// Active tasks are the ones a pile policy applies to.
    #[inline]
    pub fn is_active(&self) -> bool {
        self.status == TaskStatus::Default
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pile {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub mode: PileMode,
    /// Zero means unlimited.
    pub max_tasks: u32,
    pub color: String,
    pub deleted_count: u32,
    pub is_default: bool,
}

impl Default for Pile {
    fn default() -> Self {
        Self {
            id: 0,
            name: String::new(),
            description: String::new(),
            mode: PileMode::Free,
            max_tasks: 0,
            color: "none".to_string(),
            deleted_count: 0,
            is_default: false,
        }
    }
}

/// A pile joined with its tasks, ordered by creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PileWithTasks {
    pub pile: Pile,
    pub tasks: Vec<Task>,
}

impl PileWithTasks {
    pub fn new(pile: Pile, tasks: Vec<Task>) -> Self {
        Self { pile, tasks }
    }

    pub fn active_tasks(&self) -> impl Iterator<Item = &Task> {
        self.tasks.iter().filter(|t| t.is_active())
    }
}

#[derive(Debug, Clone)]
pub struct NewPileData {
    pub name: String,
    pub description: String,
    pub mode: PileMode,
    pub max_tasks: u32,
    pub color: String,
}

impl Default for NewPileData {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            mode: PileMode::Free,
            max_tasks: 0,
            color: "none".to_string(),
        }
    }
}

impl NewPileData {
    pub fn validate(&self) -> Result<(), CoreError> {
        let name_len = self.name.trim().chars().count();
        if name_len == 0 {
            return Err(CoreError::InvalidInput("Pile name cannot be empty".to_string()));
        }
        if name_len > PILE_NAME_MAX_LEN {
            return Err(CoreError::InvalidInput(format!(
                "Pile name cannot exceed {} characters",
                PILE_NAME_MAX_LEN
            )));
        }
        if self.description.chars().count() > PILE_DESCRIPTION_MAX_LEN {
            return Err(CoreError::InvalidInput(format!(
                "Pile description cannot exceed {} characters",
                PILE_DESCRIPTION_MAX_LEN
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct NewTaskData {
    pub title: String,
    pub description: String,
    /// Falls back to the default pile.
    pub pile_id: Option<i64>,
    pub reminder: Option<DateTime<Utc>>,
    pub is_recurring: bool,
    pub recurrence_range: RecurrenceRange,
    pub recurrence_frequency: u32,
}

impl Default for NewTaskData {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            pile_id: None,
            reminder: None,
            is_recurring: false,
            recurrence_range: RecurrenceRange::Daily,
            recurrence_frequency: 1,
        }
    }
}

impl NewTaskData {
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.title.trim().is_empty() {
            return Err(CoreError::InvalidInput("Task title cannot be empty".to_string()));
        }
        if self.recurrence_frequency == 0 {
            return Err(CoreError::InvalidInput(
                "Recurrence frequency must be at least 1".to_string(),
            ));
        }
        if self.is_recurring && self.reminder.is_none() {
            return Err(CoreError::InvalidInput(
                "Recurring tasks need a reminder".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct UpdateTaskData {
    pub title: Option<String>,
    pub description: Option<String>,
    pub pile_id: Option<i64>,
    pub reminder: Option<Option<DateTime<Utc>>>,
    pub is_recurring: Option<bool>,
    pub recurrence_range: Option<RecurrenceRange>,
    pub recurrence_frequency: Option<u32>,
}

/// Outcome of completing a task.
#[derive(Debug)]
pub enum CompletionResult {
    Single(Task),
    /// The task was recurring; its reminder moved to the next cycle.
    Recurring { task: Task, next_reminder: DateTime<Utc> },
}
