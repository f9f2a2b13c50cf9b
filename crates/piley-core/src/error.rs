use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Database error")]
    Database(#[from] sqlx::Error),

    #[error("Migration error")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("IO error")]
    Io(#[from] std::io::Error),

    #[error("Serialization error")]
    Serialization(#[from] serde_json::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    #[error("Pile '{name}' is full ({limit} active tasks)")]
    PileFull { name: String, limit: u32 },

    #[error("Pile order requires task {expected} to be completed first")]
    CompletionOrder { expected: i64 },

    #[error("The default pile '{0}' cannot be deleted")]
    DefaultPileProtected(String),
}
