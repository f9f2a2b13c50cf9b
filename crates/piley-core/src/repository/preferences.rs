use crate::error::CoreError;
use crate::repository::SqliteRepository;
use async_trait::async_trait;
use sqlx::SqliteConnection;

const PILE_ORDER_KEY: &str = "pile_order";

pub(crate) async fn load_pile_order(conn: &mut SqliteConnection) -> Result<Vec<i64>, CoreError> {
    let value: Option<(String,)> = sqlx::query_as("SELECT value FROM preferences WHERE key = ?")
        .bind(PILE_ORDER_KEY)
        .fetch_optional(&mut *conn)
        .await?;

    match value {
        Some((json,)) => Ok(serde_json::from_str(&json)?),
        None => Ok(Vec::new()),
    }
}

pub(crate) async fn store_pile_order(conn: &mut SqliteConnection, order: &[i64]) -> Result<(), CoreError> {
    let json = serde_json::to_string(order)?;
    sqlx::query(
        r#"INSERT INTO preferences (key, value) VALUES (?, ?)
        ON CONFLICT(key) DO UPDATE SET value = excluded.value"#,
    )
    .bind(PILE_ORDER_KEY)
    .bind(json)
    .execute(&mut *conn)
    .await?;
    Ok(())
}

#[async_trait]
impl super::PreferenceRepository for SqliteRepository {
    async fn pile_order(&self) -> Result<Vec<i64>, CoreError> {
        let mut conn = self.pool().acquire().await?;
        load_pile_order(&mut conn).await
    }

    async fn set_pile_order(&self, order: &[i64]) -> Result<(), CoreError> {
        let mut conn = self.pool().acquire().await?;
        store_pile_order(&mut conn, order).await?;

        tracing::debug!(?order, "pile order saved");
        Ok(())
    }
}
