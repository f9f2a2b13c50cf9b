use anyhow::{anyhow, Result};
use piley_core::error::CoreError;
use piley_core::models::Pile;
use piley_core::repository::Repository;

/// Resolves a pile given by numeric ID or by name.
pub async fn resolve_pile(repo: &impl Repository, reference: &str) -> Result<Pile> {
    if let Ok(id) = reference.parse::<i64>() {
        if let Some(pile) = repo.find_pile_by_id(id).await? {
            return Ok(pile);
        }
    }
    repo.find_pile_by_name(reference.trim())
        .await?
        .ok_or_else(|| anyhow!(CoreError::NotFound(format!("No pile found matching '{}'", reference))))
}
