//! Typed writes for each seeded table and the key each one upserts on.

use serde::Serialize;
use serde_json::Value;
use tracing::info;

use devseed_core::error::{Error, Result};
use devseed_core::traits::TableWriter;
use devseed_core::types::{
    CofounderPreferenceSection, EmbeddingRecord, ProfileSection, UserSettingsSection, VentureRow, VentureSection,
};

pub const PROFILES: (&str, &str) = ("profiles", "user_id");
pub const VENTURES: (&str, &str) = ("user_ventures", "id");
pub const COFOUNDER_PREFERENCES: (&str, &str) = ("user_cofounder_preference", "id");
pub const USER_SETTINGS: (&str, &str) = ("user_settings", "id");
pub const EMBEDDINGS: (&str, &str) = ("embeddings", "entity_id");

fn to_row<T: Serialize>(value: &T) -> Result<Value> {
    serde_json::to_value(value).map_err(|e| Error::Decode(format!("row encoding: {e}")))
}

pub async fn upsert_profile(db: &dyn TableWriter, profile: &ProfileSection) -> Result<()> {
    let (table, key) = PROFILES;
    db.upsert(table, key, &[to_row(profile)?], false).await?;
    info!(name = profile.name.as_deref().unwrap_or("Unknown"), "profile upserted");
    Ok(())
}

/// One write per venture; the rows the database hands back (with their
/// generated ids) are collected in fixture order.
pub async fn upsert_ventures(db: &dyn TableWriter, ventures: &[VentureSection]) -> Result<Vec<VentureRow>> {
    let (table, key) = VENTURES;
    let mut written = Vec::with_capacity(ventures.len());
    for venture in ventures {
        for row in db.upsert(table, key, &[to_row(venture)?], true).await? {
            let row: VentureRow = serde_json::from_value(row)
                .map_err(|e| Error::Decode(format!("{table} row: {e}")))?;
            written.push(row);
        }
    }
    info!(count = ventures.len(), "venture(s) upserted");
    Ok(written)
}

pub async fn upsert_cofounder_preferences(db: &dyn TableWriter, preferences: &[CofounderPreferenceSection]) -> Result<()> {
    let (table, key) = COFOUNDER_PREFERENCES;
    for pref in preferences {
        db.upsert(table, key, &[to_row(pref)?], false).await?;
    }
    info!(count = preferences.len(), "cofounder preference(s) upserted");
    Ok(())
}

pub async fn upsert_user_settings(db: &dyn TableWriter, settings: &UserSettingsSection) -> Result<()> {
    let (table, key) = USER_SETTINGS;
    db.upsert(table, key, &[to_row(settings)?], false).await?;
    info!("user settings upserted");
    Ok(())
}

pub async fn upsert_embedding(db: &dyn TableWriter, record: &EmbeddingRecord) -> Result<()> {
    let (table, key) = EMBEDDINGS;
    db.upsert(table, key, &[to_row(record)?], false).await?;
    Ok(())
}
