use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;

/// Admin access to the auth service's user directory.
#[async_trait]
pub trait IdentityAdmin: Send + Sync {
    /// Return the id of the user registered under `email`, creating the user
    /// (pre-confirmed) when none exists.
    async fn get_or_create_user(&self, email: &str, password: Option<&str>, metadata: Value) -> Result<String>;
}

/// Insert-or-replace writes against named tables.
#[async_trait]
pub trait TableWriter: Send + Sync {
    /// Write `rows`, replacing existing rows that collide on `on_conflict`.
    /// The written rows are returned only when `returning` is set.
    async fn upsert(&self, table: &str, on_conflict: &str, rows: &[Value], returning: bool) -> Result<Vec<Value>>;
}
