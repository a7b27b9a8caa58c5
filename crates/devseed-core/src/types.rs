//! Fixture documents and the rows derived from them.
//!
//! Each section keeps the columns the seeder reads as typed fields and
//! carries every other column through `extra`, so fixtures can populate
//! table columns the seeder never inspects.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub type Columns = Map<String, Value>;

/// One user's seed data, loaded from a single fixture file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserFixture {
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<ProfileSection>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ventures: Option<Vec<VentureSection>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cofounder_preferences: Option<Vec<CofounderPreferenceSection>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_settings: Option<UserSettingsSection>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileSection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(flatten)]
    pub extra: Columns,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VentureSection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    pub title: String,
    pub description: String,
    #[serde(flatten)]
    pub extra: Columns,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CofounderPreferenceSection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(flatten)]
    pub extra: Columns,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserSettingsSection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(flatten)]
    pub extra: Columns,
}

impl UserFixture {
    pub const DEFAULT_PASSWORD: &'static str = "dev-password-123";

    pub fn password_or_default(&self) -> &str {
        self.password.as_deref().unwrap_or(Self::DEFAULT_PASSWORD)
    }

    /// Metadata stored on the auth user: the profile name, or null.
    pub fn user_metadata(&self) -> Value {
        let name = self.profile.as_ref().and_then(|p| p.name.clone());
        serde_json::json!({ "name": name })
    }

    /// Stamp the resolved auth user id into every section present.
    pub fn assign_user_id(&mut self, user_id: &str) {
        if let Some(profile) = self.profile.as_mut() {
            profile.user_id = Some(user_id.to_string());
        }
        for venture in self.ventures.iter_mut().flatten() {
            venture.user_id = Some(user_id.to_string());
        }
        for pref in self.cofounder_preferences.iter_mut().flatten() {
            pref.user_id = Some(user_id.to_string());
        }
        if let Some(settings) = self.user_settings.as_mut() {
            settings.user_id = Some(user_id.to_string());
        }
    }
}

/// A `user_ventures` row as returned by the database after an upsert.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VentureRow {
    pub id: Value,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(flatten)]
    pub extra: Columns,
}

impl VentureRow {
    /// The row id as text; uuid columns come back as strings, serial
    /// columns as numbers.
    pub fn entity_id(&self) -> String {
        match &self.id {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityType {
    Venture,
}

/// One row of the `embeddings` table, keyed by `entity_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbeddingRecord {
    pub entity_id: String,
    pub user_id: String,
    pub entity_type: EntityType,
    pub model: String,
    pub vector: Vec<f64>,
    pub version: String,
}
