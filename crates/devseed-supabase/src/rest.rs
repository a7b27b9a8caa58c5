use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::debug;

use devseed_core::config::{Secret, Settings};
use devseed_core::error::{Error, Result};
use devseed_core::http::{build_client, ensure_success, with_service_role};
use devseed_core::traits::TableWriter;

/// PostgREST upserts through the Supabase REST gateway (`/rest/v1`).
pub struct PostgrestClient {
    client: Client,
    rest_url: String,
    service_role: Secret,
}

impl PostgrestClient {
    pub fn new(settings: &Settings) -> Result<Self> {
        let client = build_client(settings.http_timeout)?;
        Ok(Self::with_client(client, &settings.supabase_url, settings.supabase_service_role.clone()))
    }

    pub fn with_client(client: Client, supabase_url: &str, service_role: Secret) -> Self {
        let rest_url = format!("{}/rest/v1", supabase_url.trim_end_matches('/'));
        Self { client, rest_url, service_role }
    }
}

fn prefer_header(returning: bool) -> &'static str {
    if returning {
        "resolution=merge-duplicates,return=representation"
    } else {
        "resolution=merge-duplicates,return=minimal"
    }
}

#[async_trait]
impl TableWriter for PostgrestClient {
    async fn upsert(&self, table: &str, on_conflict: &str, rows: &[Value], returning: bool) -> Result<Vec<Value>> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }
        debug!(table, on_conflict, rows = rows.len(), "upsert");
        let request = self
            .client
            .post(format!("{}/{}", self.rest_url, table))
            .query(&[("on_conflict", on_conflict)])
            .header("Prefer", prefer_header(returning))
            .json(rows);
        let response = with_service_role(request, &self.service_role).send().await?;
        let response = ensure_success(response, &format!("upsert into {table}")).await?;

        if !returning {
            return Ok(Vec::new());
        }
        match response.json::<Value>().await? {
            Value::Array(written) => Ok(written),
            other => Err(Error::Decode(format!("upsert into {table} returned {other} instead of rows"))),
        }
    }
}
