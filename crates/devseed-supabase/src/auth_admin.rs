//! GoTrue admin client: look a user up by email, create one when absent.
//!
//! Both calls use the service-role credential and fail on any non-success
//! status.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use devseed_core::config::{Secret, Settings};
use devseed_core::error::{Error, Result};
use devseed_core::http::{build_client, ensure_success, with_service_role};
use devseed_core::traits::IdentityAdmin;

pub struct GoTrueAdmin {
    client: Client,
    base_url: String,
    service_role: Secret,
}

#[derive(Debug, Deserialize)]
struct AdminUser {
    id: String,
    #[serde(default)]
    email: Option<String>,
}

/// Depending on the GoTrue version the list arrives under `users` or `data`.
#[derive(Debug, Default, Deserialize)]
struct UserList {
    #[serde(default)]
    users: Option<Vec<AdminUser>>,
    #[serde(default)]
    data: Option<Vec<AdminUser>>,
}

impl UserList {
    fn into_users(self) -> Vec<AdminUser> {
        self.users.filter(|u| !u.is_empty()).or(self.data).unwrap_or_default()
    }
}

#[derive(Debug, Serialize)]
struct CreateUser<'a> {
    email: &'a str,
    email_confirm: bool,
    user_metadata: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    password: Option<&'a str>,
}

impl GoTrueAdmin {
    pub fn new(settings: &Settings) -> Result<Self> {
        let client = build_client(settings.http_timeout)?;
        Ok(Self::with_client(client, &settings.gotrue_url, settings.supabase_service_role.clone()))
    }

    pub fn with_client(client: Client, base_url: &str, service_role: Secret) -> Self {
        Self { client, base_url: base_url.trim_end_matches('/').to_string(), service_role }
    }

    fn users_url(&self) -> String {
        format!("{}/admin/users", self.base_url)
    }

    /// Id of the user whose email matches exactly. The server-side `email`
    /// filter is not guaranteed to be exact, so results are filtered again
    /// here. Addresses compare ASCII case-insensitively, the way GoTrue
    /// stores them.
    pub async fn find_user_by_email(&self, email: &str) -> Result<Option<String>> {
        let request = self.client.get(self.users_url()).query(&[("email", email)]);
        let response = with_service_role(request, &self.service_role).send().await?;
        let response = ensure_success(response, "user lookup").await?;
        let list: UserList = response
            .json()
            .await
            .map_err(|e| Error::Decode(format!("user lookup response: {e}")))?;

        Ok(list
            .into_users()
            .into_iter()
            .find(|u| u.email.as_deref().is_some_and(|e| e.eq_ignore_ascii_case(email)))
            .map(|u| u.id))
    }

    pub async fn create_user(&self, email: &str, password: Option<&str>, metadata: Value) -> Result<String> {
        let body = CreateUser {
            email,
            email_confirm: true,
            user_metadata: if metadata.is_null() { Value::Object(Default::default()) } else { metadata },
            password: password.filter(|p| !p.is_empty()),
        };
        let request = self.client.post(self.users_url()).json(&body);
        let response = with_service_role(request, &self.service_role).send().await?;
        let response = ensure_success(response, "user creation").await?;
        let created: Value = response.json().await?;

        created
            .get("id")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| Error::Decode("user creation response has no id".to_string()))
    }
}

#[async_trait]
impl IdentityAdmin for GoTrueAdmin {
    async fn get_or_create_user(&self, email: &str, password: Option<&str>, metadata: Value) -> Result<String> {
        if let Some(id) = self.find_user_by_email(email).await? {
            info!(email, id = %id, "user already exists");
            return Ok(id);
        }
        let id = self.create_user(email, password, metadata).await?;
        info!(email, id = %id, "created new user");
        Ok(id)
    }
}
