//! Shared HTTP plumbing for the service clients.

use std::time::Duration;

use reqwest::{Client, RequestBuilder, Response};

use crate::config::Secret;
use crate::error::{Error, Result};

pub fn build_client(timeout: Duration) -> Result<Client> {
    Ok(Client::builder().timeout(timeout).build()?)
}

/// Attach the Supabase service-role credential, which both the auth admin
/// API and the REST API expect as `apikey` and as a bearer token.
pub fn with_service_role(request: RequestBuilder, key: &Secret) -> RequestBuilder {
    request.header("apikey", key.expose()).bearer_auth(key.expose())
}

/// Pass through a successful response; turn anything else into
/// `Error::Http` carrying the response body.
pub async fn ensure_success(response: Response, context: &str) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(Error::Http { context: context.to_string(), status: status.as_u16(), body })
}
