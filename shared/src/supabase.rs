//! Supabase-backed [`UserBackend`].
//!
//! Identity calls go to the auth service (`/auth/v1`), profile rows to the
//! REST interface of the database (`/rest/v1`). The caller is resolved with
//! the anon key and the caller's own token; everything else runs under the
//! service role key.

use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use uuid::Uuid;

use crate::backend::{BackendError, UserBackend};
use crate::config::BackendConfig;
use crate::types::{Identity, NewIdentity, ProfileRow, RoleRow};

const SINGLE_OBJECT: &str = "application/vnd.pgrst.object+json";

#[derive(Clone)]
pub struct SupabaseClient {
    config: BackendConfig,
    http: Client,
}

impl SupabaseClient {
    pub fn new(config: BackendConfig) -> Result<Self, BackendError> {
        let http = Client::builder()
            .user_agent(concat!("provisioning-shared/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { config, http })
    }

    fn auth_url(&self, path: &str) -> String {
        format!("{}/auth/v1/{}", self.config.url, path)
    }

    fn profiles_url(&self) -> String {
        format!("{}/rest/v1/{}", self.config.url, self.config.profiles_table)
    }

    fn with_service_key(&self, builder: RequestBuilder) -> RequestBuilder {
        builder
            .header("apikey", &self.config.service_role_key)
            .bearer_auth(&self.config.service_role_key)
    }
}

#[async_trait]
impl UserBackend for SupabaseClient {
    async fn resolve_caller(&self, authorization: &str) -> Result<Option<Identity>, BackendError> {
        let response = self
            .http
            .get(self.auth_url("user"))
            .header("apikey", &self.config.anon_key)
            .header(AUTHORIZATION, authorization)
            .send()
            .await?;

        if !response.status().is_success() {
            tracing::debug!("Caller token rejected: {}", response.status());
            return Ok(None);
        }

        Ok(Some(response.json::<Identity>().await?))
    }

    async fn fetch_role(&self, identity_id: Uuid) -> Result<Option<String>, BackendError> {
        let id_filter = format!("eq.{}", identity_id);

        let response = self
            .with_service_key(self.http.get(self.profiles_url()))
            .query(&[("select", "cargo"), ("id", id_filter.as_str())])
            .header(ACCEPT, SINGLE_OBJECT)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(rejection(response).await);
        }

        let row: RoleRow = response.json().await?;
        Ok(row.cargo)
    }

    async fn create_identity(&self, identity: &NewIdentity) -> Result<Identity, BackendError> {
        let response = self
            .with_service_key(self.http.post(self.auth_url("admin/users")))
            .json(identity)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(rejection(response).await);
        }

        Ok(response.json::<Identity>().await?)
    }

    async fn insert_profile(&self, profile: &ProfileRow) -> Result<(), BackendError> {
        let response = self
            .with_service_key(self.http.post(self.profiles_url()))
            .header("Prefer", "return=minimal")
            .json(profile)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(rejection(response).await);
        }

        Ok(())
    }

    async fn delete_identity(&self, identity_id: Uuid) -> Result<(), BackendError> {
        let response = self
            .with_service_key(
                self.http
                    .delete(self.auth_url(&format!("admin/users/{}", identity_id))),
            )
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(rejection(response).await);
        }

        Ok(())
    }
}

/// Error envelope shared by the auth service and the REST interface.
#[derive(Deserialize, Default)]
struct ErrorEnvelope {
    msg: Option<String>,
    message: Option<String>,
    error_description: Option<String>,
    error: Option<String>,
}

async fn rejection(response: Response) -> BackendError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    BackendError::rejected(status.as_u16(), error_message(status, &body))
}

fn error_message(status: StatusCode, body: &str) -> String {
    if let Ok(envelope) = serde_json::from_str::<ErrorEnvelope>(body) {
        let found = [
            envelope.msg,
            envelope.message,
            envelope.error_description,
            envelope.error,
        ]
        .into_iter()
        .flatten()
        .find(|m| !m.is_empty());

        if let Some(message) = found {
            return message;
        }
    }

    let body = body.trim();
    if !body.is_empty() {
        return body.to_string();
    }

    status
        .canonical_reason()
        .unwrap_or("request failed")
        .to_string()
}
