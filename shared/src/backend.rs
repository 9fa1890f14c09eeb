//! The identity + profile capability the provisioning flow runs against.

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::types::{Identity, NewIdentity, ProfileRow};

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("backend request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The backend answered with a non-success status.
    #[error("{message}")]
    Rejected { status: u16, message: String },
}

impl BackendError {
    pub fn rejected(status: u16, message: impl Into<String>) -> Self {
        BackendError::Rejected {
            status,
            message: message.into(),
        }
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserBackend: Send + Sync {
    /// Resolve the caller behind a raw `Authorization` header value, using the
    /// restricted credential. `Ok(None)` when the token is not accepted.
    async fn resolve_caller(&self, authorization: &str) -> Result<Option<Identity>, BackendError>;

    /// Role of exactly one profile row. Zero or several rows is an error,
    /// a NULL role is `Ok(None)`.
    async fn fetch_role(&self, identity_id: Uuid) -> Result<Option<String>, BackendError>;

    async fn create_identity(&self, identity: &NewIdentity) -> Result<Identity, BackendError>;

    async fn insert_profile(&self, profile: &ProfileRow) -> Result<(), BackendError>;

    async fn delete_identity(&self, identity_id: Uuid) -> Result<(), BackendError>;
}
