use lambda_http::{http::StatusCode, Body, Error, Response};
use thiserror::Error;
use uuid::Uuid;

use crate::backend::BackendError;

pub const INTERNAL_ERROR_MESSAGE: &str = "Erro interno no servidor";

/// Every way a provisioning call can end short of success.
#[derive(Debug, Error)]
pub enum ProvisionError {
    #[error("Token não encontrado")]
    AuthenticationMissing,

    #[error("Não autenticado")]
    AuthenticationInvalid,

    #[error("Apenas administradores podem criar utilizadores")]
    AuthorizationDenied,

    #[error("Campos obrigatórios em falta")]
    ValidationFailed,

    /// The body is not JSON at all, or is JSON `null`.
    #[error("malformed request body: {0}")]
    MalformedBody(String),

    /// The identity provider refused the new identity; its message is passed through.
    #[error("{0}")]
    UpstreamCreateFailed(String),

    #[error("profile insert failed for identity {identity_id}: {source}")]
    ProfileInsertFailed {
        identity_id: Uuid,
        #[source]
        source: BackendError,
    },

    #[error(transparent)]
    Backend(#[from] BackendError),
}

impl ProvisionError {
    pub fn status(&self) -> StatusCode {
        match self {
            ProvisionError::AuthenticationMissing | ProvisionError::AuthenticationInvalid => {
                StatusCode::UNAUTHORIZED
            }
            ProvisionError::AuthorizationDenied => StatusCode::FORBIDDEN,
            ProvisionError::ValidationFailed | ProvisionError::UpstreamCreateFailed(_) => {
                StatusCode::BAD_REQUEST
            }
            ProvisionError::MalformedBody(_)
            | ProvisionError::ProfileInsertFailed { .. }
            | ProvisionError::Backend(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Text sent to the caller. Server faults never leak their cause.
    pub fn public_message(&self) -> String {
        if self.status().is_server_error() {
            INTERNAL_ERROR_MESSAGE.to_string()
        } else {
            self.to_string()
        }
    }

    pub fn into_response(self) -> Result<Response<Body>, Error> {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("Unhandled provisioning failure: {}", self);
        } else {
            tracing::warn!("Provisioning request rejected ({}): {}", status, self);
        }

        text_response(status, self.public_message())
    }
}

pub fn text_response(status: StatusCode, message: String) -> Result<Response<Body>, Error> {
    Ok(Response::builder()
        .status(status)
        .header("Content-Type", "text/plain; charset=utf-8")
        .header("Access-Control-Allow-Origin", "*")
        .body(message.into())
        .map_err(Box::new)?)
}
