use crate::backend::{BackendError, UserBackend};
use crate::error::ProvisionError;
use crate::types::{CreateUserRequest, CreateUserResponse, NewIdentity, ProfileRow, ADMIN_ROLE};

/// Create an identity and its profile on behalf of an administrator.
///
/// Checks run in order and the first failure ends the call: caller token,
/// caller identity, caller role, payload, identity creation, profile insert.
/// A failed profile insert deletes the identity it belonged to.
pub async fn create_user<B>(
    backend: &B,
    authorization: Option<&str>,
    body: &[u8],
) -> Result<CreateUserResponse, ProvisionError>
where
    B: UserBackend + ?Sized,
{
    let authorization = authorization
        .filter(|value| !value.is_empty())
        .ok_or(ProvisionError::AuthenticationMissing)?;

    let caller = backend
        .resolve_caller(authorization)
        .await?
        .ok_or(ProvisionError::AuthenticationInvalid)?;

    tracing::info!("Create user requested by {}", caller.id);

    // Lookup errors (no profile, duplicate rows) count as a denial.
    let role = match backend.fetch_role(caller.id).await {
        Ok(role) => role,
        Err(e) => {
            tracing::warn!("Role lookup failed for {}: {}", caller.id, e);
            None
        }
    };
    if !is_admin(role.as_deref()) {
        return Err(ProvisionError::AuthorizationDenied);
    }

    let request = parse_request(body)?;

    let identity = backend
        .create_identity(&NewIdentity::confirmed(&request.email, &request.password))
        .await
        .map_err(|e| match e {
            BackendError::Rejected { message, .. } => {
                ProvisionError::UpstreamCreateFailed(message)
            }
            other => ProvisionError::Backend(other),
        })?;

    tracing::info!("Identity {} created", identity.id);

    let profile = ProfileRow {
        id: identity.id,
        full_name: request.full_name,
        role: request.role,
    };

    if let Err(source) = backend.insert_profile(&profile).await {
        tracing::error!("Profile insert failed for {}, rolling back identity", identity.id);
        if let Err(e) = backend.delete_identity(identity.id).await {
            tracing::error!("Failed to delete orphaned identity {}: {}", identity.id, e);
        }
        return Err(ProvisionError::ProfileInsertFailed {
            identity_id: identity.id,
            source,
        });
    }

    Ok(CreateUserResponse::created(identity.id))
}

fn is_admin(role: Option<&str>) -> bool {
    role.map(|r| r.to_lowercase() == ADMIN_ROLE).unwrap_or(false)
}

struct ValidRequest {
    email: String,
    password: String,
    full_name: String,
    role: String,
}

fn parse_request(body: &[u8]) -> Result<ValidRequest, ProvisionError> {
    let value: serde_json::Value = serde_json::from_slice(body)
        .map_err(|e| ProvisionError::MalformedBody(e.to_string()))?;

    // Other non-object bodies carry none of the fields.
    let request: CreateUserRequest = match value {
        serde_json::Value::Null => {
            return Err(ProvisionError::MalformedBody("body is null".to_string()))
        }
        serde_json::Value::Object(_) => serde_json::from_value(value).map_err(|e| {
            tracing::warn!("Rejected request fields: {}", e);
            ProvisionError::ValidationFailed
        })?,
        _ => CreateUserRequest::default(),
    };

    let present = |field: Option<String>| field.filter(|v| !v.is_empty());

    match (
        present(request.email),
        present(request.password),
        present(request.full_name),
        present(request.cargo),
    ) {
        (Some(email), Some(password), Some(full_name), Some(role)) => Ok(ValidRequest {
            email,
            password,
            full_name,
            role,
        }),
        _ => Err(ProvisionError::ValidationFailed),
    }
}
