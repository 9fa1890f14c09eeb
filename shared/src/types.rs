use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const ADMIN_ROLE: &str = "administrador";
pub const USER_CREATED_MESSAGE: &str = "Utilizador criado com sucesso";

// ========== IDENTITY ==========
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Identity {
    pub id: Uuid,
    #[serde(default)]
    pub email: Option<String>,
}

/// Body of the administrative create call. The address is confirmed up front,
/// no verification mail is sent.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct NewIdentity {
    pub email: String,
    pub password: String,
    pub email_confirm: bool,
}

impl NewIdentity {
    pub fn confirmed(email: &str, password: &str) -> Self {
        Self {
            email: email.to_string(),
            password: password.to_string(),
            email_confirm: true,
        }
    }
}

// ========== PROFILE ==========
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ProfileRow {
    pub id: Uuid,
    #[serde(rename = "nome_completo")]
    pub full_name: String,
    #[serde(rename = "cargo")]
    pub role: String,
}

#[derive(Debug, Deserialize)]
pub struct RoleRow {
    pub cargo: Option<String>,
}

// ========== REQUEST / RESPONSE ==========
#[derive(Debug, Deserialize, Default)]
pub struct CreateUserRequest {
    pub email: Option<String>,
    pub password: Option<String>,
    #[serde(alias = "nome_completo")]
    pub full_name: Option<String>,
    pub cargo: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct CreateUserResponse {
    pub message: String,
    pub user_id: Uuid,
}

impl CreateUserResponse {
    pub fn created(user_id: Uuid) -> Self {
        Self {
            message: USER_CREATED_MESSAGE.to_string(),
            user_id,
        }
    }
}
