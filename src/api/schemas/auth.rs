use crate::domain::user::UserRecord;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Default, Deserialize)]
pub struct LoginRequest {
    #[serde(default, alias = "usuario")]
    pub username: Option<String>,
    #[serde(default, alias = "contraseña", alias = "contrasena")]
    pub password: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    #[serde(default, alias = "usuario")]
    pub username: Option<String>,
    #[serde(default, alias = "contraseña", alias = "contrasena")]
    pub password: Option<String>,
    #[serde(default, alias = "nombre", alias = "display_name")]
    pub display_name: Option<String>,
    #[serde(default, alias = "rol")]
    pub role: Option<String>,
}

/// Sanitized account view. Never carries password material.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: Uuid,
    pub username: String,
    pub display_name: String,
    pub role: &'static str,
}

impl From<UserRecord> for UserProfile {
    fn from(user: UserRecord) -> Self {
        let role = user.derived_role().as_str();
        Self {
            id: user.id,
            username: user.username,
            display_name: user.display_name,
            role,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct UserEnvelope {
    pub user: UserProfile,
}
