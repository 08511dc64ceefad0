use crate::domain::user::{Role, UserRecord};
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(sqlx::FromRow)]
pub(crate) struct User {
    pub id: Uuid,
    pub username: String,
    pub display_name: String,
    pub role: Option<String>,
    pub password_hash: Option<String>,
    pub legacy_password: Option<String>,
    pub created_at: OffsetDateTime,
}

impl From<User> for UserRecord {
    fn from(record: User) -> Self {
        Self {
            id: record.id,
            username: record.username,
            display_name: record.display_name,
            role: record.role.as_deref().map(Role::from_db),
            password_hash: record.password_hash,
            legacy_password: record.legacy_password,
            created_at: record.created_at,
        }
    }
}
