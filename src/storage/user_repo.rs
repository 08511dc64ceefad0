use crate::domain::user::UserRecord;
use crate::error::Result;
use crate::storage::records::user::User;
use sqlx::PgPool;

const USER_COLUMNS: &str = "id, username, display_name, role, password_hash, legacy_password, created_at";

#[derive(Clone, Debug)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Inserts a user. `username` must already be the lowercased canonical
    /// form; the unique index rejects duplicates.
    pub async fn create(
        &self,
        username: &str,
        display_name: &str,
        role: Option<&str>,
        password_hash: &str,
    ) -> Result<UserRecord> {
        let user = sqlx::query_as::<_, User>(&format!(
            r"
            INSERT INTO users (username, display_name, role, password_hash)
            VALUES ($1, $2, $3, $4)
            RETURNING {USER_COLUMNS}
            ",
        ))
        .bind(username)
        .bind(display_name)
        .bind(role)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await?;

        Ok(user.into())
    }

    pub async fn find_by_username(&self, username: &str) -> Result<Option<UserRecord>> {
        let user = sqlx::query_as::<_, User>(&format!(
            r"
            SELECT {USER_COLUMNS}
            FROM users
            WHERE username = $1
            ",
        ))
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user.map(Into::into))
    }

    pub async fn count(&self) -> Result<i64> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users").fetch_one(&self.pool).await?;
        Ok(count.0)
    }
}
