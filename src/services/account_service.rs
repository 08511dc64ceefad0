use crate::config::AuthConfig;
use crate::domain::user::{Role, UserRecord};
use crate::error::{AppError, Result};
use crate::storage::is_unique_violation;
use crate::storage::user_repo::UserRepository;
use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
};
use rand::rngs::OsRng;

#[derive(Debug)]
pub struct CreateUser {
    pub setup_token: Option<String>,
    pub username: String,
    pub password: String,
    pub display_name: Option<String>,
    pub role: Option<String>,
}

/// Login and first-time user provisioning. Passwords are verified against an
/// argon2 hash for current accounts and with a constant-time comparison for
/// legacy plaintext accounts.
#[derive(Clone, Debug)]
pub struct AccountService {
    config: AuthConfig,
    user_repo: UserRepository,
}

impl AccountService {
    #[must_use]
    pub const fn new(config: AuthConfig, user_repo: UserRepository) -> Self {
        Self { config, user_repo }
    }

    /// Validates a login attempt.
    ///
    /// Unknown usernames and wrong passwords produce the same error, and an
    /// unknown username still pays the hashing cost so response timing does
    /// not reveal which factor failed.
    ///
    /// # Errors
    /// Returns `MISSING_FIELDS` for blank input and `INVALID_CREDENTIALS`
    /// for any authentication failure.
    #[tracing::instrument(skip(self, username, password), fields(user_id = tracing::field::Empty), err(level = "warn"))]
    pub async fn login(&self, username: &str, password: &str) -> Result<UserRecord> {
        let username = normalize_username(username);
        if username.is_empty() || password.is_empty() {
            return Err(AppError::validation("MISSING_FIELDS", "username and password are required"));
        }

        let Some(user) = self.user_repo.find_by_username(&username).await? else {
            let _ = self.hash_password(password).await;
            tracing::debug!("Login failed: user not found");
            return Err(AppError::InvalidCredentials);
        };

        tracing::Span::current().record("user_id", tracing::field::display(user.id));

        let is_valid = if let Some(hash) = user.password_hash.as_deref() {
            self.verify_password(password, hash).await?
        } else if let Some(legacy) = user.legacy_password.as_deref() {
            constant_time_eq(legacy.as_bytes(), password.as_bytes())
        } else {
            false
        };

        if !is_valid {
            tracing::debug!("Login failed: invalid password");
            return Err(AppError::InvalidCredentials);
        }

        tracing::info!("User logged in");
        Ok(user)
    }

    /// Creates a user, gated by the shared setup secret.
    ///
    /// # Errors
    /// Returns `CONFIG_ERROR` when no secret is configured (the operation is
    /// disabled, not open), `UNAUTHORIZED` on token mismatch, and
    /// `USER_EXISTS` for a case-insensitive duplicate username.
    #[tracing::instrument(skip(self, params), fields(user_id = tracing::field::Empty), err(level = "warn"))]
    pub async fn create_user(&self, params: CreateUser) -> Result<UserRecord> {
        let Some(expected) = self.config.setup_token.as_deref() else {
            return Err(AppError::Config("setup token not configured"));
        };
        let presented = params.setup_token.as_deref().unwrap_or_default();
        if !constant_time_eq(expected.as_bytes(), presented.as_bytes()) {
            return Err(AppError::Unauthorized);
        }

        let username = normalize_username(&params.username);
        if username.is_empty() || params.password.is_empty() {
            return Err(AppError::validation("MISSING_FIELDS", "username and password are required"));
        }

        if self.user_repo.find_by_username(&username).await?.is_some() {
            return Err(AppError::conflict("USER_EXISTS", "username already exists"));
        }

        let password_hash = self.hash_password(&params.password).await?;
        let display_name = params.display_name.as_deref().map(str::trim).filter(|n| !n.is_empty()).unwrap_or(&username);
        let role = params.role.as_deref().map_or(Role::User, Role::from_db);

        // The exists-check races with concurrent creates; the unique index
        // settles it.
        let user = match self.user_repo.create(&username, display_name, Some(role.as_str()), &password_hash).await {
            Err(AppError::Database(e)) if is_unique_violation(&e) => {
                return Err(AppError::conflict("USER_EXISTS", "username already exists"));
            }
            other => other?,
        };

        tracing::Span::current().record("user_id", tracing::field::display(user.id));
        tracing::info!("User created");
        Ok(user)
    }

    async fn hash_password(&self, password: &str) -> Result<String> {
        let password = password.to_string();
        tokio::task::spawn_blocking(move || {
            let salt = SaltString::generate(&mut OsRng);
            Argon2::default()
                .hash_password(password.as_bytes(), &salt)
                .map_err(|_| AppError::Internal)
                .map(|h| h.to_string())
        })
        .await
        .map_err(|_| AppError::Internal)?
    }

    async fn verify_password(&self, password: &str, password_hash: &str) -> Result<bool> {
        let password = password.to_string();
        let password_hash = password_hash.to_string();
        tokio::task::spawn_blocking(move || {
            let parsed_hash = PasswordHash::new(&password_hash).map_err(|_| AppError::Internal)?;
            Ok(Argon2::default().verify_password(password.as_bytes(), &parsed_hash).is_ok())
        })
        .await
        .map_err(|_| AppError::Internal)?
    }
}

fn normalize_username(username: &str) -> String {
    username.trim().to_lowercase()
}

/// Equality without early exit: the comparison touches every byte of the
/// shorter input regardless of where the first mismatch is.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut diff = 0u8;
    for (x, y) in a.iter().zip(b) {
        diff |= x ^ y;
    }
    diff == 0
}
