use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Admin,
    User,
}

impl Role {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::User => "user",
        }
    }

    #[must_use]
    pub fn from_db(label: &str) -> Self {
        if label.eq_ignore_ascii_case("admin") { Self::Admin } else { Self::User }
    }
}

/// Stored account. `username` is the lowercased canonical form; either
/// `password_hash` (current accounts) or `legacy_password` (pre-hashing
/// accounts) is present, never both for new writes.
#[derive(Debug, Clone)]
pub struct UserRecord {
    pub id: Uuid,
    pub username: String,
    pub display_name: String,
    pub role: Option<Role>,
    pub password_hash: Option<String>,
    pub legacy_password: Option<String>,
    pub created_at: OffsetDateTime,
}

impl UserRecord {
    /// Effective role: the stored one, else the literal username "admin"
    /// falls back to admin. A compatibility rule from the first frontend,
    /// not a security boundary.
    #[must_use]
    pub fn derived_role(&self) -> Role {
        self.role.unwrap_or_else(|| {
            if self.username == "admin" { Role::Admin } else { Role::User }
        })
    }
}
