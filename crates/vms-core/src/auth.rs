//! Demo login gate.
//!
//! A fixed credential table mapping email to password and role. This is not
//! an authentication system: there is no session expiry and no server-side
//! enforcement, and the resulting role is stored by the client. The
//! [`Authenticator`] trait is the seam where a real identity provider would
//! plug in.

use serde::{Deserialize, Serialize};

use crate::error::AuthError;

/// What a signed-in account may do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    User,
}

impl Role {
    /// Where the client goes after signing in.
    #[must_use]
    pub fn landing_path(self) -> &'static str {
        match self {
            Self::Admin => "/admin/hero",
            Self::User => "/",
        }
    }

    /// Stable string form, as stored by clients.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::User => "user",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Email and password as submitted.
#[derive(Debug, Clone, Deserialize)]
pub struct Credentials {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// The outcome of a successful sign-in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Normalized (trimmed, lowercased) email.
    pub email: String,
    pub role: Role,
}

impl Session {
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// Verifies credentials and yields a session.
#[async_trait::async_trait]
pub trait Authenticator: Send + Sync + 'static {
    /// Check `credentials`.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::MissingFields`] if email or password is blank and
    /// [`AuthError::InvalidCredentials`] if they do not match an account.
    async fn authenticate(&self, credentials: &Credentials) -> Result<Session, AuthError>;
}

struct Account {
    email: &'static str,
    password: &'static str,
    role: Role,
}

/// The in-source demo account table.
const DEMO_ACCOUNTS: &[Account] = &[
    Account {
        email: "admin@vms.com",
        password: "admin123",
        role: Role::Admin,
    },
    Account {
        email: "user@vms.com",
        password: "user123",
        role: Role::User,
    },
];

/// [`Authenticator`] over the fixed demo account table.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticCredentials;

#[async_trait::async_trait]
impl Authenticator for StaticCredentials {
    async fn authenticate(&self, credentials: &Credentials) -> Result<Session, AuthError> {
        let email = credentials.email.trim().to_lowercase();
        if email.is_empty() || credentials.password.is_empty() {
            return Err(AuthError::MissingFields);
        }

        let account = DEMO_ACCOUNTS
            .iter()
            .find(|a| a.email == email && a.password == credentials.password)
            .ok_or(AuthError::InvalidCredentials)?;

        Ok(Session {
            email,
            role: account.role,
        })
    }
}
