//! Credential checks and token authentication for the Spendlog backend.
//!
//! The [`Authenticator`] owns the two halves of the auth story: verifying
//! a password at login and resolving a bearer token back to its user on
//! every authenticated request. Tokens are stateless, so nothing is
//! persisted per login.

pub mod password;
pub mod token;

use chrono::{DateTime, Utc};
use spendlog_config::AuthConfig;
use spendlog_database::{StoreError, User, UserRepository};
use sqlx::SqlitePool;
use thiserror::Error;
use tracing::debug;

pub use password::{hash_password, verify_password};
pub use token::{Claims, IssuedToken, TokenError, TokenService};

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("token does not belong to a known user")]
    UnknownUser,
    #[error(transparent)]
    Token(#[from] TokenError),
    #[error("storage error: {0}")]
    Store(#[from] StoreError),
    #[error("password hashing failed: {0}")]
    PasswordHash(#[from] argon2::password_hash::Error),
}

/// A successful login: the signed token plus the user it belongs to.
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub token: String,
    pub user: User,
    pub expires_at: DateTime<Utc>,
}

#[derive(Clone)]
pub struct Authenticator {
    users: UserRepository,
    tokens: TokenService,
}

impl Authenticator {
    pub fn new(pool: SqlitePool, config: AuthConfig) -> Self {
        Self {
            users: UserRepository::new(pool),
            tokens: TokenService::new(&config.secret, config.token_ttl_seconds),
        }
    }

    /// Check `password` against the stored hash for `email` and sign a
    /// token on success.
    ///
    /// Unknown emails and wrong passwords both surface as
    /// [`AuthError::InvalidCredentials`], so a caller cannot probe which
    /// addresses are registered.
    pub async fn login_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthSession, AuthError> {
        let user = self
            .users
            .find_by_email(email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if !password::verify_password(password, &user.password_hash)? {
            return Err(AuthError::InvalidCredentials);
        }

        let issued = self.tokens.issue(user.id)?;
        debug!(user_id = user.id, "issued access token");

        Ok(AuthSession {
            token: issued.token,
            expires_at: issued.expires_at,
            user,
        })
    }

    /// Resolve a bearer token to the user it was issued for.
    ///
    /// A token that verifies but names a user who has since been deleted
    /// is rejected with [`AuthError::UnknownUser`].
    pub async fn authenticate_token(&self, token: &str) -> Result<User, AuthError> {
        let user_id = self.tokens.verify(token)?;

        self.users
            .find_by_id(user_id)
            .await?
            .ok_or(AuthError::UnknownUser)
    }
}
