//! Registration, login and the "who is calling" lookup used by protected routes.

use std::sync::Arc;

use crate::domain::{NewUser, User};
use crate::error::{DomainError, RepoError};
use crate::ports::{
    AuthError, BaseRepository, PasswordService, TokenKind, TokenService, UserRepository,
};

/// Input for [`AccountService::register`]; validated by the caller.
#[derive(Debug, Clone)]
pub struct Registration {
    pub email: String,
    pub password: String,
    pub phone: Option<String>,
    pub name: Option<String>,
}

/// Access and refresh tokens issued together.
#[derive(Debug, Clone)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    /// Lifetime of the access token in seconds.
    pub expires_in: i64,
}

pub struct AccountService {
    users: Arc<dyn UserRepository>,
    passwords: Arc<dyn PasswordService>,
    tokens: Arc<dyn TokenService>,
}

impl AccountService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        passwords: Arc<dyn PasswordService>,
        tokens: Arc<dyn TokenService>,
    ) -> Self {
        Self {
            users,
            passwords,
            tokens,
        }
    }

    /// Create an account. Fails with [`DomainError::Duplicate`] if the email is taken.
    pub async fn register(&self, registration: Registration) -> Result<User, DomainError> {
        if self.users.find_by_email(&registration.email).await?.is_some() {
            return Err(DomainError::Duplicate("Email already registered".to_string()));
        }

        let password_hash = self
            .passwords
            .hash(&registration.password)
            .map_err(internal)?;

        let draft = NewUser::new(
            registration.email,
            password_hash,
            registration.phone,
            registration.name,
        );

        // A concurrent registration can still win the unique index.
        let user = self.users.create(draft).await.map_err(|e| match e {
            RepoError::Constraint(_) => DomainError::Duplicate("Email already registered".to_string()),
            other => other.into(),
        })?;

        tracing::info!(user_id = user.id, "User registered");
        Ok(user)
    }

    /// Check credentials and issue a token pair.
    ///
    /// Unknown email and wrong password are indistinguishable to the caller.
    pub async fn login(&self, email: &str, password: &str) -> Result<TokenPair, DomainError> {
        let user = self
            .users
            .find_by_email(email)
            .await?
            .ok_or(DomainError::Unauthorized)?;

        let valid = self
            .passwords
            .verify(password, &user.password_hash)
            .map_err(internal)?;
        if !valid {
            tracing::debug!(user_id = user.id, "Rejected login with wrong password");
            return Err(DomainError::Unauthorized);
        }

        self.issue_pair(&user)
    }

    /// Trade a refresh token for a new pair. The user must still exist.
    pub async fn refresh(&self, refresh_token: &str) -> Result<TokenPair, DomainError> {
        let claims = self
            .tokens
            .validate_token(refresh_token, TokenKind::Refresh)
            .map_err(|e| {
                tracing::debug!(error = %e, "Rejected refresh token");
                DomainError::Unauthorized
            })?;

        let user = self.current_user(claims.user_id).await?;
        self.issue_pair(&user)
    }

    /// Resolve the authenticated caller. A token for a vanished user is unauthorized.
    pub async fn current_user(&self, user_id: i32) -> Result<User, DomainError> {
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or(DomainError::Unauthorized)
    }

    fn issue_pair(&self, user: &User) -> Result<TokenPair, DomainError> {
        let access_token = self
            .tokens
            .generate_token(user.id, &user.email, TokenKind::Access)
            .map_err(internal)?;
        let refresh_token = self
            .tokens
            .generate_token(user.id, &user.email, TokenKind::Refresh)
            .map_err(internal)?;

        Ok(TokenPair {
            access_token,
            refresh_token,
            expires_in: self.tokens.expiration_seconds(TokenKind::Access),
        })
    }
}

fn internal(err: AuthError) -> DomainError {
    DomainError::Internal(err.to_string())
}
