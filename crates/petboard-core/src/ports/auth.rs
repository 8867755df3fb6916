//! Authentication and authorization ports.

use std::fmt;

/// Which of the two token flavours a JWT is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Short-lived bearer token accepted by protected routes.
    Access,
    /// Long-lived token only good for minting a new pair.
    Refresh,
}

impl TokenKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenKind::Access => "access",
            TokenKind::Refresh => "refresh",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Claims stored in JWT tokens.
#[derive(Debug, Clone)]
pub struct TokenClaims {
    pub user_id: i32,
    pub email: String,
    pub kind: TokenKind,
    pub exp: i64,
}

/// Token service trait for JWT operations.
pub trait TokenService: Send + Sync {
    /// Issue a token of the given kind for a user.
    fn generate_token(&self, user_id: i32, email: &str, kind: TokenKind) -> Result<String, AuthError>;

    /// Validate and decode a token, rejecting tokens of any other kind.
    fn validate_token(&self, token: &str, expected: TokenKind) -> Result<TokenClaims, AuthError>;

    /// Lifetime of freshly issued tokens of `kind`, in seconds.
    fn expiration_seconds(&self, kind: TokenKind) -> i64;
}

/// Password hashing service.
pub trait PasswordService: Send + Sync {
    /// Hash a plain text password.
    fn hash(&self, password: &str) -> Result<String, AuthError>;

    /// Verify a password against a hash.
    fn verify(&self, password: &str, hash: &str) -> Result<bool, AuthError>;
}

/// Authentication errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Wrong token type: expected {expected}")]
    WrongTokenKind { expected: TokenKind },

    #[error("Missing authorization header")]
    MissingAuth,

    #[error("Hashing error: {0}")]
    HashingError(String),
}
