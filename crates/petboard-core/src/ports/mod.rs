//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod auth;
mod repository;

pub use auth::{AuthError, PasswordService, TokenClaims, TokenKind, TokenService};
pub use repository::{AdRepository, BaseRepository, UserRepository};
