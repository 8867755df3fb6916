//! # Petboard Infrastructure
//!
//! Concrete implementations of the ports defined in `petboard-core`:
//! SeaORM-backed repositories (PostgreSQL or SQLite, picked by the connection URL)
//! and JWT + Argon2 authentication.

pub mod auth;
pub mod database;

pub use auth::{Argon2PasswordService, JwtConfig, JwtTokenService};
pub use database::{DatabaseConfig, SeaOrmAdRepository, SeaOrmUserRepository};
