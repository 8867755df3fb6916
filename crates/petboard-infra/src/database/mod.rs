//! Database connection management and repositories.

mod base;
mod connections;
pub mod entity;
mod repositories;

pub use base::SeaOrmRepository;
pub use connections::{DatabaseConfig, connect};
pub use repositories::{SeaOrmAdRepository, SeaOrmUserRepository};
