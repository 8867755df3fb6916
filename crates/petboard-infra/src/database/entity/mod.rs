//! SeaORM entities.

pub mod ad;
pub mod user;
