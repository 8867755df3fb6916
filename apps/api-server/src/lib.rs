//! # Petboard API Server
//!
//! Actix-web application for lost and found pet ads. `main.rs` only reads
//! configuration and binds the listener; state wiring and routes live here so the
//! integration tests mount exactly what production serves.

pub mod config;
pub mod handlers;
pub mod middleware;
pub mod observability;
pub mod state;
pub mod telemetry;

pub use config::AppConfig;
pub use state::AppState;
