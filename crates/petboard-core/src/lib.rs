//! # Petboard Core
//!
//! The domain layer of Petboard, a lost/found pet classifieds backend.
//! This crate contains pure business logic with zero infrastructure dependencies:
//! entities, the geo filter, ad query composition and the services built on the ports.

pub mod domain;
pub mod error;
pub mod geo;
pub mod ports;
pub mod query;
pub mod services;

pub use error::DomainError;
