//! # Petboard Shared
//!
//! Wire types shared by the server and its clients.
//! Nothing here depends on the domain crates, so a frontend can compile it as-is.

pub mod dto;
pub mod response;

pub use response::{AdCreatedResponse, AdListResponse, ErrorResponse};
