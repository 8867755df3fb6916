//! Use-case services orchestrating the ports.

mod account_service;
mod ad_service;

#[cfg(test)]
mod test_support;

pub use account_service::{AccountService, Registration, TokenPair};
pub use ad_service::AdService;
