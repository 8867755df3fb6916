//! Domain entities - the core business objects.

mod ad;
mod user;

pub use ad::{AD_TIME_FORMAT, Ad, AdSubmission, NewAd};
pub use user::{NewUser, User};
