use async_trait::async_trait;

use crate::domain::{Ad, NewAd, NewUser, User};
use crate::error::RepoError;
use crate::query::AdFilter;

/// Generic repository trait for entities whose identifier is assigned by the store.
///
/// `T` is the stored entity, `N` the draft it is created from.
#[async_trait]
pub trait BaseRepository<T, N, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Insert a draft and return the stored entity, identifier included.
    async fn create(&self, draft: N) -> Result<T, RepoError>;
}

/// User repository with domain-specific methods.
#[async_trait]
pub trait UserRepository: BaseRepository<User, NewUser, i32> {
    /// Find a user by their email address.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError>;
}

/// Ad repository.
#[async_trait]
pub trait AdRepository: BaseRepository<Ad, NewAd, i32> {
    /// Newest ads matching every predicate of `filter`, newest first, at most `limit` rows.
    async fn find_recent(&self, filter: &AdFilter, limit: u64) -> Result<Vec<Ad>, RepoError>;
}
