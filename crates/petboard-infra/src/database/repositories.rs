//! Repository implementations over SeaORM.

use async_trait::async_trait;
use sea_orm::{ColumnTrait, Condition, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Select};

use petboard_core::domain::{Ad, User};
use petboard_core::error::RepoError;
use petboard_core::ports::{AdRepository, UserRepository};
use petboard_core::query::AdFilter;

use super::base::{SeaOrmRepository, classify};
use super::entity::ad::{self, Entity as AdEntity};
use super::entity::user::{self, Entity as UserEntity};

/// User repository.
pub type SeaOrmUserRepository = SeaOrmRepository<UserEntity>;

/// Ad repository.
pub type SeaOrmAdRepository = SeaOrmRepository<AdEntity>;

/// Mask the local part of an email so it can go into logs.
fn mask_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) => match local.chars().next() {
            Some(first) if local.chars().count() > 1 => format!("{first}***@{domain}"),
            _ => format!("***@{domain}"),
        },
        None => "***".to_string(),
    }
}

/// Conjunction of one equality predicate per set filter field.
pub(crate) fn filter_condition(filter: &AdFilter) -> Condition {
    filter
        .predicates()
        .into_iter()
        .fold(Condition::all(), |cond, (field, value)| {
            cond.add(ad::Column::for_field(field).eq(value))
        })
}

/// Newest ads matching `filter`, newest first with ties broken by id, at most `limit` rows.
pub(crate) fn recent_query(filter: &AdFilter, limit: u64) -> Select<AdEntity> {
    AdEntity::find()
        .filter(filter_condition(filter))
        .order_by_desc(ad::Column::CreatedAt)
        .order_by_desc(ad::Column::Id)
        .limit(limit)
}

#[async_trait]
impl UserRepository for SeaOrmUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        tracing::debug!(user_email = %mask_email(email), "Finding user by email");

        let result = UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(classify)?;

        Ok(result.map(Into::into))
    }
}

#[async_trait]
impl AdRepository for SeaOrmAdRepository {
    async fn find_recent(&self, filter: &AdFilter, limit: u64) -> Result<Vec<Ad>, RepoError> {
        tracing::debug!(?filter, limit, "Querying recent ads");

        let result = recent_query(filter, limit)
            .all(&self.db)
            .await
            .map_err(classify)?;

        Ok(result.into_iter().map(Into::into).collect())
    }
}
