//! Ad listing and submission.

use std::sync::Arc;

use chrono::Utc;

use crate::domain::{Ad, AdSubmission, User};
use crate::error::DomainError;
use crate::ports::{AdRepository, BaseRepository};
use crate::query::{AdQuery, LISTING_LIMIT};

/// Lists and creates ads on top of an [`AdRepository`].
pub struct AdService {
    ads: Arc<dyn AdRepository>,
}

impl AdService {
    pub fn new(ads: Arc<dyn AdRepository>) -> Self {
        Self { ads }
    }

    /// Newest ads matching `query`, newest first, never more than [`LISTING_LIMIT`].
    ///
    /// The attribute filter and the cap run in the store; location narrowing runs on
    /// the capped candidates, so the result may hold fewer than the cap even when more
    /// matching ads exist.
    pub async fn list(&self, query: &AdQuery) -> Result<Vec<Ad>, DomainError> {
        let candidates = self.ads.find_recent(&query.filter, LISTING_LIMIT).await?;
        let fetched = candidates.len();

        let ads: Vec<Ad> = candidates
            .into_iter()
            .filter(|ad| query.scope.admits(ad))
            .collect();

        tracing::debug!(fetched, returned = ads.len(), "Listed ads");
        Ok(ads)
    }

    /// Validate `submission` and store it as a new ad owned by `owner`.
    ///
    /// Returns the new ad's identifier. Nothing is written when the time is malformed.
    pub async fn submit(&self, owner: &User, submission: AdSubmission) -> Result<i32, DomainError> {
        let draft = submission
            .into_new_ad(owner.id, Utc::now())
            .ok_or_else(|| DomainError::Validation("invalid time format".to_string()))?;

        let ad = self.ads.create(draft).await?;
        tracing::info!(ad_id = ad.id, user_id = owner.id, status = %ad.status, "Ad created");

        Ok(ad.id)
    }
}
