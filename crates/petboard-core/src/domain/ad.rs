use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// Textual format of the user-supplied sighting/loss time, e.g. `05.03.2024 18:30:00`.
pub const AD_TIME_FORMAT: &str = "%d.%m.%Y %H:%M:%S";

/// Ad entity - a single lost/found pet report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ad {
    pub id: i32,
    /// Owner; fixed at creation.
    pub user_id: i32,
    /// "lost" / "found".
    pub status: String,
    /// Species.
    pub pet_type: String,
    pub breed: Option<String>,
    pub color: Option<String>,
    pub size: Option<String>,
    pub danger: Option<String>,
    /// Free-text distinguishing features.
    pub features: Option<String>,
    pub nickname: Option<String>,
    /// Free-text location, matched by the region filter.
    pub location: String,
    /// "latitude,longitude"; may be missing or malformed.
    pub geo_location: Option<String>,
    /// When the pet was lost or seen.
    pub time: NaiveDateTime,
    pub created_at: DateTime<Utc>,
    pub contact_name: Option<String>,
    pub contact_phone: Option<String>,
    pub contact_email: Option<String>,
    pub extras: Option<serde_json::Value>,
}

/// An ad that has passed validation but has no identifier yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewAd {
    pub user_id: i32,
    pub status: String,
    pub pet_type: String,
    pub breed: Option<String>,
    pub color: Option<String>,
    pub size: Option<String>,
    pub danger: Option<String>,
    pub features: Option<String>,
    pub nickname: Option<String>,
    pub location: String,
    pub geo_location: Option<String>,
    pub time: NaiveDateTime,
    pub created_at: DateTime<Utc>,
    pub contact_name: Option<String>,
    pub contact_phone: Option<String>,
    pub contact_email: Option<String>,
    pub extras: Option<serde_json::Value>,
}

/// Raw ad payload as submitted by a client, before validation.
///
/// `time` is kept as text; [`AdSubmission::into_new_ad`] parses it with [`AD_TIME_FORMAT`].
#[derive(Debug, Clone, Default)]
pub struct AdSubmission {
    pub status: String,
    pub pet_type: String,
    pub breed: Option<String>,
    pub color: Option<String>,
    pub size: Option<String>,
    pub danger: Option<String>,
    pub features: Option<String>,
    pub nickname: Option<String>,
    pub location: String,
    pub geo_location: Option<String>,
    pub time: String,
    pub contact_name: Option<String>,
    pub contact_phone: Option<String>,
    pub contact_email: Option<String>,
    pub extras: Option<serde_json::Value>,
}

impl AdSubmission {
    /// Parse the submitted time and stamp the draft with its owner and creation time.
    ///
    /// Returns `None` when `time` does not match [`AD_TIME_FORMAT`] or names an
    /// impossible calendar date.
    pub fn into_new_ad(self, user_id: i32, created_at: DateTime<Utc>) -> Option<NewAd> {
        let time = NaiveDateTime::parse_from_str(self.time.trim(), AD_TIME_FORMAT).ok()?;

        Some(NewAd {
            user_id,
            status: self.status,
            pet_type: self.pet_type,
            breed: self.breed,
            color: self.color,
            size: self.size,
            danger: self.danger,
            features: self.features,
            nickname: self.nickname,
            location: self.location,
            geo_location: self.geo_location,
            time,
            created_at,
            contact_name: self.contact_name,
            contact_phone: self.contact_phone,
            contact_email: self.contact_email,
            extras: self.extras,
        })
    }
}
