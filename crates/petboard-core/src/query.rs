//! Ad listing queries: attribute filters plus geographic or region narrowing.
//!
//! A listing runs in two steps. The attribute filter is pushed down to the store,
//! which returns at most [`LISTING_LIMIT`] newest matches. The [`LocationScope`] then
//! narrows those candidates in memory.

use crate::domain::Ad;
use crate::error::DomainError;
use crate::geo::GeoPoint;

/// Maximum number of ads a listing ever returns.
pub const LISTING_LIMIT: u64 = 50;

/// Sentinel `geoloc` value that selects the region branch.
pub const ANY_GEOLOC: &str = "any";

/// Ad columns that accept an equality filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdField {
    Status,
    Type,
    Breed,
    Size,
    Danger,
}

/// Optional equality filters; unset fields impose no constraint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdFilter {
    pub status: Option<String>,
    pub pet_type: Option<String>,
    pub breed: Option<String>,
    pub size: Option<String>,
    pub danger: Option<String>,
}

impl AdFilter {
    /// The filter as an ordered list of (field, value) pairs, one per set field.
    ///
    /// Stores fold these into a conjunction.
    pub fn predicates(&self) -> Vec<(AdField, &str)> {
        [
            (AdField::Status, &self.status),
            (AdField::Type, &self.pet_type),
            (AdField::Breed, &self.breed),
            (AdField::Size, &self.size),
            (AdField::Danger, &self.danger),
        ]
        .into_iter()
        .filter_map(|(field, value)| value.as_deref().map(|v| (field, v)))
        .collect()
    }
}

/// Second-step narrowing of the attribute-matched candidates.
#[derive(Debug, Clone, PartialEq)]
pub enum LocationScope {
    /// Ads with a parseable geolocation, optionally within `radius_km` of `origin`.
    Near {
        origin: GeoPoint,
        radius_km: Option<f64>,
    },
    /// Ads whose location contains the (lowercased) needle.
    Region(String),
    /// `geoloc` was "any" and no region was given: nothing matches.
    Nowhere,
}

impl LocationScope {
    /// Whether `ad` survives the narrowing step.
    ///
    /// Ads with an empty or malformed geolocation never match [`LocationScope::Near`].
    pub fn admits(&self, ad: &Ad) -> bool {
        match self {
            LocationScope::Near { origin, radius_km } => {
                let Some(raw) = ad.geo_location.as_deref().filter(|s| !s.trim().is_empty()) else {
                    return false;
                };
                let Ok(point) = raw.parse::<GeoPoint>() else {
                    tracing::debug!(ad_id = ad.id, geo_location = %raw, "Skipping ad with malformed geolocation");
                    return false;
                };
                radius_km.is_none_or(|radius| origin.within(&point, radius))
            }
            LocationScope::Region(needle) => ad.location.to_lowercase().contains(needle.as_str()),
            LocationScope::Nowhere => false,
        }
    }
}

/// A fully parsed listing request.
#[derive(Debug, Clone, PartialEq)]
pub struct AdQuery {
    pub filter: AdFilter,
    pub scope: LocationScope,
}

/// Raw listing parameters, as they arrive from a caller.
#[derive(Debug, Clone, Default)]
pub struct AdQueryParams {
    pub status: Option<String>,
    pub pet_type: Option<String>,
    pub breed: Option<String>,
    pub size: Option<String>,
    pub danger: Option<String>,
    pub region: Option<String>,
    pub geoloc: Option<String>,
    pub radius_km: Option<f64>,
}

impl TryFrom<AdQueryParams> for AdQuery {
    type Error = DomainError;

    /// Blank strings count as unset; a missing or blank `geoloc` means "any".
    fn try_from(params: AdQueryParams) -> Result<Self, Self::Error> {
        let filter = AdFilter {
            status: non_blank(params.status),
            pet_type: non_blank(params.pet_type),
            breed: non_blank(params.breed),
            size: non_blank(params.size),
            danger: non_blank(params.danger),
        };

        let scope = match non_blank(params.geoloc) {
            Some(geoloc) if geoloc != ANY_GEOLOC => {
                let origin = geoloc
                    .parse::<GeoPoint>()
                    .map_err(|_| DomainError::Validation("invalid geoloc format".to_string()))?;
                LocationScope::Near {
                    origin,
                    radius_km: params.radius_km,
                }
            }
            _ => match non_blank(params.region) {
                Some(region) => LocationScope::Region(region.to_lowercase()),
                None => LocationScope::Nowhere,
            },
        };

        Ok(Self { filter, scope })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
