//! Great-circle distance and the "lat,lon" coordinate format.

use std::str::FromStr;

use thiserror::Error;

/// Mean Earth radius used by the haversine formula.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Surface distance in kilometers between two points given in degrees.
///
/// No range checks: out-of-range latitudes or longitudes are evaluated as-is.
pub fn haversine_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lon = (lon2 - lon1).to_radians();

    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    // Rounding can push `a` a hair past 1 for antipodal points.
    let c = 2.0 * a.sqrt().min(1.0).asin();

    EARTH_RADIUS_KM * c
}

/// A latitude/longitude pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Distance to `other` in kilometers.
    pub fn distance_km(&self, other: &GeoPoint) -> f64 {
        haversine_km(self.lat, self.lon, other.lat, other.lon)
    }

    /// Whether `other` lies within `radius_km` (inclusive).
    pub fn within(&self, other: &GeoPoint, radius_km: f64) -> bool {
        self.distance_km(other) <= radius_km
    }
}

/// Error returned when a "lat,lon" string cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("expected \"latitude,longitude\", got {0:?}")]
pub struct GeoParseError(pub String);

impl FromStr for GeoPoint {
    type Err = GeoParseError;

    /// Parses exactly two comma-separated finite numbers, whitespace around each allowed.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || GeoParseError(s.to_string());

        let (lat, lon) = s.split_once(',').ok_or_else(invalid)?;
        let lat: f64 = lat.trim().parse().map_err(|_| invalid())?;
        let lon: f64 = lon.trim().parse().map_err(|_| invalid())?;

        if !lat.is_finite() || !lon.is_finite() {
            return Err(invalid());
        }

        Ok(Self { lat, lon })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MOSCOW: GeoPoint = GeoPoint { lat: 55.7558, lon: 37.6173 };
    const SAINT_PETERSBURG: GeoPoint = GeoPoint { lat: 59.9343, lon: 30.3351 };

    #[test]
    fn test_distance_is_symmetric() {
        let there = MOSCOW.distance_km(&SAINT_PETERSBURG);
        let back = SAINT_PETERSBURG.distance_km(&MOSCOW);
        assert!((there - back).abs() < 1e-9);
    }

    #[test]
    fn test_distance_to_self_is_zero() {
        assert!(MOSCOW.distance_km(&MOSCOW).abs() < 1e-9);
        assert!(haversine_km(-33.86, 151.2, -33.86, 151.2).abs() < 1e-9);
    }

    #[test]
    fn test_known_distance() {
        // Moscow to Saint Petersburg is roughly 634 km as the crow flies.
        let d = MOSCOW.distance_km(&SAINT_PETERSBURG);
        assert!((d - 634.0).abs() < 5.0, "got {d}");
    }

    #[test]
    fn test_antipodes_are_half_circumference() {
        let d = haversine_km(0.0, 0.0, 0.0, 180.0);
        assert!((d - std::f64::consts::PI * EARTH_RADIUS_KM).abs() < 1e-6);
    }

    #[test]
    fn test_out_of_range_input_is_evaluated() {
        let d = haversine_km(95.0, 10.0, -100.0, 200.0);
        assert!(d.is_finite());
        assert!(d >= 0.0);
    }

    #[test]
    fn test_within_is_inclusive() {
        let d = MOSCOW.distance_km(&SAINT_PETERSBURG);
        assert!(MOSCOW.within(&SAINT_PETERSBURG, d));
        assert!(!MOSCOW.within(&SAINT_PETERSBURG, d - 1.0));
    }

    #[test]
    fn test_parse_valid() {
        let p: GeoPoint = "55.75,37.61".parse().unwrap();
        assert_eq!(p, GeoPoint::new(55.75, 37.61));

        let p: GeoPoint = " -12.5 , 130 ".parse().unwrap();
        assert_eq!(p, GeoPoint::new(-12.5, 130.0));
    }

    #[test]
    fn test_parse_invalid() {
        for raw in ["not-a-number", "55.75", "55.75,", ",37.61", "1,2,3", "NaN,1", "inf,0", ""] {
            assert!(raw.parse::<GeoPoint>().is_err(), "{raw:?} should not parse");
        }
    }
}
