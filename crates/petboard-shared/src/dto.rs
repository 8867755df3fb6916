//! Data Transfer Objects - request/response types for the API.

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// Request to register a new user.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterUserRequest {
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    #[validate(length(min = 8, max = 72, message = "Password must be 8 to 72 characters"))]
    pub password: String,
    #[validate(custom(function = "validate_phone"))]
    pub phone: Option<String>,
    #[validate(length(min = 1, max = 100, message = "Name must be 1 to 100 characters"))]
    pub name: Option<String>,
}

/// Loose E.164: optional `+`, no leading zero, 7 to 15 digits.
fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    let digits = phone.strip_prefix('+').unwrap_or(phone);
    let well_formed = (7..=15).contains(&digits.len())
        && digits.bytes().all(|b| b.is_ascii_digit())
        && !digits.starts_with('0');

    if well_formed {
        Ok(())
    } else {
        Err(ValidationError::new("phone").with_message("Invalid phone number".into()))
    }
}

/// Request to login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Request to exchange a refresh token for a new token pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Response containing a user's public information.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: i32,
    pub email: String,
    pub phone: Option<String>,
    pub name: Option<String>,
    pub created_at: String,
}

/// Response containing authentication tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    /// Seconds until the access token expires.
    pub expires_in: u64,
}

/// Query string of `GET /ads`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AdSearchParams {
    pub status: Option<String>,
    #[serde(rename = "type")]
    pub pet_type: Option<String>,
    pub breed: Option<String>,
    pub size: Option<String>,
    pub danger: Option<String>,
    /// Case-insensitive substring of the ad location; used when `geoloc` is "any".
    pub region: Option<String>,
    /// "lat,lon" or "any" (the default).
    pub geoloc: Option<String>,
    /// Kilometers around `geoloc`.
    pub radius: Option<u32>,
}

/// Body of `POST /ads`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAdRequest {
    pub status: String,
    #[serde(rename = "type")]
    pub pet_type: String,
    pub breed: Option<String>,
    pub color: Option<String>,
    pub size: Option<String>,
    pub danger: Option<String>,
    pub features: Option<String>,
    pub nickname: Option<String>,
    pub location: String,
    #[serde(rename = "geoLocation")]
    pub geo_location: Option<String>,
    /// "DD.MM.YYYY HH:MM:SS".
    pub time: String,
    #[serde(rename = "name")]
    pub contact_name: Option<String>,
    #[serde(rename = "phone")]
    pub contact_phone: Option<String>,
    #[serde(rename = "email")]
    pub contact_email: Option<String>,
    pub extras: Option<serde_json::Value>,
}

/// Public view of an ad. The owner's id is not exposed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdView {
    pub id: i32,
    pub status: String,
    #[serde(rename = "type")]
    pub pet_type: String,
    pub breed: Option<String>,
    pub color: Option<String>,
    pub size: Option<String>,
    pub danger: Option<String>,
    pub features: Option<String>,
    pub nickname: Option<String>,
    pub location: String,
    #[serde(rename = "geoLocation")]
    pub geo_location: Option<String>,
    pub time: String,
    pub created_at: String,
    #[serde(rename = "name")]
    pub contact_name: Option<String>,
    #[serde(rename = "phone")]
    pub contact_phone: Option<String>,
    #[serde(rename = "email")]
    pub contact_email: Option<String>,
    pub extras: Option<serde_json::Value>,
}
