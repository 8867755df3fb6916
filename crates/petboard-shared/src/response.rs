//! Response envelopes: `{success, ...}` for the ad routes, RFC 7807 for everything else.

use serde::{Deserialize, Serialize};

use crate::dto::AdView;

/// Response of `GET /ads`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdListResponse {
    pub success: bool,
    pub ads: Vec<AdView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl AdListResponse {
    pub fn ok(ads: Vec<AdView>) -> Self {
        Self {
            success: true,
            ads,
            message: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            ads: Vec::new(),
            message: Some(message.into()),
        }
    }
}

/// Response of `POST /ads`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdCreatedResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ad_id: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl AdCreatedResponse {
    pub fn ok(ad_id: i32) -> Self {
        Self {
            success: true,
            ad_id: Some(ad_id),
            message: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            ad_id: None,
            message: Some(message.into()),
        }
    }
}

/// RFC 7807 Problem Details for HTTP APIs.
///
/// See: https://datatracker.ietf.org/doc/html/rfc7807
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// A URI reference that identifies the problem type.
    #[serde(rename = "type")]
    pub error_type: String,

    /// A short, human-readable summary of the problem type.
    pub title: String,

    /// The HTTP status code.
    pub status: u16,

    /// A human-readable explanation specific to this occurrence.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl ErrorResponse {
    pub fn new(status: u16, title: impl Into<String>) -> Self {
        Self {
            error_type: "about:blank".to_string(),
            title: title.into(),
            status,
            detail: None,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    // Common error constructors
    pub fn bad_request(detail: impl Into<String>) -> Self {
        Self::new(400, "Bad Request").with_detail(detail)
    }

    pub fn unauthorized() -> Self {
        Self::new(401, "Unauthorized")
    }

    pub fn not_found(detail: impl Into<String>) -> Self {
        Self::new(404, "Not Found").with_detail(detail)
    }

    pub fn internal_error() -> Self {
        Self::new(500, "Internal Server Error")
    }
}
