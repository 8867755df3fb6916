//! Ad listing and submission.
//!
//! Both routes answer with a `{success, ...}` envelope; failures keep the envelope and
//! carry a short message, while internal details only reach the log.

use actix_web::{HttpResponse, error::InternalError, http::StatusCode, web};

use petboard_core::DomainError;
use petboard_core::domain::{AD_TIME_FORMAT, Ad, AdSubmission};
use petboard_core::query::{AdQuery, AdQueryParams};
use petboard_shared::dto::{AdSearchParams, AdView, CreateAdRequest};
use petboard_shared::{AdCreatedResponse, AdListResponse};

use crate::middleware::auth::Identity;
use crate::state::AppState;

const SERVER_ERROR: &str = "server error";
const INVALID_QUERY: &str = "invalid query parameters";
const INVALID_BODY: &str = "invalid request body";

/// Unparseable query strings (e.g. a non-integer `radius`) still get the list envelope.
pub(super) fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, _req| {
        tracing::debug!(error = %err, "Rejected ad search query");
        InternalError::from_response(
            err,
            HttpResponse::BadRequest().json(AdListResponse::failure(INVALID_QUERY)),
        )
        .into()
    })
}

/// Malformed or incomplete ad bodies still get the creation envelope.
pub(super) fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        tracing::debug!(error = %err, "Rejected ad body");
        InternalError::from_response(
            err,
            HttpResponse::BadRequest().json(AdCreatedResponse::failure(INVALID_BODY)),
        )
        .into()
    })
}

/// GET /ads
pub async fn list_ads(
    state: web::Data<AppState>,
    params: web::Query<AdSearchParams>,
) -> HttpResponse {
    let query = match AdQuery::try_from(query_params(params.into_inner())) {
        Ok(query) => query,
        Err(err) => {
            let (status, message) = failure(err);
            return HttpResponse::build(status).json(AdListResponse::failure(message));
        }
    };

    match state.ads.list(&query).await {
        Ok(ads) => HttpResponse::Ok().json(AdListResponse::ok(ads.into_iter().map(ad_view).collect())),
        Err(err) => {
            let (status, message) = failure(err);
            HttpResponse::build(status).json(AdListResponse::failure(message))
        }
    }
}

/// POST /ads - Protected route
pub async fn create_ad(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<CreateAdRequest>,
) -> HttpResponse {
    let result = async {
        let owner = state.accounts.current_user(identity.user_id).await?;
        state.ads.submit(&owner, submission(body.into_inner())).await
    }
    .await;

    match result {
        Ok(ad_id) => HttpResponse::Created().json(AdCreatedResponse::ok(ad_id)),
        Err(err) => {
            let (status, message) = failure(err);
            HttpResponse::build(status).json(AdCreatedResponse::failure(message))
        }
    }
}

/// Status and caller-facing message for a failed ad request.
fn failure(err: DomainError) -> (StatusCode, String) {
    match err {
        DomainError::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
        DomainError::Unauthorized => (StatusCode::UNAUTHORIZED, "unauthorized".to_string()),
        other => {
            tracing::error!(error = %other, "Ad request failed");
            (StatusCode::INTERNAL_SERVER_ERROR, SERVER_ERROR.to_string())
        }
    }
}

fn query_params(params: AdSearchParams) -> AdQueryParams {
    AdQueryParams {
        status: params.status,
        pet_type: params.pet_type,
        breed: params.breed,
        size: params.size,
        danger: params.danger,
        region: params.region,
        geoloc: params.geoloc,
        radius_km: params.radius.map(f64::from),
    }
}

fn submission(req: CreateAdRequest) -> AdSubmission {
    AdSubmission {
        status: req.status,
        pet_type: req.pet_type,
        breed: req.breed,
        color: req.color,
        size: req.size,
        danger: req.danger,
        features: req.features,
        nickname: req.nickname,
        location: req.location,
        geo_location: req.geo_location,
        time: req.time,
        contact_name: req.contact_name,
        contact_phone: req.contact_phone,
        contact_email: req.contact_email,
        extras: req.extras,
    }
}

fn ad_view(ad: Ad) -> AdView {
    AdView {
        id: ad.id,
        status: ad.status,
        pet_type: ad.pet_type,
        breed: ad.breed,
        color: ad.color,
        size: ad.size,
        danger: ad.danger,
        features: ad.features,
        nickname: ad.nickname,
        location: ad.location,
        geo_location: ad.geo_location,
        time: ad.time.format(AD_TIME_FORMAT).to_string(),
        created_at: ad.created_at.to_rfc3339(),
        contact_name: ad.contact_name,
        contact_phone: ad.contact_phone,
        contact_email: ad.contact_email,
        extras: ad.extras,
    }
}
