//! HTTP handlers and route configuration.

mod ads;
mod auth;
mod health;

use actix_web::{HttpResponse, error::InternalError, web};
use petboard_shared::ErrorResponse;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        // Public routes
        .route("/health", web::get().to(health::health_check))
        // Accounts
        .route("/register", web::post().to(auth::register))
        .route("/login", web::post().to(auth::login))
        .route("/refresh", web::post().to(auth::refresh))
        .route("/me", web::get().to(auth::me))
        // Ads
        .service(
            web::resource("/ads")
                .app_data(ads::query_config())
                .app_data(ads::json_config())
                .route(web::get().to(ads::list_ads))
                .route(web::post().to(ads::create_ad)),
        );
}

/// Malformed JSON bodies get a problem document instead of actix's plain-text default.
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        let detail = err.to_string();
        InternalError::from_response(
            err,
            HttpResponse::BadRequest().json(ErrorResponse::bad_request(detail)),
        )
        .into()
    })
}
