//! Account handlers: registration, login, token refresh and the current user.

use actix_web::{HttpResponse, web};
use validator::Validate;

use petboard_core::domain::User;
use petboard_core::services::{Registration, TokenPair};
use petboard_shared::dto::{
    AuthResponse, LoginRequest, RefreshRequest, RegisterUserRequest, UserResponse,
};

use crate::middleware::auth::Identity;
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// POST /register
pub async fn register(
    state: web::Data<AppState>,
    body: web::Json<RegisterUserRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    req.validate()?;

    let user = state
        .accounts
        .register(Registration {
            email: req.email,
            password: req.password,
            phone: req.phone,
            name: req.name,
        })
        .await?;

    Ok(HttpResponse::Created().json(user_response(user)))
}

/// POST /login
pub async fn login(
    state: web::Data<AppState>,
    body: web::Json<LoginRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let tokens = state.accounts.login(&req.email, &req.password).await?;

    Ok(HttpResponse::Ok().json(auth_response(tokens)))
}

/// POST /refresh
pub async fn refresh(
    state: web::Data<AppState>,
    body: web::Json<RefreshRequest>,
) -> AppResult<HttpResponse> {
    let tokens = state.accounts.refresh(&body.refresh_token).await?;

    Ok(HttpResponse::Ok().json(auth_response(tokens)))
}

/// GET /me - Protected route
pub async fn me(state: web::Data<AppState>, identity: Identity) -> AppResult<HttpResponse> {
    let user = state.accounts.current_user(identity.user_id).await?;

    Ok(HttpResponse::Ok().json(user_response(user)))
}

fn user_response(user: User) -> UserResponse {
    UserResponse {
        id: user.id,
        email: user.email,
        phone: user.phone,
        name: user.name,
        created_at: user.created_at.to_rfc3339(),
    }
}

fn auth_response(tokens: TokenPair) -> AuthResponse {
    AuthResponse {
        access_token: tokens.access_token,
        refresh_token: tokens.refresh_token,
        token_type: "Bearer".to_string(),
        expires_in: tokens.expires_in.max(0) as u64,
    }
}
