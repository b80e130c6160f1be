//! Account handlers.

use actix_web::{HttpResponse, web};

use docket_core::domain::{SignUp, User};
use docket_shared::dto::{AuthResponse, LoginRequest, SignUpRequest, UserResponse};

use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

fn issue_token(state: &AppState, user: &User) -> AppResult<AuthResponse> {
    let token = state
        .tokens
        .generate_token(user.id, &user.email)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    Ok(AuthResponse {
        access_token: token,
        token_type: "Bearer".to_string(),
        expires_in: state.tokens.expiration_seconds().max(0) as u64,
    })
}

/// POST /api/users
pub async fn sign_up(
    state: web::Data<AppState>,
    body: web::Json<SignUpRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let input = SignUp {
        first_name: req.first_name,
        last_name: req.last_name,
        email: req.email,
        password: req.password,
    };

    let user = state.users.sign_up(&input).await?;

    Ok(HttpResponse::Created().json(issue_token(&state, &user)?))
}

/// POST /api/session
pub async fn login(
    state: web::Data<AppState>,
    body: web::Json<LoginRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let user = state.users.authenticate(&req.email, &req.password).await?;

    Ok(HttpResponse::Ok().json(issue_token(&state, &user)?))
}

/// GET /api/me - Protected route
pub async fn me(state: web::Data<AppState>, identity: Identity) -> AppResult<HttpResponse> {
    let user = state.users.find_by_id(identity.user_id).await?;

    Ok(HttpResponse::Ok().json(UserResponse {
        id: user.id,
        first_name: user.first_name,
        last_name: user.last_name,
        email: user.email,
        created_at: user.created_at.to_rfc3339(),
    }))
}
