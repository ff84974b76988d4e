use axum::{extract::State, http::StatusCode, response::IntoResponse, Extension, Json};
use std::sync::Arc;

use super::{caller_id, ApiError};
use crate::{
    extractors::ValidatedJson,
    middlewares::auth::JwtClaims,
    models::user::{AuthResponse, LoginRequest, RegisterRequest, UserProfile},
    services::{auth_service::AuthService, AppState},
};

fn auth_service(state: &AppState) -> AuthService {
    AuthService::new(
        state.store.clone(),
        state.jwt.clone(),
        state.config.password_hash_cost,
    )
}

/// POST /api/v1/auth/register
pub async fn register(
    State(state): State<Arc<AppState>>,
    ValidatedJson(req): ValidatedJson<RegisterRequest>,
) -> Result<impl IntoResponse, ApiError> {
    tracing::info!("Registering new user: {}", req.email);
    let response = auth_service(&state).register(req).await?;

    Ok((StatusCode::CREATED, Json(response)))
}

/// POST /api/v1/auth/login
pub async fn login(
    State(state): State<Arc<AppState>>,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    Ok(Json(auth_service(&state).login(req).await?))
}

/// GET /api/v1/auth/me
pub async fn me(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<JwtClaims>,
) -> Result<Json<UserProfile>, ApiError> {
    let user = auth_service(&state)
        .current_user(caller_id(&claims)?)
        .await?;

    Ok(Json(UserProfile::from(user)))
}
