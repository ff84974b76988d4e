use axum::{extract::State, Extension, Json};
use std::sync::Arc;

use super::{caller_id, ApiError};
use crate::{
    extractors::ValidatedJson,
    middlewares::auth::JwtClaims,
    models::user::{UpdateProfileRequest, UserProfile},
    services::{auth_service::AuthService, AppState},
};

/// PUT /api/v1/users/me
pub async fn update_me(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<JwtClaims>,
    ValidatedJson(req): ValidatedJson<UpdateProfileRequest>,
) -> Result<Json<UserProfile>, ApiError> {
    let service = AuthService::new(
        state.store.clone(),
        state.jwt.clone(),
        state.config.password_hash_cost,
    );
    let profile = service.update_profile(caller_id(&claims)?, req).await?;

    tracing::info!(user_id = profile.id, "Profile updated");
    Ok(Json(profile))
}
