use axum::{
    extract::{Path, State},
    Extension, Json,
};
use std::sync::Arc;

use super::{caller_id, ApiError};
use crate::{
    middlewares::auth::JwtClaims,
    models::analytics::{ContentAnalytics, DashboardOverview, StyleDistribution, UserAnalytics},
    services::{analytics_service::AnalyticsService, AppState},
};

/// GET /api/v1/analytics/user/{id}
pub async fn user(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<u64>,
) -> Result<Json<UserAnalytics>, ApiError> {
    let service = AnalyticsService::new(state.store.clone());
    Ok(Json(service.user(user_id).await?))
}

/// GET /api/v1/analytics/content/{id}
pub async fn content(
    State(state): State<Arc<AppState>>,
    Path(content_id): Path<u64>,
) -> Result<Json<ContentAnalytics>, ApiError> {
    let service = AnalyticsService::new(state.store.clone());
    Ok(Json(service.content(content_id).await?))
}

/// GET /api/v1/analytics/dashboard/overview
pub async fn dashboard(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<JwtClaims>,
) -> Result<Json<DashboardOverview>, ApiError> {
    let service = AnalyticsService::new(state.store.clone());
    Ok(Json(service.dashboard(caller_id(&claims)?).await?))
}

/// GET /api/v1/analytics/learning-styles/distribution
pub async fn style_distribution(
    State(state): State<Arc<AppState>>,
) -> Result<Json<StyleDistribution>, ApiError> {
    let service = AnalyticsService::new(state.store.clone());
    Ok(Json(service.style_distribution().await?))
}
