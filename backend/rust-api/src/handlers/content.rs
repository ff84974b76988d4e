use axum::{
    extract::{Path, State},
    Extension, Json,
};
use serde_json::{json, Value};
use std::sync::Arc;

use super::{caller_id, ApiError};
use crate::{
    extractors::{AppJson, AppQuery, ValidatedJson},
    middlewares::auth::JwtClaims,
    models::content::{
        AdaptiveContentResponse, ContentItem, ContentListQuery, InteractionCreate,
        ProgressRecord, ProgressSnapshot, ProgressUpdate, RecommendationQuery,
    },
    services::{content_service::ContentService, AppState},
};

fn content_service(state: &AppState) -> ContentService {
    ContentService::new(state.store.clone())
}

/// GET /api/v1/content
pub async fn list(
    State(state): State<Arc<AppState>>,
    AppQuery(query): AppQuery<ContentListQuery>,
) -> Result<Json<Vec<ContentItem>>, ApiError> {
    Ok(Json(content_service(&state).list(&query).await?))
}

/// GET /api/v1/content/{id}
pub async fn get(
    State(state): State<Arc<AppState>>,
    Path(content_id): Path<u64>,
) -> Result<Json<ContentItem>, ApiError> {
    Ok(Json(content_service(&state).get(content_id).await?))
}

/// GET /api/v1/content/{id}/adaptive
pub async fn adaptive(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<JwtClaims>,
    Path(content_id): Path<u64>,
) -> Result<Json<AdaptiveContentResponse>, ApiError> {
    let response = content_service(&state)
        .adaptive(caller_id(&claims)?, content_id)
        .await?;

    Ok(Json(response))
}

/// POST /api/v1/content/{id}/interaction
pub async fn record_interaction(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<JwtClaims>,
    Path(content_id): Path<u64>,
    AppJson(req): AppJson<InteractionCreate>,
) -> Result<Json<Value>, ApiError> {
    let interaction = content_service(&state)
        .record_interaction(caller_id(&claims)?, content_id, req)
        .await?;

    Ok(Json(json!({
        "message": "Interaction recorded successfully",
        "interaction_id": interaction.id,
    })))
}

/// GET /api/v1/content/{id}/progress
pub async fn progress(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<JwtClaims>,
    Path(content_id): Path<u64>,
) -> Result<Json<ProgressSnapshot>, ApiError> {
    let snapshot = content_service(&state)
        .progress(caller_id(&claims)?, content_id)
        .await?;

    Ok(Json(snapshot))
}

/// PUT /api/v1/content/{id}/progress
pub async fn update_progress(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<JwtClaims>,
    Path(content_id): Path<u64>,
    ValidatedJson(update): ValidatedJson<ProgressUpdate>,
) -> Result<Json<ProgressRecord>, ApiError> {
    let record = content_service(&state)
        .update_progress(caller_id(&claims)?, content_id, &update)
        .await?;

    Ok(Json(record))
}

/// GET /api/v1/content/recommendations/personalized
pub async fn personalized(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<JwtClaims>,
    AppQuery(query): AppQuery<RecommendationQuery>,
) -> Result<Json<Vec<ContentItem>>, ApiError> {
    if query.limit == 0 {
        return Err(ApiError::bad_request("limit must be positive"));
    }

    let items = content_service(&state)
        .personalized(caller_id(&claims)?, query.limit)
        .await?;

    Ok(Json(items))
}
