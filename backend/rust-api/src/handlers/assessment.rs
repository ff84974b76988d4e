use axum::{extract::State, Extension, Json};
use serde_json::{json, Value};
use std::sync::Arc;

use super::{caller_id, ApiError};
use crate::{
    extractors::AppJson,
    middlewares::auth::JwtClaims,
    models::assessment::{AssessmentQuestion, AssessmentResult, AssessmentSubmission},
    services::{assessment_service::AssessmentService, AppState},
};

fn assessment_service(state: &AppState) -> AssessmentService {
    AssessmentService::new(state.store.clone(), state.scorer)
}

/// GET /api/v1/assessment/questions
pub async fn questions(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<AssessmentQuestion>>, ApiError> {
    Ok(Json(assessment_service(&state).questions().await?))
}

/// POST /api/v1/assessment/submit
pub async fn submit(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<JwtClaims>,
    AppJson(submission): AppJson<AssessmentSubmission>,
) -> Result<Json<AssessmentResult>, ApiError> {
    let result = assessment_service(&state)
        .submit(caller_id(&claims)?, &submission.answers)
        .await?;

    Ok(Json(result))
}

/// GET /api/v1/assessment/result
pub async fn result(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<JwtClaims>,
) -> Result<Json<AssessmentResult>, ApiError> {
    Ok(Json(
        assessment_service(&state)
            .result(caller_id(&claims)?)
            .await?,
    ))
}

/// POST /api/v1/assessment/reset
pub async fn reset(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<JwtClaims>,
) -> Result<Json<Value>, ApiError> {
    assessment_service(&state)
        .reset(caller_id(&claims)?)
        .await?;

    Ok(Json(json!({ "message": "Assessment reset successfully" })))
}
