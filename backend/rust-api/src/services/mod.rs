use std::sync::Arc;

use crate::config::Config;
use crate::middlewares::auth::{AuthError, JwtService};
use crate::store::{RecordStore, StoreError};

pub mod analytics_service;
pub mod assessment_service;
pub mod auth_service;
pub mod content_service;
pub mod format_selector;
pub mod learning_style;
pub mod seed;

use format_selector::SelectionError;
use learning_style::{AssessmentError, AssessmentScorer};

pub struct AppState {
    pub config: Config,
    pub store: Arc<dyn RecordStore>,
    pub jwt: Arc<JwtService>,
    pub scorer: AssessmentScorer,
}

impl AppState {
    pub fn new(config: Config, store: Arc<dyn RecordStore>) -> Self {
        let jwt = Arc::new(JwtService::new(
            &config.jwt_secret,
            config.access_token_ttl_minutes,
        ));
        let scorer = AssessmentScorer::new(config.assessment_question_count);

        Self {
            config,
            store,
            jwt,
            scorer,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error(transparent)]
    Assessment(#[from] AssessmentError),

    #[error(transparent)]
    Selection(#[from] SelectionError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl ServiceError {
    pub fn not_found(message: impl Into<String>) -> Self {
        ServiceError::NotFound(message.into())
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        ServiceError::Unauthorized(message.into())
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;
