use std::sync::Arc;

use super::{learning_style::AssessmentScorer, ServiceError, ServiceResult};
use crate::metrics::{record_assessment_rejected, record_assessment_scored};
use crate::models::{
    assessment::{AssessmentAnswer, AssessmentQuestion, AssessmentResult},
    user::User,
};
use crate::store::RecordStore;

pub struct AssessmentService {
    store: Arc<dyn RecordStore>,
    scorer: AssessmentScorer,
}

impl AssessmentService {
    pub fn new(store: Arc<dyn RecordStore>, scorer: AssessmentScorer) -> Self {
        Self { store, scorer }
    }

    pub async fn questions(&self) -> ServiceResult<Vec<AssessmentQuestion>> {
        Ok(self.store.list_questions().await?)
    }

    /// Scores the answers and stores the classification on the user. A
    /// rejected submission leaves the stored profile untouched.
    pub async fn submit(
        &self,
        user_id: u64,
        answers: &[AssessmentAnswer],
    ) -> ServiceResult<AssessmentResult> {
        let mut user = self.load_user(user_id).await?;

        let result = self.scorer.score(answers).map_err(|e| {
            tracing::warn!("Rejected assessment from user {}: {}", user_id, e);
            record_assessment_rejected(e.kind());
            e
        })?;

        user.learning_style = Some(result.learning_style);
        user.assessment_completed = true;
        user.assessment_score = Some(result.scores);
        self.store.update_user(user).await?;

        record_assessment_scored(result.learning_style);
        tracing::info!(
            "Assessment scored: user={}, style={}, confidence={:.2}",
            user_id,
            result.learning_style,
            result.confidence
        );

        Ok(result)
    }

    /// Last classification. The style is the one on the profile, which a
    /// profile update may have changed since scoring; confidence still comes
    /// from the stored tallies.
    pub async fn result(&self, user_id: u64) -> ServiceResult<AssessmentResult> {
        let user = self.load_user(user_id).await?;
        if !user.assessment_completed {
            return Err(ServiceError::not_found("Assessment not completed"));
        }
        let scores = user
            .assessment_score
            .ok_or_else(|| ServiceError::not_found("Assessment scores not found"))?;

        let mut result = AssessmentResult::from_scores(scores);
        if let Some(style) = user.learning_style {
            result.learning_style = style;
        }
        Ok(result)
    }

    pub async fn reset(&self, user_id: u64) -> ServiceResult<()> {
        let mut user = self.load_user(user_id).await?;
        user.clear_assessment();
        self.store.update_user(user).await?;
        tracing::info!("Assessment reset for user {}", user_id);
        Ok(())
    }

    async fn load_user(&self, user_id: u64) -> ServiceResult<User> {
        self.store
            .find_user(user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User not found"))
    }
}
