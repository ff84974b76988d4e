use chrono::Utc;
use std::collections::HashSet;
use std::sync::Arc;

use super::{format_selector, ServiceError, ServiceResult};
use crate::metrics::{record_interaction, record_recommendation};
use crate::models::{
    content::{
        AdaptiveContentResponse, ContentInteraction, ContentItem, ContentListQuery,
        InteractionCreate, ProgressRecord, ProgressSnapshot, ProgressUpdate,
    },
    FormatUsage,
};
use crate::store::RecordStore;

pub struct ContentService {
    store: Arc<dyn RecordStore>,
}

impl ContentService {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    pub async fn list(&self, query: &ContentListQuery) -> ServiceResult<Vec<ContentItem>> {
        Ok(self
            .store
            .list_content()
            .await?
            .into_iter()
            .filter(|item| item.is_active && query.matches(item))
            .collect())
    }

    pub async fn get(&self, content_id: u64) -> ServiceResult<ContentItem> {
        self.store
            .find_content(content_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Content not found"))
    }

    /// Picks the presentation format for this user from their learning style
    /// and their history with this item.
    pub async fn adaptive(
        &self,
        user_id: u64,
        content_id: u64,
    ) -> ServiceResult<AdaptiveContentResponse> {
        let content = self.get(content_id).await?;
        let user = self
            .store
            .find_user(user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User not found"))?;

        let history = FormatUsage::from_formats(
            self.store
                .interactions_for_user_content(user_id, content_id)
                .await?
                .into_iter()
                .map(|interaction| interaction.format_used),
        );

        let recommendation = format_selector::select(
            user.effective_style(),
            &content.available_formats(),
            &history,
        )
        .map_err(|e| {
            tracing::warn!("Content {} cannot be adapted: {}", content_id, e);
            e
        })?;

        record_recommendation(
            recommendation.recommended_format,
            recommendation.usage_override,
        );
        tracing::debug!(
            "Adaptive format for user={} content={}: {} (override={})",
            user_id,
            content_id,
            recommendation.recommended_format,
            recommendation.usage_override
        );

        Ok(AdaptiveContentResponse {
            content,
            recommendation,
        })
    }

    pub async fn record_interaction(
        &self,
        user_id: u64,
        content_id: u64,
        req: InteractionCreate,
    ) -> ServiceResult<ContentInteraction> {
        self.get(content_id).await?;

        let interaction = self
            .store
            .record_interaction(ContentInteraction {
                id: 0,
                user_id,
                content_id,
                interaction_type: req.interaction_type,
                format_used: req.format_used,
                duration_seconds: req.duration_seconds,
                metadata: req.metadata,
                timestamp: Utc::now(),
            })
            .await?;

        record_interaction(interaction.format_used);
        Ok(interaction)
    }

    /// Current progress, or a zeroed snapshot when the user never started.
    pub async fn progress(&self, user_id: u64, content_id: u64) -> ServiceResult<ProgressSnapshot> {
        Ok(match self.store.find_progress(user_id, content_id).await? {
            Some(record) => ProgressSnapshot::from(&record),
            None => ProgressSnapshot::from(&ProgressRecord::empty(
                user_id,
                content_id,
                Utc::now(),
            )),
        })
    }

    pub async fn update_progress(
        &self,
        user_id: u64,
        content_id: u64,
        update: &ProgressUpdate,
    ) -> ServiceResult<ProgressRecord> {
        self.get(content_id).await?;

        let now = Utc::now();
        let mut record = self
            .store
            .find_progress(user_id, content_id)
            .await?
            .unwrap_or_else(|| ProgressRecord::empty(user_id, content_id, now));
        record.apply(update, now);

        Ok(self.store.upsert_progress(record).await?)
    }

    /// Active items offering the primary format of the user's style, minus
    /// anything the user already completed.
    pub async fn personalized(&self, user_id: u64, limit: usize) -> ServiceResult<Vec<ContentItem>> {
        let user = self
            .store
            .find_user(user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User not found"))?;
        let preferred = user.effective_style().primary_format();

        let completed: HashSet<u64> = self
            .store
            .progress_for_user(user_id)
            .await?
            .into_iter()
            .filter(|record| record.is_completed)
            .map(|record| record.content_id)
            .collect();

        Ok(self
            .store
            .list_content()
            .await?
            .into_iter()
            .filter(|item| {
                item.is_active && item.offers(preferred) && !completed.contains(&item.id)
            })
            .take(limit)
            .collect())
    }
}
