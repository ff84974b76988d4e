use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

use super::{RecordStore, StoreError, StoreStats};
use crate::models::{
    assessment::AssessmentQuestion,
    content::{ContentInteraction, ContentItem, NewContentItem, ProgressRecord},
    user::{NewUser, User},
};

#[derive(Default)]
struct Tables {
    users: BTreeMap<u64, User>,
    questions: Vec<AssessmentQuestion>,
    content: BTreeMap<u64, ContentItem>,
    interactions: Vec<ContentInteraction>,
    progress: BTreeMap<(u64, u64), ProgressRecord>,
    next_user_id: u64,
    next_content_id: u64,
    next_interaction_id: u64,
    next_progress_id: u64,
}

fn next_id(counter: &mut u64) -> u64 {
    *counter += 1;
    *counter
}

/// Process-local store owned by the application state. Created empty,
/// seeded once at startup, dropped with the state.
#[derive(Default)]
pub struct InMemoryStore {
    tables: RwLock<Tables>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn ensure_unique(
    users: &BTreeMap<u64, User>,
    email: &str,
    username: &str,
    skip_id: Option<u64>,
) -> Result<(), StoreError> {
    for user in users.values() {
        if Some(user.id) == skip_id {
            continue;
        }
        if user.email.eq_ignore_ascii_case(email) {
            return Err(StoreError::Conflict("Email already registered".to_string()));
        }
        if user.username == username {
            return Err(StoreError::Conflict("Username already taken".to_string()));
        }
    }
    Ok(())
}

#[async_trait]
impl RecordStore for InMemoryStore {
    async fn stats(&self) -> Result<StoreStats, StoreError> {
        let tables = self.tables.read().await;
        Ok(StoreStats {
            users: tables.users.len(),
            questions: tables.questions.len(),
            content: tables.content.len(),
            interactions: tables.interactions.len(),
            progress_records: tables.progress.len(),
        })
    }

    async fn insert_user(&self, user: NewUser) -> Result<User, StoreError> {
        let mut tables = self.tables.write().await;
        ensure_unique(&tables.users, &user.email, &user.username, None)?;

        let now = Utc::now();
        let id = next_id(&mut tables.next_user_id);
        let record = User {
            id,
            email: user.email,
            username: user.username,
            password_hash: user.password_hash,
            is_active: true,
            assessment_completed: user.assessment_score.is_some(),
            learning_style: user.learning_style,
            assessment_score: user.assessment_score,
            created_at: now,
            updated_at: now,
        };
        tables.users.insert(id, record.clone());
        Ok(record)
    }

    async fn find_user(&self, id: u64) -> Result<Option<User>, StoreError> {
        Ok(self.tables.read().await.users.get(&id).cloned())
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        Ok(self
            .tables
            .read()
            .await
            .users
            .values()
            .find(|user| user.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn update_user(&self, mut user: User) -> Result<User, StoreError> {
        let mut tables = self.tables.write().await;
        if !tables.users.contains_key(&user.id) {
            return Err(StoreError::NotFound {
                entity: "user",
                id: user.id,
            });
        }
        ensure_unique(&tables.users, &user.email, &user.username, Some(user.id))?;

        user.updated_at = Utc::now();
        tables.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn list_users(&self) -> Result<Vec<User>, StoreError> {
        Ok(self.tables.read().await.users.values().cloned().collect())
    }

    async fn replace_questions(
        &self,
        questions: Vec<AssessmentQuestion>,
    ) -> Result<(), StoreError> {
        self.tables.write().await.questions = questions;
        Ok(())
    }

    async fn list_questions(&self) -> Result<Vec<AssessmentQuestion>, StoreError> {
        Ok(self
            .tables
            .read()
            .await
            .questions
            .iter()
            .filter(|question| question.is_active)
            .cloned()
            .collect())
    }

    async fn insert_content(&self, item: NewContentItem) -> Result<ContentItem, StoreError> {
        let mut tables = self.tables.write().await;
        let id = next_id(&mut tables.next_content_id);
        let record = ContentItem {
            id,
            title: item.title,
            description: item.description,
            content_type: item.content_type,
            subject: item.subject,
            difficulty_level: item.difficulty_level,
            duration_minutes: item.duration_minutes,
            video_url: item.video_url,
            audio_url: item.audio_url,
            text_content: item.text_content,
            interactive_url: item.interactive_url,
            tags: item.tags,
            learning_objectives: item.learning_objectives,
            is_active: true,
            created_at: Utc::now(),
        };
        tables.content.insert(id, record.clone());
        Ok(record)
    }

    async fn find_content(&self, id: u64) -> Result<Option<ContentItem>, StoreError> {
        Ok(self.tables.read().await.content.get(&id).cloned())
    }

    async fn list_content(&self) -> Result<Vec<ContentItem>, StoreError> {
        Ok(self.tables.read().await.content.values().cloned().collect())
    }

    async fn record_interaction(
        &self,
        mut interaction: ContentInteraction,
    ) -> Result<ContentInteraction, StoreError> {
        let mut tables = self.tables.write().await;
        interaction.id = next_id(&mut tables.next_interaction_id);
        tables.interactions.push(interaction.clone());
        Ok(interaction)
    }

    async fn interactions_for_user(
        &self,
        user_id: u64,
    ) -> Result<Vec<ContentInteraction>, StoreError> {
        Ok(self
            .tables
            .read()
            .await
            .interactions
            .iter()
            .filter(|interaction| interaction.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn interactions_for_content(
        &self,
        content_id: u64,
    ) -> Result<Vec<ContentInteraction>, StoreError> {
        Ok(self
            .tables
            .read()
            .await
            .interactions
            .iter()
            .filter(|interaction| interaction.content_id == content_id)
            .cloned()
            .collect())
    }

    async fn interactions_for_user_content(
        &self,
        user_id: u64,
        content_id: u64,
    ) -> Result<Vec<ContentInteraction>, StoreError> {
        Ok(self
            .tables
            .read()
            .await
            .interactions
            .iter()
            .filter(|interaction| {
                interaction.user_id == user_id && interaction.content_id == content_id
            })
            .cloned()
            .collect())
    }

    async fn find_progress(
        &self,
        user_id: u64,
        content_id: u64,
    ) -> Result<Option<ProgressRecord>, StoreError> {
        Ok(self
            .tables
            .read()
            .await
            .progress
            .get(&(user_id, content_id))
            .cloned())
    }

    async fn upsert_progress(
        &self,
        mut record: ProgressRecord,
    ) -> Result<ProgressRecord, StoreError> {
        let mut tables = self.tables.write().await;
        let key = (record.user_id, record.content_id);
        let existing_id = tables.progress.get(&key).map(|existing| existing.id);
        record.id = match existing_id {
            Some(id) => id,
            None if record.id == 0 => next_id(&mut tables.next_progress_id),
            None => record.id,
        };
        tables.progress.insert(key, record.clone());
        Ok(record)
    }

    async fn progress_for_user(&self, user_id: u64) -> Result<Vec<ProgressRecord>, StoreError> {
        Ok(self
            .tables
            .read()
            .await
            .progress
            .values()
            .filter(|record| record.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn progress_for_content(
        &self,
        content_id: u64,
    ) -> Result<Vec<ProgressRecord>, StoreError> {
        Ok(self
            .tables
            .read()
            .await
            .progress
            .values()
            .filter(|record| record.content_id == content_id)
            .cloned()
            .collect())
    }
}
