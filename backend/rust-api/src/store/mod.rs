//! Record store: key-by-id lookup and update of users, catalog, interaction
//! history and progress. Writes are last-write-wins.

use async_trait::async_trait;
use serde::Serialize;

use crate::models::{
    assessment::AssessmentQuestion,
    content::{ContentInteraction, ContentItem, NewContentItem, ProgressRecord},
    user::{NewUser, User},
};

pub mod memory;

pub use memory::InMemoryStore;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("{0}")]
    Conflict(String),

    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: u64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StoreStats {
    pub users: usize,
    pub questions: usize,
    pub content: usize,
    pub interactions: usize,
    pub progress_records: usize,
}

#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn stats(&self) -> Result<StoreStats, StoreError>;

    async fn insert_user(&self, user: NewUser) -> Result<User, StoreError>;
    async fn find_user(&self, id: u64) -> Result<Option<User>, StoreError>;
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;
    /// Replaces the stored user with the same id.
    async fn update_user(&self, user: User) -> Result<User, StoreError>;
    async fn list_users(&self) -> Result<Vec<User>, StoreError>;

    async fn replace_questions(
        &self,
        questions: Vec<AssessmentQuestion>,
    ) -> Result<(), StoreError>;
    async fn list_questions(&self) -> Result<Vec<AssessmentQuestion>, StoreError>;

    async fn insert_content(&self, item: NewContentItem) -> Result<ContentItem, StoreError>;
    async fn find_content(&self, id: u64) -> Result<Option<ContentItem>, StoreError>;
    async fn list_content(&self) -> Result<Vec<ContentItem>, StoreError>;

    /// Stores the interaction, assigning its id.
    async fn record_interaction(
        &self,
        interaction: ContentInteraction,
    ) -> Result<ContentInteraction, StoreError>;
    async fn interactions_for_user(&self, user_id: u64)
        -> Result<Vec<ContentInteraction>, StoreError>;
    async fn interactions_for_content(
        &self,
        content_id: u64,
    ) -> Result<Vec<ContentInteraction>, StoreError>;
    async fn interactions_for_user_content(
        &self,
        user_id: u64,
        content_id: u64,
    ) -> Result<Vec<ContentInteraction>, StoreError>;

    async fn find_progress(
        &self,
        user_id: u64,
        content_id: u64,
    ) -> Result<Option<ProgressRecord>, StoreError>;
    /// Inserts or replaces the record for its (user, content) pair. A record
    /// with id 0 gets a fresh id.
    async fn upsert_progress(&self, record: ProgressRecord) -> Result<ProgressRecord, StoreError>;
    async fn progress_for_user(&self, user_id: u64) -> Result<Vec<ProgressRecord>, StoreError>;
    async fn progress_for_content(
        &self,
        content_id: u64,
    ) -> Result<Vec<ProgressRecord>, StoreError>;
}
