use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::ContentFormat;

/// Catalog entry. A format is offered iff its locator is a non-empty string.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentItem {
    pub id: u64,
    pub title: String,
    pub description: Option<String>,
    pub content_type: ContentFormat,
    pub subject: String,
    pub difficulty_level: String,
    pub duration_minutes: u32,
    pub video_url: Option<String>,
    pub audio_url: Option<String>,
    pub text_content: Option<String>,
    pub interactive_url: Option<String>,
    pub tags: Vec<String>,
    pub learning_objectives: Vec<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl ContentItem {
    pub fn locator(&self, format: ContentFormat) -> Option<&str> {
        let value = match format {
            ContentFormat::Video => self.video_url.as_deref(),
            ContentFormat::Audio => self.audio_url.as_deref(),
            ContentFormat::Text => self.text_content.as_deref(),
            ContentFormat::Interactive => self.interactive_url.as_deref(),
        };
        value.filter(|locator| !locator.is_empty())
    }

    pub fn offers(&self, format: ContentFormat) -> bool {
        self.locator(format).is_some()
    }

    /// Offered formats in enumeration order.
    pub fn available_formats(&self) -> Vec<ContentFormat> {
        ContentFormat::ALL
            .into_iter()
            .filter(|format| self.offers(*format))
            .collect()
    }
}

/// Catalog entry as supplied by seed data, before an id is assigned.
#[derive(Debug, Clone, Deserialize)]
pub struct NewContentItem {
    pub title: String,
    pub description: Option<String>,
    pub content_type: ContentFormat,
    pub subject: String,
    #[serde(default = "default_difficulty")]
    pub difficulty_level: String,
    #[serde(default)]
    pub duration_minutes: u32,
    pub video_url: Option<String>,
    pub audio_url: Option<String>,
    pub text_content: Option<String>,
    pub interactive_url: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub learning_objectives: Vec<String>,
}

fn default_difficulty() -> String {
    "beginner".to_string()
}

#[derive(Debug, Default, Deserialize)]
pub struct ContentListQuery {
    pub subject: Option<String>,
    pub difficulty: Option<String>,
    pub content_type: Option<ContentFormat>,
}

impl ContentListQuery {
    pub fn matches(&self, item: &ContentItem) -> bool {
        if let Some(subject) = &self.subject {
            if !item
                .subject
                .to_lowercase()
                .contains(&subject.to_lowercase())
            {
                return false;
            }
        }
        if let Some(difficulty) = &self.difficulty {
            if &item.difficulty_level != difficulty {
                return false;
            }
        }
        if let Some(content_type) = self.content_type {
            if item.content_type != content_type {
                return false;
            }
        }
        true
    }
}

#[derive(Debug, Deserialize)]
pub struct RecommendationQuery {
    #[serde(default = "default_recommendation_limit")]
    pub limit: usize,
}

fn default_recommendation_limit() -> usize {
    10
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormatRecommendation {
    pub recommended_format: ContentFormat,
    pub alternative_formats: Vec<ContentFormat>,
    pub personalization_reason: String,
    /// Whether interaction history replaced the style-based pick.
    pub usage_override: bool,
}

#[derive(Debug, Serialize)]
pub struct AdaptiveContentResponse {
    pub content: ContentItem,
    #[serde(flatten)]
    pub recommendation: FormatRecommendation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InteractionType {
    View,
    Play,
    Pause,
    Seek,
    FormatSwitch,
    Complete,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentInteraction {
    pub id: u64,
    pub user_id: u64,
    pub content_id: u64,
    pub interaction_type: InteractionType,
    pub format_used: ContentFormat,
    pub duration_seconds: u32,
    pub metadata: serde_json::Value,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct InteractionCreate {
    pub interaction_type: InteractionType,
    pub format_used: ContentFormat,
    #[serde(default)]
    pub duration_seconds: u32,
    #[serde(default)]
    pub metadata: serde_json::Value,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressRecord {
    pub id: u64,
    pub user_id: u64,
    pub content_id: u64,
    pub completion_percentage: f64,
    pub time_spent_minutes: u32,
    pub last_position: u32,
    pub is_completed: bool,
    pub quiz_score: Option<f64>,
    pub engagement_score: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ProgressRecord {
    /// Unsaved record with everything zeroed; the store assigns the id.
    pub fn empty(user_id: u64, content_id: u64, now: DateTime<Utc>) -> Self {
        Self {
            id: 0,
            user_id,
            content_id,
            completion_percentage: 0.0,
            time_spent_minutes: 0,
            last_position: 0,
            is_completed: false,
            quiz_score: None,
            engagement_score: 0.0,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply(&mut self, update: &ProgressUpdate, now: DateTime<Utc>) {
        if let Some(value) = update.completion_percentage {
            self.completion_percentage = value;
        }
        if let Some(value) = update.time_spent_minutes {
            self.time_spent_minutes = value;
        }
        if let Some(value) = update.last_position {
            self.last_position = value;
        }
        if let Some(value) = update.is_completed {
            self.is_completed = value;
        }
        if let Some(value) = update.quiz_score {
            self.quiz_score = Some(value);
        }
        if let Some(value) = update.engagement_score {
            self.engagement_score = value;
        }
        self.updated_at = now;
    }
}

/// Progress view of one user on one item; all zeroes before the first update.
#[derive(Debug, Serialize)]
pub struct ProgressSnapshot {
    pub content_id: u64,
    pub completion_percentage: f64,
    pub time_spent_minutes: u32,
    pub last_position: u32,
    pub is_completed: bool,
    pub quiz_score: Option<f64>,
    pub engagement_score: f64,
}

impl From<&ProgressRecord> for ProgressSnapshot {
    fn from(record: &ProgressRecord) -> Self {
        Self {
            content_id: record.content_id,
            completion_percentage: record.completion_percentage,
            time_spent_minutes: record.time_spent_minutes,
            last_position: record.last_position,
            is_completed: record.is_completed,
            quiz_score: record.quiz_score,
            engagement_score: record.engagement_score,
        }
    }
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct ProgressUpdate {
    #[validate(range(min = 0.0, max = 100.0, message = "Completion must be between 0 and 100"))]
    pub completion_percentage: Option<f64>,
    pub time_spent_minutes: Option<u32>,
    pub last_position: Option<u32>,
    pub is_completed: Option<bool>,
    #[validate(range(min = 0.0, max = 100.0, message = "Quiz score must be between 0 and 100"))]
    pub quiz_score: Option<f64>,
    #[validate(range(min = 0.0, max = 1.0, message = "Engagement must be between 0 and 1"))]
    pub engagement_score: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item() -> ContentItem {
        ContentItem {
            id: 1,
            title: "Intro".to_string(),
            description: None,
            content_type: ContentFormat::Text,
            subject: "Data Science".to_string(),
            difficulty_level: "beginner".to_string(),
            duration_minutes: 10,
            video_url: Some(String::new()),
            audio_url: None,
            text_content: Some("body".to_string()),
            interactive_url: Some("https://example.com/lab".to_string()),
            tags: vec![],
            learning_objectives: vec![],
            is_active: true,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn empty_locator_is_not_available() {
        let item = item();
        assert!(!item.offers(ContentFormat::Video));
        assert_eq!(
            item.available_formats(),
            vec![ContentFormat::Text, ContentFormat::Interactive]
        );
    }

    #[test]
    fn list_query_matches_subject_case_insensitively() {
        let query = ContentListQuery {
            subject: Some("science".to_string()),
            ..Default::default()
        };
        assert!(query.matches(&item()));

        let query = ContentListQuery {
            difficulty: Some("advanced".to_string()),
            ..Default::default()
        };
        assert!(!query.matches(&item()));
    }

    #[test]
    fn progress_update_only_touches_supplied_fields() {
        let now = Utc::now();
        let mut record = ProgressRecord::empty(1, 1, now);
        record.time_spent_minutes = 12;

        record.apply(
            &ProgressUpdate {
                completion_percentage: Some(55.0),
                ..Default::default()
            },
            now,
        );

        assert_eq!(record.completion_percentage, 55.0);
        assert_eq!(record.time_spent_minutes, 12);
        assert!(!record.is_completed);
    }

    #[test]
    fn progress_update_rejects_out_of_range_completion() {
        let update = ProgressUpdate {
            completion_percentage: Some(140.0),
            ..Default::default()
        };
        assert!(update.validate().is_err());
    }
}
