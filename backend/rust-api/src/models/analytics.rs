use serde::Serialize;

use super::{ContentFormat, LearningStyle};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendPoint {
    pub date: String,
    pub activities: u32,
    pub avg_completion: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActivityPoint {
    pub date: String,
    pub activities: u32,
}

#[derive(Debug, Serialize)]
pub struct UserAnalytics {
    pub user_id: u64,
    pub total_time_spent: u32,
    pub content_completed: u32,
    pub average_engagement: f64,
    pub preferred_format: ContentFormat,
    /// Style label, or `"unknown"` before the assessment.
    pub learning_style: String,
    pub progress_trend: Vec<TrendPoint>,
}

#[derive(Debug, Serialize)]
pub struct UserFeedback {
    pub average_quiz_score: f64,
    pub total_quiz_attempts: u32,
    pub completion_rate: f64,
}

#[derive(Debug, Serialize)]
pub struct ContentAnalytics {
    pub content_id: u64,
    pub total_views: u32,
    pub completion_rate: f64,
    pub average_engagement: f64,
    pub format_preferences: serde_json::Map<String, serde_json::Value>,
    pub user_feedback: UserFeedback,
}

#[derive(Debug, Serialize)]
pub struct DashboardOverview {
    pub user_id: u64,
    pub learning_style: Option<LearningStyle>,
    pub total_time_minutes: u32,
    pub content_completed: u32,
    pub content_in_progress: u32,
    pub recent_activity: Vec<ActivityPoint>,
    pub format_usage: serde_json::Map<String, serde_json::Value>,
    pub assessment_completed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StyleCount {
    pub learning_style: LearningStyle,
    pub count: u32,
}

#[derive(Debug, Serialize)]
pub struct StyleDistribution {
    pub distribution: Vec<StyleCount>,
    pub total_assessed_users: u32,
}
