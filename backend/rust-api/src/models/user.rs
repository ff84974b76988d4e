use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{assessment::StyleScores, LearningStyle};

/// User record held by the record store
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub email: String,
    pub username: String,
    pub password_hash: String,
    pub is_active: bool,
    pub learning_style: Option<LearningStyle>,
    pub assessment_completed: bool,
    pub assessment_score: Option<StyleScores>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Style used for personalization; users without an assessment are
    /// treated as visual learners.
    pub fn effective_style(&self) -> LearningStyle {
        self.learning_style.unwrap_or_default()
    }

    pub fn clear_assessment(&mut self) {
        self.learning_style = None;
        self.assessment_completed = false;
        self.assessment_score = None;
    }
}

/// User fields needed to create a record; the store assigns id and timestamps.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub username: String,
    pub password_hash: String,
    pub learning_style: Option<LearningStyle>,
    pub assessment_score: Option<StyleScores>,
}

/// User profile returned to client (without sensitive data)
#[derive(Debug, Serialize)]
pub struct UserProfile {
    pub id: u64,
    pub email: String,
    pub username: String,
    pub is_active: bool,
    pub learning_style: Option<LearningStyle>,
    pub assessment_completed: bool,
    pub assessment_score: Option<StyleScores>,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserProfile {
    fn from(user: User) -> Self {
        UserProfile {
            id: user.id,
            email: user.email,
            username: user.username,
            is_active: user.is_active,
            learning_style: user.learning_style,
            assessment_completed: user.assessment_completed,
            assessment_score: user.assessment_score,
            created_at: user.created_at,
        }
    }
}

/// Request to register a new user
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(
        min = 3,
        max = 50,
        message = "Username must be between 3 and 50 characters"
    ))]
    pub username: String,

    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
}

/// Request to login
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    pub password: String,
}

/// Response after successful login or registration
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub token_type: &'static str,
    pub user: UserProfile,
}

/// Partial profile update by the user themselves
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,

    #[validate(length(
        min = 3,
        max = 50,
        message = "Username must be between 3 and 50 characters"
    ))]
    pub username: Option<String>,

    pub learning_style: Option<LearningStyle>,
}

/// Demo account as listed in a seed file (plain-text password).
#[derive(Debug, Clone, Deserialize)]
pub struct UserSeed {
    pub email: String,
    pub username: String,
    pub password: String,
    pub learning_style: Option<LearningStyle>,
    pub assessment_score: Option<StyleScores>,
}
