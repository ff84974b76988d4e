use chrono::{DateTime, Duration, NaiveDate, Utc};
use std::collections::BTreeMap;
use std::sync::Arc;

use super::{ServiceError, ServiceResult};
use crate::models::{
    analytics::{
        ActivityPoint, ContentAnalytics, DashboardOverview, StyleCount, StyleDistribution,
        TrendPoint, UserAnalytics, UserFeedback,
    },
    content::{ContentInteraction, InteractionType, ProgressRecord},
    user::User,
    FormatUsage, LearningStyle,
};
use crate::store::RecordStore;

const TREND_WINDOW_DAYS: i64 = 30;
const RECENT_WINDOW_DAYS: i64 = 7;

pub struct AnalyticsService {
    store: Arc<dyn RecordStore>,
}

impl AnalyticsService {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    pub async fn user(&self, user_id: u64) -> ServiceResult<UserAnalytics> {
        let user = self.load_user(user_id).await?;
        let progress = self.store.progress_for_user(user_id).await?;
        let interactions = self.store.interactions_for_user(user_id).await?;

        Ok(user_analytics(&user, &progress, &interactions, Utc::now()))
    }

    pub async fn content(&self, content_id: u64) -> ServiceResult<ContentAnalytics> {
        if self.store.find_content(content_id).await?.is_none() {
            return Err(ServiceError::not_found("Content not found"));
        }
        let progress = self.store.progress_for_content(content_id).await?;
        let interactions = self.store.interactions_for_content(content_id).await?;

        Ok(content_analytics(content_id, &progress, &interactions))
    }

    pub async fn dashboard(&self, user_id: u64) -> ServiceResult<DashboardOverview> {
        let user = self.load_user(user_id).await?;
        let progress = self.store.progress_for_user(user_id).await?;
        let interactions = self.store.interactions_for_user(user_id).await?;

        Ok(dashboard_overview(&user, &progress, &interactions, Utc::now()))
    }

    pub async fn style_distribution(&self) -> ServiceResult<StyleDistribution> {
        Ok(style_distribution(&self.store.list_users().await?))
    }

    async fn load_user(&self, user_id: u64) -> ServiceResult<User> {
        self.store
            .find_user(user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User not found"))
    }
}

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, count) = values.fold((0.0, 0u32), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

fn usage_of(interactions: &[ContentInteraction]) -> FormatUsage {
    FormatUsage::from_formats(interactions.iter().map(|i| i.format_used))
}

/// Progress records touched within the window, grouped by day of last update.
fn by_day<'a>(
    progress: &'a [ProgressRecord],
    now: DateTime<Utc>,
    window_days: i64,
) -> BTreeMap<NaiveDate, Vec<&'a ProgressRecord>> {
    let since = now - Duration::days(window_days);
    let mut days: BTreeMap<NaiveDate, Vec<&ProgressRecord>> = BTreeMap::new();
    for record in progress.iter().filter(|r| r.updated_at >= since) {
        days.entry(record.updated_at.date_naive())
            .or_default()
            .push(record);
    }
    days
}

pub fn user_analytics(
    user: &User,
    progress: &[ProgressRecord],
    interactions: &[ContentInteraction],
    now: DateTime<Utc>,
) -> UserAnalytics {
    let usage = usage_of(interactions);

    let progress_trend = by_day(progress, now, TREND_WINDOW_DAYS)
        .into_iter()
        .map(|(date, records)| TrendPoint {
            date: date.to_string(),
            activities: records.len() as u32,
            avg_completion: mean(records.iter().map(|r| r.completion_percentage)),
        })
        .collect();

    UserAnalytics {
        user_id: user.id,
        total_time_spent: progress.iter().map(|r| r.time_spent_minutes).sum(),
        content_completed: progress.iter().filter(|r| r.is_completed).count() as u32,
        average_engagement: mean(progress.iter().map(|r| r.engagement_score)),
        preferred_format: usage.most_used().0,
        learning_style: user
            .learning_style
            .map(|style| style.to_string())
            .unwrap_or_else(|| "unknown".to_string()),
        progress_trend,
    }
}

pub fn content_analytics(
    content_id: u64,
    progress: &[ProgressRecord],
    interactions: &[ContentInteraction],
) -> ContentAnalytics {
    let started = progress.len();
    let completed = progress.iter().filter(|r| r.is_completed).count();
    let completion_rate = if started > 0 {
        completed as f64 / started as f64 * 100.0
    } else {
        0.0
    };

    let quiz_scores: Vec<f64> = progress.iter().filter_map(|r| r.quiz_score).collect();

    ContentAnalytics {
        content_id,
        total_views: interactions
            .iter()
            .filter(|i| i.interaction_type == InteractionType::View)
            .count() as u32,
        completion_rate,
        average_engagement: mean(progress.iter().map(|r| r.engagement_score)),
        format_preferences: usage_of(interactions).to_map(),
        user_feedback: UserFeedback {
            average_quiz_score: mean(quiz_scores.iter().copied()),
            total_quiz_attempts: quiz_scores.len() as u32,
            completion_rate,
        },
    }
}

pub fn dashboard_overview(
    user: &User,
    progress: &[ProgressRecord],
    interactions: &[ContentInteraction],
    now: DateTime<Utc>,
) -> DashboardOverview {
    let recent_activity = by_day(progress, now, RECENT_WINDOW_DAYS)
        .into_iter()
        .rev()
        .take(RECENT_WINDOW_DAYS as usize)
        .map(|(date, records)| ActivityPoint {
            date: date.to_string(),
            activities: records.len() as u32,
        })
        .collect();

    DashboardOverview {
        user_id: user.id,
        learning_style: user.learning_style,
        total_time_minutes: progress.iter().map(|r| r.time_spent_minutes).sum(),
        content_completed: progress.iter().filter(|r| r.is_completed).count() as u32,
        content_in_progress: progress
            .iter()
            .filter(|r| !r.is_completed && r.completion_percentage > 0.0)
            .count() as u32,
        recent_activity,
        format_usage: usage_of(interactions).to_map(),
        assessment_completed: user.assessment_completed,
    }
}

/// Styles with at least one assessed user, in declaration order.
pub fn style_distribution(users: &[User]) -> StyleDistribution {
    let distribution: Vec<StyleCount> = LearningStyle::ALL
        .into_iter()
        .map(|style| StyleCount {
            learning_style: style,
            count: users
                .iter()
                .filter(|u| u.assessment_completed && u.learning_style == Some(style))
                .count() as u32,
        })
        .filter(|entry| entry.count > 0)
        .collect();

    StyleDistribution {
        total_assessed_users: distribution.iter().map(|entry| entry.count).sum(),
        distribution,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{assessment::StyleScores, ContentFormat};

    fn user(id: u64, style: Option<LearningStyle>, completed: bool) -> User {
        let now = Utc::now();
        User {
            id,
            email: format!("u{id}@example.com"),
            username: format!("user{id}"),
            password_hash: String::new(),
            is_active: true,
            learning_style: style,
            assessment_completed: completed,
            assessment_score: completed.then(StyleScores::default),
            created_at: now,
            updated_at: now,
        }
    }

    fn progress(
        content_id: u64,
        completion: f64,
        completed: bool,
        updated_at: DateTime<Utc>,
    ) -> ProgressRecord {
        let mut record = ProgressRecord::empty(1, content_id, updated_at);
        record.completion_percentage = completion;
        record.is_completed = completed;
        record.time_spent_minutes = 10;
        record.engagement_score = 0.5;
        record
    }

    fn interaction(kind: InteractionType, format: ContentFormat) -> ContentInteraction {
        ContentInteraction {
            id: 0,
            user_id: 1,
            content_id: 1,
            interaction_type: kind,
            format_used: format,
            duration_seconds: 30,
            metadata: serde_json::Value::Null,
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn user_analytics_without_activity() {
        let analytics = user_analytics(&user(1, None, false), &[], &[], Utc::now());
        assert_eq!(analytics.preferred_format, ContentFormat::Video);
        assert_eq!(analytics.learning_style, "unknown");
        assert_eq!(analytics.average_engagement, 0.0);
        assert!(analytics.progress_trend.is_empty());
    }

    #[test]
    fn user_trend_is_ascending_and_windowed() {
        let now = Utc::now();
        let records = vec![
            progress(1, 100.0, true, now),
            progress(2, 40.0, false, now - Duration::days(3)),
            progress(3, 60.0, false, now - Duration::days(3)),
            progress(4, 10.0, false, now - Duration::days(45)),
        ];
        let interactions = vec![
            interaction(InteractionType::View, ContentFormat::Text),
            interaction(InteractionType::Play, ContentFormat::Audio),
            interaction(InteractionType::View, ContentFormat::Text),
        ];

        let analytics = user_analytics(
            &user(1, Some(LearningStyle::Auditory), true),
            &records,
            &interactions,
            now,
        );

        assert_eq!(analytics.total_time_spent, 40);
        assert_eq!(analytics.content_completed, 1);
        assert_eq!(analytics.preferred_format, ContentFormat::Text);
        assert_eq!(analytics.learning_style, "auditory");
        assert_eq!(analytics.progress_trend.len(), 2);
        assert_eq!(analytics.progress_trend[0].activities, 2);
        assert_eq!(analytics.progress_trend[0].avg_completion, 50.0);
        assert!(analytics.progress_trend[0].date < analytics.progress_trend[1].date);
    }

    #[test]
    fn content_completion_rate_is_a_percentage() {
        let now = Utc::now();
        let mut quizzed = progress(1, 100.0, true, now);
        quizzed.quiz_score = Some(80.0);
        let records = vec![
            quizzed,
            progress(1, 20.0, false, now),
            progress(1, 0.0, false, now),
            progress(1, 100.0, true, now),
        ];
        let interactions = vec![
            interaction(InteractionType::View, ContentFormat::Video),
            interaction(InteractionType::Pause, ContentFormat::Video),
        ];

        let analytics = content_analytics(1, &records, &interactions);
        assert_eq!(analytics.total_views, 1);
        assert_eq!(analytics.completion_rate, 50.0);
        assert_eq!(analytics.user_feedback.total_quiz_attempts, 1);
        assert_eq!(analytics.user_feedback.average_quiz_score, 80.0);
        assert_eq!(analytics.format_preferences["video"], 2);
        assert!(analytics.format_preferences.get("audio").is_none());

        assert_eq!(content_analytics(2, &[], &[]).completion_rate, 0.0);
    }

    #[test]
    fn dashboard_recent_activity_is_newest_first() {
        let now = Utc::now();
        let records = vec![
            progress(1, 30.0, false, now - Duration::days(2)),
            progress(2, 100.0, true, now),
            progress(3, 0.0, false, now - Duration::days(10)),
        ];

        let overview = dashboard_overview(
            &user(1, Some(LearningStyle::Visual), true),
            &records,
            &[],
            now,
        );
        assert_eq!(overview.content_completed, 1);
        assert_eq!(overview.content_in_progress, 1);
        assert_eq!(overview.recent_activity.len(), 2);
        assert!(overview.recent_activity[0].date > overview.recent_activity[1].date);
        assert!(overview.format_usage.is_empty());
    }

    #[test]
    fn distribution_counts_only_assessed_users() {
        let users = vec![
            user(1, Some(LearningStyle::Visual), true),
            user(2, Some(LearningStyle::Visual), true),
            user(3, Some(LearningStyle::Kinesthetic), true),
            user(4, Some(LearningStyle::Auditory), false),
            user(5, None, false),
        ];

        let result = style_distribution(&users);
        assert_eq!(result.total_assessed_users, 3);
        assert_eq!(
            result.distribution,
            vec![
                StyleCount {
                    learning_style: LearningStyle::Visual,
                    count: 2
                },
                StyleCount {
                    learning_style: LearningStyle::Kinesthetic,
                    count: 1
                },
            ]
        );
    }
}
