use anyhow::{Context, Result};
use bcrypt::hash;
use serde::Deserialize;
use std::path::Path;
use tokio::fs;

use crate::config::Config;
use crate::models::{
    assessment::AssessmentQuestion,
    content::NewContentItem,
    user::{NewUser, UserSeed},
};
use crate::store::RecordStore;

const DEMO_SEED: &str = include_str!("../../seed/demo.json");

/// Startup data set: demo accounts, catalog and the style inventory.
#[derive(Debug, Default, Deserialize)]
pub struct SeedData {
    #[serde(default)]
    pub users: Vec<UserSeed>,
    #[serde(default)]
    pub content: Vec<NewContentItem>,
    #[serde(default)]
    pub questions: Vec<AssessmentQuestion>,
}

impl SeedData {
    pub fn demo() -> Result<Self> {
        serde_json::from_str(DEMO_SEED).context("Failed to deserialize built-in demo seed")
    }

    pub async fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read seed file {}", path.display()))?;

        serde_json::from_str(&contents).context("Failed to deserialize seed payload")
    }
}

/// Loads the configured seed file, or the built-in demo data when none is
/// configured or the file is missing.
pub async fn bootstrap(config: &Config, store: &dyn RecordStore) -> Result<()> {
    let seed = match config.seed_file.as_deref() {
        Some(path) if !path.is_empty() && Path::new(path).exists() => {
            tracing::info!("Loading seed data from {}", path);
            SeedData::from_file(Path::new(path)).await?
        }
        Some(path) if !path.is_empty() => {
            tracing::warn!("Seed file {} not found, using built-in demo data", path);
            SeedData::demo()?
        }
        _ => {
            tracing::debug!("No seed file configured, using built-in demo data");
            SeedData::demo()?
        }
    };

    apply(seed, config, store).await
}

pub async fn apply(seed: SeedData, config: &Config, store: &dyn RecordStore) -> Result<()> {
    let user_count = seed.users.len();
    for user in seed.users {
        let password_hash = hash(&user.password, config.password_hash_cost)
            .with_context(|| format!("Failed to hash password for {}", user.email))?;

        store
            .insert_user(NewUser {
                email: user.email,
                username: user.username,
                password_hash,
                learning_style: user.learning_style,
                assessment_score: user.assessment_score,
            })
            .await
            .context("Failed to insert seed user")?;
    }

    let content_count = seed.content.len();
    for item in seed.content {
        store
            .insert_content(item)
            .await
            .context("Failed to insert seed content")?;
    }

    let active_questions = seed.questions.iter().filter(|q| q.is_active).count();
    store
        .replace_questions(seed.questions)
        .await
        .context("Failed to store assessment questions")?;

    if active_questions != config.assessment_question_count {
        tracing::warn!(
            "Assessment has {} active questions but submissions require exactly {}",
            active_questions,
            config.assessment_question_count
        );
    }

    tracing::info!(
        "Seeded {} users, {} content items, {} assessment questions",
        user_count,
        content_count,
        active_questions
    );

    Ok(())
}
