use std::env;

use crate::services::learning_style::DEFAULT_QUESTION_COUNT;

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: String,
    pub jwt_secret: String,
    pub access_token_ttl_minutes: i64,
    pub password_hash_cost: u32,
    pub allowed_origins: Vec<String>,
    pub assessment_question_count: usize,
    pub seed_file: Option<String>,
    pub otlp_endpoint: Option<String>,
    pub metrics_auth: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:8000".to_string(),
            jwt_secret: "dev-secret-only-for-local-testing".to_string(),
            access_token_ttl_minutes: 30,
            password_hash_cost: bcrypt::DEFAULT_COST,
            allowed_origins: vec![
                "http://localhost:3000".to_string(),
                "http://localhost:3001".to_string(),
                "http://127.0.0.1:3000".to_string(),
                "http://127.0.0.1:3001".to_string(),
            ],
            assessment_question_count: DEFAULT_QUESTION_COUNT,
            seed_file: None,
            otlp_endpoint: None,
            metrics_auth: "admin:changeme".to_string(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenvy::dotenv().ok();

        // Determine environment (defaults to dev)
        let env = env::var("APP_ENV").unwrap_or_else(|_| "dev".to_string());

        // Build configuration from config/*.toml + ENV overrides
        let settings = config::Config::builder()
            .add_source(config::File::with_name(&format!("config/{}", env)).required(false))
            .add_source(config::Environment::with_prefix("APP").separator("__"))
            .build()?;

        let defaults = Config::default();

        let bind_addr = settings
            .get_string("server.bind_addr")
            .or_else(|_| env::var("BIND_ADDR"))
            .unwrap_or(defaults.bind_addr);

        let jwt_secret = match settings
            .get_string("auth.jwt_secret")
            .or_else(|_| env::var("JWT_SECRET"))
        {
            Ok(secret) => secret,
            Err(_) if env == "prod" => {
                return Err(config::ConfigError::NotFound(
                    "auth.jwt_secret must be set in production".to_string(),
                ))
            }
            Err(_) => {
                eprintln!("WARNING: Using default JWT_SECRET (dev mode only!)");
                defaults.jwt_secret
            }
        };

        let access_token_ttl_minutes = settings
            .get_int("auth.access_token_ttl_minutes")
            .ok()
            .or_else(|| parse_env("ACCESS_TOKEN_EXPIRE_MINUTES"))
            .unwrap_or(defaults.access_token_ttl_minutes);

        let password_hash_cost = settings
            .get_int("auth.password_hash_cost")
            .ok()
            .and_then(|cost| u32::try_from(cost).ok())
            .or_else(|| parse_env("PASSWORD_HASH_COST"))
            .unwrap_or(defaults.password_hash_cost);

        let allowed_origins = settings
            .get_array("cors.allowed_origins")
            .ok()
            .map(|values| {
                values
                    .into_iter()
                    .filter_map(|value| value.into_string().ok())
                    .collect()
            })
            .or_else(|| env::var("ALLOWED_ORIGINS").ok().map(|raw| split_list(&raw)))
            .unwrap_or(defaults.allowed_origins);

        let assessment_question_count = settings
            .get_int("assessment.question_count")
            .ok()
            .and_then(|count| usize::try_from(count).ok())
            .or_else(|| parse_env("ASSESSMENT_QUESTIONS_COUNT"))
            .unwrap_or(defaults.assessment_question_count);

        let seed_file = settings
            .get_string("seed.file")
            .or_else(|_| env::var("SEED_FILE"))
            .ok()
            .filter(|path| !path.is_empty());

        let otlp_endpoint = settings
            .get_string("telemetry.otlp_endpoint")
            .or_else(|_| env::var("OTEL_EXPORTER_OTLP_ENDPOINT"))
            .ok()
            .filter(|endpoint| !endpoint.is_empty());

        let metrics_auth = settings
            .get_string("metrics.basic_auth")
            .or_else(|_| env::var("METRICS_AUTH"))
            .unwrap_or(defaults.metrics_auth);

        Ok(Config {
            bind_addr,
            jwt_secret,
            access_token_ttl_minutes,
            password_hash_cost,
            allowed_origins,
            assessment_question_count,
            seed_file,
            otlp_endpoint,
            metrics_auth,
        })
    }
}

fn parse_env<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|raw| raw.trim().parse().ok())
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn split_list_trims_and_skips_blanks() {
        assert_eq!(
            split_list(" http://a.test , ,http://b.test"),
            vec!["http://a.test".to_string(), "http://b.test".to_string()]
        );
    }

    #[test]
    #[serial]
    fn env_overrides_question_count() {
        env::set_var("ASSESSMENT_QUESTIONS_COUNT", "12");
        env::set_var("ALLOWED_ORIGINS", "https://learn.example.com");
        let config = Config::load().unwrap();
        env::remove_var("ASSESSMENT_QUESTIONS_COUNT");
        env::remove_var("ALLOWED_ORIGINS");

        assert_eq!(config.assessment_question_count, 12);
        assert_eq!(
            config.allowed_origins,
            vec!["https://learn.example.com".to_string()]
        );
    }

    #[test]
    #[serial]
    fn defaults_apply_without_overrides() {
        env::remove_var("ASSESSMENT_QUESTIONS_COUNT");
        env::remove_var("ACCESS_TOKEN_EXPIRE_MINUTES");
        let config = Config::load().unwrap();
        assert_eq!(config.assessment_question_count, DEFAULT_QUESTION_COUNT);
        assert_eq!(config.access_token_ttl_minutes, 30);
    }

    #[test]
    #[serial]
    fn production_requires_jwt_secret() {
        env::set_var("APP_ENV", "prod");
        env::remove_var("JWT_SECRET");
        let result = Config::load();
        env::remove_var("APP_ENV");
        assert!(result.is_err());
    }
}
