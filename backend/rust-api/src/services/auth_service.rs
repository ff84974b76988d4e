use anyhow::Context;
use bcrypt::{hash, verify};
use std::sync::Arc;

use super::{ServiceError, ServiceResult};
use crate::middlewares::auth::JwtService;
use crate::models::user::{
    AuthResponse, LoginRequest, NewUser, RegisterRequest, UpdateProfileRequest, User, UserProfile,
};
use crate::store::RecordStore;

pub struct AuthService {
    store: Arc<dyn RecordStore>,
    jwt_service: Arc<JwtService>,
    hash_cost: u32,
}

impl AuthService {
    pub fn new(store: Arc<dyn RecordStore>, jwt_service: Arc<JwtService>, hash_cost: u32) -> Self {
        Self {
            store,
            jwt_service,
            hash_cost,
        }
    }

    pub fn hash_password(&self, password: &str) -> ServiceResult<String> {
        Ok(hash(password, self.hash_cost).context("Failed to hash password")?)
    }

    pub fn verify_password(&self, password: &str, hash: &str) -> ServiceResult<bool> {
        Ok(verify(password, hash).context("Failed to verify password")?)
    }

    pub async fn register(&self, req: RegisterRequest) -> ServiceResult<AuthResponse> {
        let password_hash = self.hash_password(&req.password)?;

        let user = self
            .store
            .insert_user(NewUser {
                email: req.email,
                username: req.username,
                password_hash,
                learning_style: None,
                assessment_score: None,
            })
            .await?;

        tracing::info!(user_id = user.id, "User registered: {}", user.email);
        self.issue(user)
    }

    pub async fn login(&self, req: LoginRequest) -> ServiceResult<AuthResponse> {
        let user = self
            .store
            .find_user_by_email(&req.email)
            .await?
            .ok_or_else(|| ServiceError::unauthorized("Incorrect email or password"))?;

        if !self.verify_password(&req.password, &user.password_hash)? {
            tracing::warn!(email = %req.email, "Failed login attempt: invalid password");
            return Err(ServiceError::unauthorized("Incorrect email or password"));
        }

        if !user.is_active {
            return Err(ServiceError::unauthorized("Inactive user"));
        }

        tracing::info!(user_id = user.id, "User logged in");
        self.issue(user)
    }

    pub async fn current_user(&self, user_id: u64) -> ServiceResult<User> {
        self.store
            .find_user(user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User not found"))
    }

    pub async fn update_profile(
        &self,
        user_id: u64,
        req: UpdateProfileRequest,
    ) -> ServiceResult<UserProfile> {
        let mut user = self.current_user(user_id).await?;

        if let Some(email) = req.email {
            user.email = email;
        }
        if let Some(username) = req.username {
            user.username = username;
        }
        if let Some(style) = req.learning_style {
            user.learning_style = Some(style);
        }

        let user = self.store.update_user(user).await?;
        Ok(UserProfile::from(user))
    }

    fn issue(&self, user: User) -> ServiceResult<AuthResponse> {
        let access_token = self.jwt_service.issue_for(user.id, &user.username)?;

        Ok(AuthResponse {
            access_token,
            token_type: "bearer",
            user: UserProfile::from(user),
        })
    }
}
