//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use chrono::Utc;
use sea_orm::DbErr;
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

use user_crud::api::create_router;
use user_crud::config::Config;
use user_crud::domain::{User, UserDraft};
use user_crud::errors::{AppError, AppResult};
use user_crud::infra::{HealthCheck, UserRepository};
use user_crud::services::{UserManager, UserService};
use user_crud::AppState;

/// Repository over a vector; enforces live-username uniqueness like the
/// partial unique index does.
#[derive(Default)]
pub struct InMemoryUserStore {
    users: Mutex<Vec<User>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hash as stored, including soft-deleted rows.
    pub fn stored_hash(&self, username: &str) -> Option<String> {
        self.users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.username == username && u.deleted_at.is_none())
            .map(|u| u.password_hash.clone())
    }

    pub fn row_count(&self) -> usize {
        self.users.lock().unwrap().len()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        let users = self.users.lock().unwrap();
        Ok(users
            .iter()
            .find(|u| u.id == id && u.deleted_at.is_none())
            .cloned())
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let users = self.users.lock().unwrap();
        Ok(users
            .iter()
            .find(|u| u.username == username && u.deleted_at.is_none())
            .cloned())
    }

    async fn create(&self, draft: UserDraft) -> AppResult<User> {
        let mut users = self.users.lock().unwrap();
        if users
            .iter()
            .any(|u| u.username == draft.username && u.deleted_at.is_none())
        {
            return Err(AppError::conflict("username"));
        }

        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            username: draft.username,
            password_hash: draft.password_hash,
            first_name: draft.first_name,
            last_name: draft.last_name,
            is_active: draft.is_active,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };
        users.push(user.clone());
        Ok(user)
    }

    async fn update(&self, user: User) -> AppResult<User> {
        let mut users = self.users.lock().unwrap();
        if users
            .iter()
            .any(|u| u.username == user.username && u.id != user.id && u.deleted_at.is_none())
        {
            return Err(AppError::conflict("username"));
        }

        let stored = users
            .iter_mut()
            .find(|u| u.id == user.id && u.deleted_at.is_none())
            .ok_or_else(|| AppError::not_found("User"))?;

        stored.username = user.username;
        stored.password_hash = user.password_hash;
        stored.first_name = user.first_name;
        stored.last_name = user.last_name;
        stored.is_active = user.is_active;
        stored.updated_at = Utc::now();
        Ok(stored.clone())
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        let mut users = self.users.lock().unwrap();
        let stored = users
            .iter_mut()
            .find(|u| u.id == id && u.deleted_at.is_none())
            .ok_or_else(|| AppError::not_found("User"))?;

        stored.deleted_at = Some(Utc::now());
        Ok(())
    }

    async fn list(&self, offset: u64, limit: u64) -> AppResult<(Vec<User>, u64)> {
        let users = self.users.lock().unwrap();
        let live: Vec<User> = users
            .iter()
            .filter(|u| u.deleted_at.is_none())
            .cloned()
            .collect();
        let total = live.len() as u64;
        let page = live
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect();
        Ok((page, total))
    }
}

/// Repository whose every call fails like a lost database connection.
pub struct FailingRepository;

#[async_trait]
impl UserRepository for FailingRepository {
    async fn find_by_id(&self, _id: Uuid) -> AppResult<Option<User>> {
        Err(storage_error())
    }

    async fn find_by_username(&self, _username: &str) -> AppResult<Option<User>> {
        Err(storage_error())
    }

    async fn create(&self, _draft: UserDraft) -> AppResult<User> {
        Err(storage_error())
    }

    async fn update(&self, _user: User) -> AppResult<User> {
        Err(storage_error())
    }

    async fn delete(&self, _id: Uuid) -> AppResult<()> {
        Err(storage_error())
    }

    async fn list(&self, _offset: u64, _limit: u64) -> AppResult<(Vec<User>, u64)> {
        Err(storage_error())
    }
}

fn storage_error() -> AppError {
    AppError::Storage(DbErr::Custom("connection refused".to_string()))
}

/// Health probe with a fixed outcome.
pub struct StaticHealth(pub bool);

#[async_trait]
impl HealthCheck for StaticHealth {
    async fn ping(&self) -> Result<(), DbErr> {
        if self.0 {
            Ok(())
        } else {
            Err(DbErr::Custom("connection refused".to_string()))
        }
    }
}

pub fn service_over(repo: Arc<dyn UserRepository>) -> Arc<dyn UserService> {
    Arc::new(UserManager::new(repo))
}

/// Router over the given repository with default (development) config.
pub fn build_app(repo: Arc<dyn UserRepository>) -> Router {
    build_app_with(repo, true, Config::default())
}

pub fn build_app_with(repo: Arc<dyn UserRepository>, healthy: bool, config: Config) -> Router {
    create_router(state_with(repo, healthy, config))
}

pub fn state_with(repo: Arc<dyn UserRepository>, healthy: bool, config: Config) -> AppState {
    AppState::new(service_over(repo), Arc::new(StaticHealth(healthy)), config)
}

pub fn production_config() -> Config {
    Config {
        app_env: "production".to_string(),
        ..Config::default()
    }
}

/// Send a request and return status plus parsed JSON body.
pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

pub fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}
