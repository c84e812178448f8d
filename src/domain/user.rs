//! User domain entity and request/response types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

/// User domain entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Soft delete timestamp (None = live, Some = deleted)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Fully validated, already hashed data handed to the repository on insert.
#[derive(Debug, Clone)]
pub struct UserDraft {
    pub username: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub is_active: bool,
}

/// User creation data transfer object
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct NewUser {
    /// Unique login name
    #[schema(example = "alice", min_length = 1, max_length = 100)]
    #[validate(
        length(min = 1, max = 100, message = "Username must be between 1 and 100 characters"),
        custom(function = "not_blank")
    )]
    pub username: String,
    /// Plaintext password, hashed before storage
    #[schema(example = "p@ss1234", min_length = 8, max_length = 128)]
    #[validate(length(
        min = 8,
        max = 128,
        message = "Password must be between 8 and 128 characters"
    ))]
    pub password: String,
    #[schema(example = "Alice")]
    #[serde(default)]
    #[validate(length(max = 100, message = "First name must be at most 100 characters"))]
    pub first_name: String,
    #[schema(example = "Liddell")]
    #[serde(default)]
    #[validate(length(max = 100, message = "Last name must be at most 100 characters"))]
    pub last_name: String,
    /// Defaults to true
    pub is_active: Option<bool>,
}

/// User update data transfer object
///
/// `password` is optional: absent, empty, or equal to the stored hash keeps
/// the current hash. `is_active` keeps its value when omitted.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UserChanges {
    #[schema(example = "alice")]
    #[validate(
        length(min = 1, max = 100, message = "Username must be between 1 and 100 characters"),
        custom(function = "not_blank")
    )]
    pub username: String,
    #[schema(example = "n3w-p@ss")]
    pub password: Option<String>,
    #[serde(default)]
    #[validate(length(max = 100, message = "First name must be at most 100 characters"))]
    pub first_name: String,
    #[serde(default)]
    #[validate(length(max = 100, message = "Last name must be at most 100 characters"))]
    pub last_name: String,
    pub is_active: Option<bool>,
}

/// User response (safe to return to client)
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserResponse {
    #[schema(example = "550e8400-e29b-41d4-a716-446655440000")]
    pub id: Uuid,
    #[schema(example = "alice")]
    pub username: String,
    #[schema(example = "Alice")]
    pub first_name: String,
    #[schema(example = "Liddell")]
    pub last_name: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            first_name: user.first_name,
            last_name: user.last_name,
            is_active: user.is_active,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("blank");
        err.message = Some("Username must not be blank".into());
        return Err(err);
    }
    Ok(())
}
