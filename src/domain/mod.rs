//! Domain layer - Core business entities and logic
//!
//! Contains the user entity, the password value object and the request and
//! response shapes built around them.

pub mod password;
pub mod user;

pub use password::Password;
pub use user::{NewUser, User, UserChanges, UserDraft, UserResponse};
