//! Infrastructure layer - database connection, migrations and repositories.

pub mod db;
pub mod repositories;

pub use db::{Database, HealthCheck, Migrator};
pub use repositories::{UserRepository, UserStore};

#[cfg(test)]
pub use repositories::MockUserRepository;
