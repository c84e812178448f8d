//! Application state - Dependency injection container.

use std::sync::Arc;

use crate::config::Config;
use crate::infra::{Database, HealthCheck, UserStore};
use crate::services::{UserManager, UserService};

/// Application state shared by every handler.
#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<dyn UserService>,
    /// Backing store probe for `/health`
    pub health: Arc<dyn HealthCheck>,
    pub config: Arc<Config>,
}

impl AppState {
    /// Create application state with manually injected services.
    pub fn new(
        user_service: Arc<dyn UserService>,
        health: Arc<dyn HealthCheck>,
        config: Config,
    ) -> Self {
        Self {
            user_service,
            health,
            config: Arc::new(config),
        }
    }

    /// Wire the SeaORM-backed repository and service onto a database.
    pub fn from_database(database: Database, config: Config) -> Self {
        let repo = Arc::new(UserStore::new(database.get_connection()));
        let user_service = Arc::new(UserManager::new(repo));

        Self::new(user_service, Arc::new(database), config)
    }
}
