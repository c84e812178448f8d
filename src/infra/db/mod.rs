//! Database connection and initialization.

use std::time::Duration;

use async_trait::async_trait;
use sea_orm::{
    ConnectOptions, ConnectionTrait, Database as SeaDatabase, DatabaseConnection, DbErr, Statement,
};
use sea_orm_migration::MigratorTrait;

use crate::config::{
    Config, DB_CONNECT_TIMEOUT_SECS, DB_MAX_CONNECTIONS, DB_MAX_LIFETIME_SECS, DB_MIN_CONNECTIONS,
};

pub mod migrations;

pub use migrations::Migrator;

/// Liveness probe for the backing store.
#[async_trait]
pub trait HealthCheck: Send + Sync {
    async fn ping(&self) -> Result<(), DbErr>;
}

/// Database wrapper for connection management
#[derive(Clone)]
pub struct Database {
    connection: DatabaseConnection,
}

impl Database {
    /// Open the connection pool without running migrations.
    pub async fn connect(config: &Config) -> Result<Self, DbErr> {
        let mut options = ConnectOptions::new(config.database_url.clone());
        options
            .max_connections(DB_MAX_CONNECTIONS)
            .min_connections(DB_MIN_CONNECTIONS)
            .max_lifetime(Duration::from_secs(DB_MAX_LIFETIME_SECS))
            .connect_timeout(Duration::from_secs(DB_CONNECT_TIMEOUT_SECS))
            .sqlx_logging(config.log_level == "debug");

        let connection = SeaDatabase::connect(options).await?;
        tracing::info!("Database connection established");

        Ok(Self { connection })
    }

    /// Get a clone of the database connection.
    pub fn get_connection(&self) -> DatabaseConnection {
        self.connection.clone()
    }

    /// Run pending migrations.
    pub async fn run_migrations(&self) -> Result<(), DbErr> {
        Migrator::up(&self.connection, None).await
    }

    /// Rollback the last migration.
    pub async fn rollback_migration(&self) -> Result<(), DbErr> {
        Migrator::down(&self.connection, Some(1)).await
    }

    /// Get migration status (list all migrations with applied status).
    pub async fn migration_status(&self) -> Result<Vec<(String, bool)>, DbErr> {
        use sea_orm::{EntityTrait, QueryOrder};
        use sea_orm_migration::seaql_migrations;

        let applied: std::collections::HashSet<String> = seaql_migrations::Entity::find()
            .order_by_asc(seaql_migrations::Column::Version)
            .all(&self.connection)
            .await?
            .into_iter()
            .map(|m| m.version)
            .collect();

        let migrations: Vec<(String, bool)> = Migrator::migrations()
            .iter()
            .map(|m| {
                let name = m.name().to_string();
                let is_applied = applied.contains(&name);
                (name, is_applied)
            })
            .collect();

        Ok(migrations)
    }

    /// Reset database and run all migrations fresh.
    pub async fn fresh_migrations(&self) -> Result<(), DbErr> {
        Migrator::fresh(&self.connection).await
    }

    /// Close the pool, waiting for checked-out connections.
    pub async fn close(self) -> Result<(), DbErr> {
        self.connection.close().await
    }
}

#[async_trait]
impl HealthCheck for Database {
    /// `SELECT 1`, bounded by the connect timeout.
    async fn ping(&self) -> Result<(), DbErr> {
        let query = self.connection.execute(Statement::from_string(
            self.connection.get_database_backend(),
            "SELECT 1".to_string(),
        ));

        match tokio::time::timeout(Duration::from_secs(DB_CONNECT_TIMEOUT_SECS), query).await {
            Ok(result) => result.map(|_| ()),
            Err(_) => Err(DbErr::Custom("database ping timed out".to_string())),
        }
    }
}
