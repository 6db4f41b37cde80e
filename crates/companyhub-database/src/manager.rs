//! Repository bundle handed to the service layer.

use std::sync::Arc;

use companyhub_core::config::{DatabaseConfig, DatabaseProvider};
use companyhub_core::result::AppResult;
use tracing::info;

use crate::connection::DatabasePool;
use crate::memory::MemoryStore;
use crate::repositories::{
    CompanyRepository, EmployeeRepository, PgCompanyRepository, PgEmployeeRepository,
    PgUserRepository, UserRepository,
};

/// All repositories behind trait objects, sharing one backend.
#[derive(Debug, Clone)]
pub struct RepositoryManager {
    /// Company repository.
    pub company: Arc<dyn CompanyRepository>,
    /// Employee repository.
    pub employee: Arc<dyn EmployeeRepository>,
    /// User and role repository.
    pub user: Arc<dyn UserRepository>,
    pool: Option<DatabasePool>,
}

impl RepositoryManager {
    /// Build PostgreSQL repositories over an open pool.
    pub fn postgres(pool: DatabasePool) -> Self {
        let pg = pool.pool().clone();
        Self {
            company: Arc::new(PgCompanyRepository::new(pg.clone())),
            employee: Arc::new(PgEmployeeRepository::new(pg.clone())),
            user: Arc::new(PgUserRepository::new(pg)),
            pool: Some(pool),
        }
    }

    /// Build in-memory repositories over one shared store.
    pub fn memory(store: MemoryStore) -> Self {
        Self {
            company: Arc::new(store.clone()),
            employee: Arc::new(store.clone()),
            user: Arc::new(store),
            pool: None,
        }
    }

    /// Connect to the configured backend, running migrations when enabled.
    pub async fn connect(config: &DatabaseConfig) -> AppResult<Self> {
        match config.provider {
            DatabaseProvider::Memory => {
                info!("Using in-memory repositories");
                Ok(Self::memory(MemoryStore::seeded()))
            }
            DatabaseProvider::Postgres => {
                let pool = DatabasePool::connect(config).await?;
                if config.run_migrations {
                    pool.migrate().await?;
                }
                Ok(Self::postgres(pool))
            }
        }
    }

    /// Name of the active backend.
    pub fn provider(&self) -> &'static str {
        if self.pool.is_some() { "postgres" } else { "memory" }
    }

    /// Check that the backend is reachable.
    pub async fn health_check(&self) -> AppResult<bool> {
        match &self.pool {
            Some(pool) => pool.health_check().await,
            None => Ok(true),
        }
    }

    /// The PostgreSQL pool, when that backend is active.
    pub fn pool(&self) -> Option<&DatabasePool> {
        self.pool.as_ref()
    }

    /// Close the underlying connection pool, if any.
    pub async fn close(&self) {
        if let Some(pool) = &self.pool {
            pool.close().await;
        }
    }
}
