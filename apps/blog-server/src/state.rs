//! Application state - shared across all handlers.

use quire_core::BlogService;
use quire_infra::DatabaseConfig;
use quire_infra::database::connect;
use sea_orm::{DbConn, DbErr};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub blog: BlogService,
}

impl AppState {
    /// Open the pool and wire the blog service onto it.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, DbErr> {
        let db = connect(config).await?;
        let state = Self::from_connection(db);

        tracing::info!("Application state initialized");
        Ok(state)
    }

    pub fn from_connection(db: DbConn) -> Self {
        Self {
            blog: quire_infra::blog_service(db),
        }
    }
}
