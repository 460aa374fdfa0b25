//! # Quire Infrastructure
//!
//! Concrete implementations of the ports defined in `quire-core`:
//! SeaORM entities, the listing query composer and the repositories.
//! Both Postgres and SQLite connection URLs are accepted.

pub mod database;

use std::sync::Arc;

use quire_core::BlogService;
use sea_orm::DbConn;

pub use database::{
    DatabaseConfig, SqlAuthorRepository, SqlCategoryRepository, SqlPostRepository,
    SqlTagRepository,
};

/// Wire a [`BlogService`] onto SeaORM repositories sharing one pool.
pub fn blog_service(db: DbConn) -> BlogService {
    BlogService::new(
        Arc::new(SqlPostRepository::new(db.clone())),
        Arc::new(SqlCategoryRepository::new(db.clone())),
        Arc::new(SqlTagRepository::new(db.clone())),
        Arc::new(SqlAuthorRepository::new(db)),
    )
}
