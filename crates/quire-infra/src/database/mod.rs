//! Database access: entities, the listing query composer and repositories.

mod base;
mod connections;
mod repositories;

pub mod entity;
pub mod listing;

pub use base::SqlRepository;
pub use connections::{DatabaseConfig, connect, create_schema};
pub use repositories::{
    SqlAuthorRepository, SqlCategoryRepository, SqlPostRepository, SqlTagRepository,
};
