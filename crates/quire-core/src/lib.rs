//! # Quire Core
//!
//! The domain layer of the Quire blog.
//! This crate contains the listing rules, pagination contract and view
//! assembly with zero infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod listing;
pub mod ports;
pub mod service;

pub use error::DomainError;
pub use service::BlogService;
