//! # Quire Shared
//!
//! Response types shared between the blog server and whatever renders it.
//! Everything here is plain serde data with no domain logic.

pub mod dto;
pub mod response;

pub use response::{ApiResponse, ErrorResponse};
