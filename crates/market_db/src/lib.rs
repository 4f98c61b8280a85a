//! Store adapter for the resale market backend
//!
//! Wraps SQLx's `Any` driver behind a small client plus per-collection
//! repository traits, so the rest of the workspace never touches SQL and
//! the backend can run on sqlite (default), postgres or mysql.

pub mod client;
pub mod error;
pub mod factory;
pub mod repositories;

pub use client::{DbClient, DbTransaction};
pub use error::DbError;
pub use factory::SqlMarketRepositories;
