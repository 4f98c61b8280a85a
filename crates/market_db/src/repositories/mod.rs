//! Repositories for the marketplace collections
//!
//! Each collection gets a trait (store-agnostic interface) and a SQL
//! implementation over [`crate::DbClient`]. Filters are simple equality
//! predicates; anything richer belongs in the logic layer.

pub mod bookings;
pub mod bookings_sql;
pub mod catalog;
pub mod catalog_sql;
pub mod users;
pub mod users_sql;

pub use bookings::{BookingRepository, ConfirmOutcome};
pub use bookings_sql::SqlBookingRepository;
pub use catalog::CatalogRepository;
pub use catalog_sql::SqlCatalogRepository;
pub use users::UserRepository;
pub use users_sql::SqlUserRepository;
