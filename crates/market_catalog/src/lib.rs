// --- File: crates/market_catalog/src/lib.rs ---
//! Categories and product listings.

pub mod handlers;
pub mod routes;

pub use handlers::CatalogState;
pub use routes::routes;
