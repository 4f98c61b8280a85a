// --- File: crates/market_common/src/lib.rs ---

// Declare modules within this crate
pub mod error; // Error handling
pub mod features; // Runtime feature flag handling
pub mod http; // HTTP utilities
pub mod logging; // Logging utilities
pub mod models; // Shared domain models
pub mod services; // Service abstractions

// Re-export error types and utilities for easier access
pub use error::{
    conflict, config_error, forbidden, internal_error, not_found, unauthenticated,
    upstream_error, validation_error, HttpStatusCode, MarketError,
};

// Re-export HTTP utilities for easier access
pub use http::{
    client::{create_client, HTTP_CLIENT},
    map_json_error, IntoHttpResponse,
};

// Re-export logging utilities for easier access
pub use logging::{init, init_with_level};

// Re-export domain models for easier access
pub use models::{Booking, Category, Payment, Product, User, UserRole};

// Re-export feature flag handling utilities for easier access
pub use features::{is_feature_enabled, is_stripe_enabled};
