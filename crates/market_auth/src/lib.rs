// --- File: crates/market_auth/src/lib.rs ---
//! Token service, guard chain and identity endpoints.

pub mod error;
pub mod guards;
pub mod handlers;
pub mod routes;
pub mod token;

pub use error::TokenError;
pub use guards::{ensure_owner, AuthState, AuthenticatedUser};
pub use routes::routes;
pub use token::{issue_token, signing_secret, verify_token, TokenClaims};

#[cfg(test)]
mod token_test;
