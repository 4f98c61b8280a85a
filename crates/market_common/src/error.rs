// --- File: crates/market_common/src/error.rs ---
use std::fmt;
use thiserror::Error;

/// The base error type for the marketplace backend.
///
/// This enum covers the request-terminal failure taxonomy shared by all
/// crates: authentication and authorization short-circuits, resource
/// resolution failures, the payment conflict, and upstream/store faults.
/// None of these are retried server-side.
#[derive(Error, Debug)]
pub enum MarketError {
    /// Missing, malformed, expired or forged bearer token. Deliberately
    /// one variant: callers must not be able to tell "expired" from
    /// "forged" by the response.
    #[error("Unauthorized: {0}")]
    Unauthenticated(String),

    /// Authenticated, but role or ownership checks failed, or the token's
    /// subject no longer exists.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// A resource id or email did not resolve.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The operation would violate a uniqueness invariant, e.g. paying an
    /// already-paid booking a second time.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Request payload failed validation.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Missing or invalid server configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error during a store operation.
    #[error("Database error: {0}")]
    Database(String),

    /// The payment processor (or another external service) failed.
    #[error("External service error: {service_name} - {message}")]
    Upstream {
        service_name: String,
        message: String,
    },

    /// Anything else.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// A trait for converting errors to HTTP status codes.
pub trait HttpStatusCode {
    /// Returns the HTTP status code for this error.
    fn status_code(&self) -> u16;
}

impl HttpStatusCode for MarketError {
    fn status_code(&self) -> u16 {
        match self {
            MarketError::Unauthenticated(_) => 401,
            MarketError::Forbidden(_) => 403,
            MarketError::NotFound(_) => 404,
            MarketError::Conflict(_) => 409,
            MarketError::Validation(_) => 400,
            MarketError::Config(_) => 500,
            MarketError::Database(_) => 500,
            MarketError::Upstream { .. } => 502,
            MarketError::Internal(_) => 500,
        }
    }
}

// Common error conversions
impl From<reqwest::Error> for MarketError {
    fn from(err: reqwest::Error) -> Self {
        MarketError::Upstream {
            service_name: "http".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for MarketError {
    fn from(err: serde_json::Error) -> Self {
        MarketError::Internal(err.to_string())
    }
}

// Utility constructors, mirroring how handlers build terminal failures.
pub fn unauthenticated<T: fmt::Display>(message: T) -> MarketError {
    MarketError::Unauthenticated(message.to_string())
}

pub fn forbidden<T: fmt::Display>(message: T) -> MarketError {
    MarketError::Forbidden(message.to_string())
}

pub fn not_found<T: fmt::Display>(message: T) -> MarketError {
    MarketError::NotFound(message.to_string())
}

pub fn conflict<T: fmt::Display>(message: T) -> MarketError {
    MarketError::Conflict(message.to_string())
}

pub fn validation_error<T: fmt::Display>(message: T) -> MarketError {
    MarketError::Validation(message.to_string())
}

pub fn config_error<T: fmt::Display>(message: T) -> MarketError {
    MarketError::Config(message.to_string())
}

pub fn upstream_error<T: fmt::Display>(service_name: &str, message: T) -> MarketError {
    MarketError::Upstream {
        service_name: service_name.to_string(),
        message: message.to_string(),
    }
}

pub fn internal_error<T: fmt::Display>(message: T) -> MarketError {
    MarketError::Internal(message.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn taxonomy_maps_to_expected_status_codes() {
        assert_eq!(unauthenticated("x").status_code(), 401);
        assert_eq!(forbidden("x").status_code(), 403);
        assert_eq!(not_found("x").status_code(), 404);
        assert_eq!(conflict("x").status_code(), 409);
        assert_eq!(upstream_error("stripe", "down").status_code(), 502);
        assert_eq!(internal_error("x").status_code(), 500);
    }
}
