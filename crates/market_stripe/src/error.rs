// --- File: crates/market_stripe/src/error.rs ---
use market_common::error::{upstream_error, MarketError};
use thiserror::Error;

/// Error type for Stripe operations.
#[derive(Error, Debug)]
pub enum StripeError {
    /// Error making the HTTP request to the Stripe API.
    #[error("Stripe API request error: {0}")]
    RequestError(#[from] reqwest::Error),

    /// Stripe answered with a non-success status.
    #[error("Stripe API error ({status_code}): {message}")]
    ApiError { status_code: u16, message: String },

    /// Error parsing the Stripe API response.
    #[error("Failed to parse Stripe response: {0}")]
    ParseError(#[from] serde_json::Error),

    /// STRIPE_SECRET_KEY missing or the stripe config section absent.
    #[error("Stripe configuration missing or incomplete")]
    ConfigError,

    /// Internal error during Stripe operations.
    #[error("Internal error: {0}")]
    InternalError(String),
}

// The processor is an upstream dependency: every failure surfaces as a
// 502 to the caller, except missing configuration which is the server's
// own fault.
impl From<StripeError> for MarketError {
    fn from(err: StripeError) -> Self {
        match err {
            StripeError::ConfigError => {
                market_common::error::config_error("Stripe is not configured")
            }
            other => upstream_error("stripe", other),
        }
    }
}
