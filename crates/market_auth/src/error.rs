// --- File: crates/market_auth/src/error.rs ---
use market_common::error::{unauthenticated, MarketError};
use thiserror::Error;

/// Internal token verification failures.
///
/// The distinction between variants exists for server-side logs only.
/// Every variant maps to the same `Unauthenticated` response so a caller
/// cannot probe which check rejected their token.
#[derive(Error, Debug)]
pub enum TokenError {
    /// Token did not have the `payload.signature` shape, or either half
    /// failed base64/JSON decoding.
    #[error("Malformed token")]
    Malformed,

    /// The HMAC signature did not match the payload.
    #[error("Signature mismatch")]
    Signature,

    /// The token was well-formed and authentic but past its `exp` claim.
    #[error("Token expired")]
    Expired,
}

impl From<TokenError> for MarketError {
    fn from(err: TokenError) -> Self {
        tracing::debug!(reason = %err, "rejecting bearer token");
        unauthenticated("Invalid or expired token")
    }
}
