// --- File: crates/market_auth/src/token.rs ---
//! Stateless bearer tokens.
//!
//! A token is `base64url(claims_json).base64url(hmac_sha256(claims_json))`
//! signed with a server-side secret. There is no token store and no
//! revocation: a token stays valid until its `exp` claim passes, and
//! deleting an identity only takes effect because the guards re-read the
//! identity store on every request.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::{Duration, Utc};
use hmac::{Hmac, Mac};
use market_common::error::{config_error, MarketError};
use serde::{Deserialize, Serialize};
use sha2::Sha256;

use crate::error::TokenError;

type HmacSha256 = Hmac<Sha256>;

/// Environment variable holding the HMAC signing secret. Never read
/// from config files.
pub const TOKEN_SECRET_ENV: &str = "MARKET_TOKEN_SECRET";

/// Claims carried inside a bearer token. Times are unix seconds.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenClaims {
    /// Subject: the email the token was issued for.
    pub sub: String,
    /// Issued-at.
    pub iat: i64,
    /// Expiry. Verification rejects the token once this has passed.
    pub exp: i64,
}

/// Reads the signing secret from the environment.
pub fn signing_secret() -> Result<String, MarketError> {
    std::env::var(TOKEN_SECRET_ENV)
        .map_err(|_| config_error(format!("{TOKEN_SECRET_ENV} environment variable not set")))
}

fn sign(payload: &[u8], secret: &str) -> Vec<u8> {
    // Hmac-SHA256 accepts keys of any length, so this cannot fail.
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .unwrap_or_else(|_| unreachable!("HMAC accepts any key length"));
    mac.update(payload);
    mac.finalize().into_bytes().to_vec()
}

/// Issues a signed token for `email`, valid for `ttl_hours` from now.
pub fn issue_token(email: &str, secret: &str, ttl_hours: i64) -> String {
    let now = Utc::now();
    let claims = TokenClaims {
        sub: email.to_string(),
        iat: now.timestamp(),
        exp: (now + Duration::hours(ttl_hours)).timestamp(),
    };
    // TokenClaims serialization cannot fail: plain struct of string/int.
    let payload = serde_json::to_vec(&claims).unwrap_or_default();
    let signature = sign(&payload, secret);
    format!(
        "{}.{}",
        URL_SAFE_NO_PAD.encode(&payload),
        URL_SAFE_NO_PAD.encode(signature)
    )
}

/// Verifies shape, signature and expiry, in that order.
pub fn verify_token(token: &str, secret: &str) -> Result<TokenClaims, TokenError> {
    let (payload_b64, signature_b64) = token.split_once('.').ok_or(TokenError::Malformed)?;
    if signature_b64.contains('.') {
        return Err(TokenError::Malformed);
    }

    let payload = URL_SAFE_NO_PAD
        .decode(payload_b64)
        .map_err(|_| TokenError::Malformed)?;
    let provided_signature = URL_SAFE_NO_PAD
        .decode(signature_b64)
        .map_err(|_| TokenError::Malformed)?;

    let expected_signature = sign(&payload, secret);
    if !constant_time_eq(&expected_signature, &provided_signature) {
        return Err(TokenError::Signature);
    }

    // Claims are only trusted after the signature check.
    let claims: TokenClaims =
        serde_json::from_slice(&payload).map_err(|_| TokenError::Malformed)?;
    if claims.exp <= Utc::now().timestamp() {
        return Err(TokenError::Expired);
    }
    Ok(claims)
}

/// Helper for constant-time comparison of signatures.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut result = 0;
    for (x, y) in a.iter().zip(b.iter()) {
        result |= x ^ y;
    }
    result == 0
}
